//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, MAX_PAGE_SIZE};
use crate::errors::{AppError, AppResult};

/// Pagination query parameters, reusable across all list endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size, capped at 100
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Validate and apply defaults.
    ///
    /// Page and limit must be positive; the limit is capped at the maximum.
    pub fn resolve(&self, default_limit: u64) -> AppResult<PageRequest> {
        let page = match self.page {
            None => DEFAULT_PAGE_NUMBER,
            Some(p) if p >= 1 => p as u64,
            Some(_) => return Err(AppError::validation("Page must be a positive integer")),
        };
        let limit = match self.limit {
            None => default_limit,
            Some(l) if l >= 1 => l as u64,
            Some(_) => return Err(AppError::validation("Limit must be a positive integer")),
        };

        Ok(PageRequest {
            page,
            limit: limit.min(MAX_PAGE_SIZE),
        })
    }
}

/// A validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Calculate offset for database query.
    ///
    /// Saturates at `i64::MAX` (the largest OFFSET Postgres accepts), so a
    /// page far past the end still reads as an empty page.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: PageRequest, total: u64) -> Self {
        Self {
            total,
            page: page.page,
            limit: page.limit,
            total_pages: total.div_ceil(page.limit.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let page = PaginationParams::default().resolve(12).unwrap();
        assert_eq!(page, PageRequest { page: 1, limit: 12 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_limit_is_capped() {
        let page = PaginationParams::new(3, 500).resolve(10).unwrap();
        assert_eq!(page.limit, 100);
        assert_eq!(page.offset(), 200);
    }

    #[test]
    fn test_non_positive_values_rejected() {
        assert!(PaginationParams::new(0, 10).resolve(10).is_err());
        assert!(PaginationParams::new(1, 0).resolve(10).is_err());
        assert!(PaginationParams::new(-2, 10).resolve(10).is_err());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PageRequest { page: 1, limit: 10 };
        assert_eq!(PaginationMeta::new(page, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(page, 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(page, 11).total_pages, 2);
    }

    #[test]
    fn test_huge_page_offset_saturates() {
        let page = PaginationParams::new(i64::MAX, 100).resolve(10).unwrap();
        assert_eq!(page.offset(), i64::MAX as u64);

        let page = PaginationParams::new(100_000_000_000_000_000, 100)
            .resolve(10)
            .unwrap();
        assert_eq!(page.offset(), i64::MAX as u64);
    }
}
