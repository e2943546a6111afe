//! Report service - admin statistics and the dashboard.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::config::{DAILY_STATS_DAYS, DASHBOARD_RECENT_LIMIT};
use crate::domain::{
    status_totals, BookingFilter, BookingStatsReport, BookingView, CelebritySummary,
    DashboardStats,
};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Report service trait for dependency injection.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Totals over bookings scheduled in the range plus a daily series of
    /// bookings created in the last 30 days
    async fn booking_stats(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> AppResult<BookingStatsReport>;

    async fn dashboard(&self) -> AppResult<DashboardStats>;
}

/// Concrete implementation of ReportService using Unit of Work.
pub struct Reporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Reporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for Reporter<U> {
    async fn booking_stats(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> AppResult<BookingStatsReport> {
        let filter = BookingFilter {
            start_date,
            end_date,
            ..Default::default()
        };
        let since = Utc::now() - Duration::days(DAILY_STATS_DAYS);
        let bookings = self.uow.bookings();

        let (in_range, recent) =
            parallel::join2(bookings.stat_rows(&filter), bookings.created_since(since)).await?;

        Ok(BookingStatsReport::build(&in_range, &recent))
    }

    async fn dashboard(&self) -> AppResult<DashboardStats> {
        let celebrities = self.uow.celebrities();
        let bookings = self.uow.bookings();

        let (total_celebrities, total_bookings, recent_bookings, recent_celebrities) =
            parallel::join4(
                celebrities.count(),
                bookings.count(),
                bookings.recent(DASHBOARD_RECENT_LIMIT),
                celebrities.recent(DASHBOARD_RECENT_LIMIT),
            )
            .await?;
        let all_rows = bookings.stat_rows(&BookingFilter::default()).await?;

        let ids: Vec<Uuid> = recent_bookings.iter().map(|b| b.celebrity_id).collect();
        let summaries: HashMap<Uuid, CelebritySummary> = celebrities
            .find_by_ids(&ids)
            .await?
            .iter()
            .map(|c| (c.id, CelebritySummary::from(c)))
            .collect();

        let recent_bookings = recent_bookings
            .into_iter()
            .map(|booking| {
                let summary = summaries.get(&booking.celebrity_id).cloned();
                BookingView::new(booking, summary)
            })
            .collect();

        Ok(DashboardStats {
            total_celebrities,
            total_bookings,
            recent_bookings,
            recent_celebrities,
            bookings_by_status: status_totals(&all_rows),
        })
    }
}
