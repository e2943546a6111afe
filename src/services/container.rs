//! Service Container - Centralized service access with parallel execution support.
//!
//! Handlers reach every use case through [`ServiceContainer`]; the concrete
//! [`Services`] wires them over one [`Persistence`] registry at startup.

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, BookingDesk, BookingService, Catalog, CatalogService,
    ReportService, Reporter,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{FeaturedCache, Persistence};
use crate::notifications::Notifier;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn bookings(&self) -> Arc<dyn BookingService>;

    fn reports(&self) -> Arc<dyn ReportService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    catalog_service: Arc<dyn CatalogService>,
    booking_service: Arc<dyn BookingService>,
    report_service: Arc<dyn ReportService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        catalog_service: Arc<dyn CatalogService>,
        booking_service: Arc<dyn BookingService>,
        report_service: Arc<dyn ReportService>,
    ) -> Self {
        Self {
            auth_service,
            catalog_service,
            booking_service,
            report_service,
        }
    }

    /// Wire every service over one persistence registry.
    ///
    /// Without a cache the featured list is read from the store each time.
    pub fn from_persistence(
        uow: Arc<Persistence>,
        config: Config,
        cache: Option<Arc<dyn FeaturedCache>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let catalog = Catalog::new(uow.clone());
        let catalog = match cache {
            Some(cache) => catalog.with_cache(cache),
            None => catalog,
        };

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            catalog_service: Arc::new(catalog),
            booking_service: Arc::new(BookingDesk::new(uow.clone(), notifier)),
            report_service: Arc::new(Reporter::new(uow)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        cache: Option<Arc<dyn FeaturedCache>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::from_persistence(Arc::new(Persistence::new(db)), config, cache, notifier)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }
}

/// Run independent store reads concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// If either operation fails, the error is returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute four independent async operations in parallel.
    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_join2_returns_both() {
        let (a, b) = parallel::join2(async { Ok(1) }, async { Ok("two") })
            .await
            .unwrap();
        assert_eq!((a, b), (1, "two"));
    }

    #[tokio::test]
    async fn test_join4_short_circuits_on_error() {
        let result: AppResult<(i32, i32, i32, i32)> = parallel::join4(
            async { Ok(1) },
            async { Err(AppError::internal("boom")) },
            async { Ok(3) },
            async { Ok(4) },
        )
        .await;
        assert!(result.is_err());
    }
}
