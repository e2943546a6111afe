//! Application state - Dependency injection container.
//!
//! Handlers reach services through trait objects, so the same router runs
//! over SeaORM in production and over in-memory fakes in tests.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database, FeaturedCache, HealthProbe, RateLimiter};
use crate::notifications::Notifier;
use crate::services::{
    AuthService, BookingService, CatalogService, ReportService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub booking_service: Arc<dyn BookingService>,
    pub report_service: Arc<dyn ReportService>,
    /// Counters for the rate-limit middleware
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// Dependencies reported by `/health`
    pub probes: Vec<Arc<dyn HealthProbe>>,
}

impl AppState {
    /// Build the production state over Postgres and Redis.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: Config,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let featured_cache: Arc<dyn FeaturedCache> = cache.clone();
        let container = Services::from_connection(
            database.get_connection(),
            config,
            Some(featured_cache),
            notifier,
        );

        Self::new(&container, cache.clone())
            .with_probe(database)
            .with_probe(cache)
    }

    /// Create application state from any service container.
    pub fn new(services: &dyn ServiceContainer, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        Self {
            auth_service: services.auth(),
            catalog_service: services.catalog(),
            booking_service: services.bookings(),
            report_service: services.reports(),
            rate_limiter,
            probes: Vec::new(),
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push(probe);
        self
    }
}
