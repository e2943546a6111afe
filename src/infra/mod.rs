//! Infrastructure layer - External systems integration
//!
//! - PostgreSQL connection, migrations and repositories (SeaORM)
//! - Redis cache and rate-limit counters
//! - Health probes
//! - The persistence registry handed to services

pub mod cache;
pub mod db;
pub mod health;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, FeaturedCache, RateLimiter};
pub use db::{Database, Migrator};
pub use health::HealthProbe;
pub use repositories::{
    AdminRepository, AdminStore, BookingRepository, BookingStore, CelebrityRepository,
    CelebrityStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::{MockFeaturedCache, MockRateLimiter};
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockAdminRepository, MockBookingRepository, MockCelebrityRepository};
