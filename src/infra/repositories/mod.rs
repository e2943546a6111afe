//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod admin_repository;
mod booking_repository;
mod celebrity_repository;
pub(crate) mod entities;

pub use admin_repository::{AdminRepository, AdminStore};
pub use booking_repository::{BookingRepository, BookingStore};
pub use celebrity_repository::{CelebrityRepository, CelebrityStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use admin_repository::MockAdminRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use booking_repository::MockBookingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use celebrity_repository::MockCelebrityRepository;
