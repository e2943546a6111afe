//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach the store through the Unit of Work.

mod auth_service;
mod booking_service;
mod catalog_service;
pub mod container;
mod report_service;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use booking_service::{BookingDesk, BookingPage, BookingService};
pub use catalog_service::{Catalog, CatalogService, CelebrityPage};
pub use report_service::{ReportService, Reporter};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
