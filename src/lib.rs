//! Celebrity booking platform
//!
//! Public catalog of celebrities, fan bookings with a reviewed lifecycle,
//! and an admin back office, served over Axum with SeaORM persistence.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Celebrities, bookings, pricing and slug rules
//! - **services**: Catalog, booking desk, auth and reporting use cases
//! - **infra**: Database, Redis, repositories
//! - **notifications**: Customer emails (logged or queued)
//! - **jobs**: Background email delivery
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! celebrity-booking serve
//!
//! # Run migrations
//! celebrity-booking migrate up
//!
//! # Bootstrap an admin
//! celebrity-booking create-admin --email ops@example.com --password '...'
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod notifications;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Booking, BookingStatus, Celebrity, Password};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
