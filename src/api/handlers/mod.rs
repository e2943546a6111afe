//! HTTP request handlers.

pub mod admin_booking_handler;
pub mod admin_celebrity_handler;
pub mod auth_handler;
pub mod booking_handler;
pub mod celebrity_handler;
pub mod dashboard_handler;
pub mod health_handler;

pub use admin_booking_handler::admin_booking_routes;
pub use admin_celebrity_handler::admin_celebrity_routes;
pub use auth_handler::{account_routes, auth_routes};
pub use booking_handler::booking_routes;
pub use celebrity_handler::celebrity_routes;
pub use dashboard_handler::dashboard_routes;
pub use health_handler::{health, root};
