//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_booking_handler, admin_celebrity_handler, auth_handler, booking_handler,
    celebrity_handler, dashboard_handler, health_handler,
};
use crate::domain::{
    AdminResponse, BookingStatsReport, BookingStatus, BookingView, Bucket,
    CardTier, Celebrity, CelebritySummary, CreateBookingRequest, CreateCelebrity, DailyBucket,
    DashboardStats, ListingStats, PaymentStatus, ServiceKind, ServicePrices, SocialLinks,
    StatusTotals, SubscriptionPlan, SubscriptionPrices, UpdateBooking, UpdateBookingStatus,
    UpdateCelebrity,
};
use crate::services::{BookingPage, CelebrityPage, TokenResponse};
use crate::types::{MessageResponse, PaginationMeta};

/// OpenAPI documentation for the booking API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Celebrity Booking API",
        version = "0.1.0",
        description = "Celebrity catalog, fan bookings and the admin back office"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health_handler::health,
        // Public catalog
        celebrity_handler::list_celebrities,
        celebrity_handler::featured_celebrities,
        celebrity_handler::get_celebrity,
        celebrity_handler::get_celebrity_by_slug,
        // Public bookings
        booking_handler::create_booking,
        booking_handler::get_booking,
        booking_handler::cancel_booking,
        // Authentication
        auth_handler::login,
        auth_handler::register,
        auth_handler::change_password,
        // Admin
        admin_booking_handler::list_bookings,
        admin_booking_handler::booking_stats,
        admin_booking_handler::update_booking,
        admin_booking_handler::update_booking_status,
        admin_booking_handler::accept_booking,
        admin_booking_handler::reject_booking,
        admin_celebrity_handler::list_celebrities,
        admin_celebrity_handler::create_celebrity,
        admin_celebrity_handler::get_celebrity,
        admin_celebrity_handler::update_celebrity,
        admin_celebrity_handler::delete_celebrity,
        dashboard_handler::dashboard_stats,
    ),
    components(
        schemas(
            // Catalog
            Celebrity,
            CelebritySummary,
            CardTier,
            ServicePrices,
            SubscriptionPrices,
            SocialLinks,
            CreateCelebrity,
            UpdateCelebrity,
            CelebrityPage,
            // Bookings
            BookingView,
            BookingStatus,
            PaymentStatus,
            ServiceKind,
            SubscriptionPlan,
            CreateBookingRequest,
            UpdateBooking,
            UpdateBookingStatus,
            BookingPage,
            // Reporting
            ListingStats,
            StatusTotals,
            BookingStatsReport,
            Bucket,
            DailyBucket,
            DashboardStats,
            // Auth
            auth_handler::LoginRequest,
            auth_handler::RegisterRequest,
            auth_handler::ChangePasswordRequest,
            TokenResponse,
            AdminResponse,
            // Shared
            PaginationMeta,
            MessageResponse,
            health_handler::HealthResponse,
            health_handler::ServiceStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Celebrities", description = "Public celebrity catalog"),
        (name = "Bookings", description = "Fan bookings"),
        (name = "Authentication", description = "Admin login and account management"),
        (name = "Admin Bookings", description = "Booking review and lifecycle"),
        (name = "Admin Celebrities", description = "Catalog management"),
        (name = "Dashboard", description = "Back-office aggregates")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /admin/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_admin_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/admin/bookings/{id}/accept"));
        assert!(paths.contains_key("/celebrities/slug/{slug}"));
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
