//! Domain layer - Core business entities and logic
//!
//! Celebrities, bookings and their lifecycle, pricing rules and the
//! read-side aggregates. Nothing in here talks to the database.

pub mod admin;
pub mod booking;
pub mod celebrity;
pub mod metadata;
pub mod password;
pub mod pricing;
pub mod reporting;
pub mod slug;

pub use admin::{normalize_email, AdminResponse, AdminUser};
pub use booking::{
    Booking, BookingFilter, BookingStatus, BookingView, CreateBookingRequest, PaymentStatus,
    ServiceKind, UpdateBooking, UpdateBookingStatus,
};
pub use celebrity::{
    CardTier, Celebrity, CelebrityContact, CelebrityFilter, CelebritySummary, CreateCelebrity,
    ServicePrices, SocialLinks, SubscriptionPlan, SubscriptionPrices, UpdateCelebrity,
};
pub use metadata::{metadata_from_value, BookingMetadata, MetadataMap, ServiceDetails};
pub use password::Password;
pub use pricing::{quote, Quote};
pub use reporting::{
    status_totals, BookingStatRow, BookingStatsReport, Bucket, DailyBucket, DashboardStats,
    ListingStats, StatusTotals,
};
pub use slug::{generate_slug, slug_candidate};
