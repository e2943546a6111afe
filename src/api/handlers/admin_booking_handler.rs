//! Admin booking handlers.
//!
//! All routes here sit behind the admin session middleware.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{parse_id, QueryParams, ValidatedJson};
use crate::api::AppState;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::domain::{BookingFilter, BookingStatsReport, BookingView, UpdateBooking, UpdateBookingStatus};
use crate::errors::AppResult;
use crate::services::BookingPage;
use crate::types::PaginationParams;

/// Date range for booking statistics
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    #[serde(default, deserialize_with = "crate::types::dates::start_bound")]
    #[param(value_type = Option<String>)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::types::dates::end_bound")]
    #[param(value_type = Option<String>)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Create admin booking routes
pub fn admin_booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings))
        .route("/stats", get(booking_stats))
        .route("/:id", patch(update_booking))
        .route("/:id/status", patch(update_booking_status))
        .route("/:id/accept", patch(accept_booking))
        .route("/:id/reject", patch(reject_booking))
}

/// List bookings with filters and per-status totals
#[utoipa::path(
    get,
    path = "/admin/bookings",
    tag = "Admin Bookings",
    params(PaginationParams, BookingFilter),
    responses(
        (status = 200, description = "One page of bookings", body = BookingPage),
        (status = 400, description = "Invalid query"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<PaginationParams>,
    QueryParams(filter): QueryParams<BookingFilter>,
) -> AppResult<Json<BookingPage>> {
    let page = pagination.resolve(DEFAULT_PAGE_SIZE)?;
    Ok(Json(state.booking_service.list(filter, page).await?))
}

/// Booking statistics for a date range
#[utoipa::path(
    get,
    path = "/admin/bookings/stats",
    tag = "Admin Bookings",
    params(StatsQuery),
    responses(
        (status = 200, description = "Totals and the 30-day daily series", body = BookingStatsReport),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn booking_stats(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<StatsQuery>,
) -> AppResult<Json<BookingStatsReport>> {
    let report = state
        .report_service
        .booking_stats(query.start_date, query.end_date)
        .await?;
    Ok(Json(report))
}

/// Edit a booking directly
#[utoipa::path(
    patch,
    path = "/admin/bookings/{id}",
    tag = "Admin Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Booking updated", body = BookingView),
        (status = 400, description = "Validation error or invalid transition"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateBooking>,
) -> AppResult<Json<BookingView>> {
    let id = parse_id(&id, "booking")?;
    Ok(Json(state.booking_service.update(id, payload).await?))
}

/// Move a booking to a new status
#[utoipa::path(
    patch,
    path = "/admin/bookings/{id}/status",
    tag = "Admin Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    request_body = UpdateBookingStatus,
    responses(
        (status = 200, description = "Status updated", body = BookingView),
        (status = 400, description = "Invalid transition"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateBookingStatus>,
) -> AppResult<Json<BookingView>> {
    let id = parse_id(&id, "booking")?;
    Ok(Json(state.booking_service.update_status(id, payload).await?))
}

/// Accept a pending booking
#[utoipa::path(
    patch,
    path = "/admin/bookings/{id}/accept",
    tag = "Admin Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking approved", body = BookingView),
        (status = 400, description = "Invalid transition"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn accept_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookingView>> {
    let id = parse_id(&id, "booking")?;
    Ok(Json(state.booking_service.accept(id).await?))
}

/// Reject a pending booking
#[utoipa::path(
    patch,
    path = "/admin/bookings/{id}/reject",
    tag = "Admin Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking rejected", body = BookingView),
        (status = 400, description = "Invalid transition"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reject_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookingView>> {
    let id = parse_id(&id, "booking")?;
    Ok(Json(state.booking_service.reject(id).await?))
}
