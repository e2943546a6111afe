//! Public booking handlers.

use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::extractors::{parse_id, JsonBody};
use crate::api::middleware::rate_limit_middleware;
use crate::api::AppState;
use crate::domain::{BookingView, CreateBookingRequest};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create public booking routes; only creation is rate limited
pub fn booking_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_booking).route_layer(middleware::from_fn_with_state(
                state,
                rate_limit_middleware,
            )),
        )
        .route("/:id", get(get_booking).delete(cancel_booking))
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Celebrity not found"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateBookingRequest>,
) -> AppResult<Created<BookingView>> {
    let booking = state.booking_service.create(payload).await?;
    Ok(Created(booking))
}

/// Get booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking found", body = BookingView),
        (status = 400, description = "Invalid booking ID format"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookingView>> {
    let id = parse_id(&id, "booking")?;
    Ok(Json(state.booking_service.get(id).await?))
}

/// Cancel a booking
///
/// Only pending bookings at least 24 hours away can be cancelled.
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = MessageResponse),
        (status = 400, description = "Booking can no longer be cancelled"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, "booking")?;
    state.booking_service.cancel(id).await?;
    Ok(Json(MessageResponse::new("Booking cancelled successfully")))
}
