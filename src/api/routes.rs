//! Application route configuration.

use axum::{http::Method, middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    account_routes, admin_booking_routes, admin_celebrity_routes, auth_routes, booking_routes,
    celebrity_routes, dashboard_routes, health, root,
};
use super::middleware::{auth_middleware, rate_limit_auth_middleware};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no rate limiting)
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public catalog and bookings; booking creation carries its own limit
        .nest("/celebrities", celebrity_routes())
        .nest("/bookings", booking_routes(state.clone()))
        .nest("/admin", admin_routes(state.clone()))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}

/// Admin surface: login is public with a strict limit, everything else
/// needs a session
fn admin_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/bookings", admin_booking_routes())
        .nest("/celebrities", admin_celebrity_routes())
        .nest("/dashboard", dashboard_routes())
        .merge(account_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let login = auth_routes().route_layer(middleware::from_fn_with_state(
        state,
        rate_limit_auth_middleware,
    ));

    protected.merge(login)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
