use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::DashboardStats;
use crate::errors::AppResult;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/stats", get(dashboard_stats))
}

/// Headline counts for the admin dashboard
#[utoipa::path(
    get,
    path = "/admin/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard aggregates", body = DashboardStats),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.report_service.dashboard().await?))
}
