//! Liveness and dependency health.

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::Json};
use futures::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(value_type = String, example = "healthy")]
    pub status: &'static str,
    /// Per-dependency status keyed by probe name
    #[schema(value_type = Object)]
    pub services: BTreeMap<&'static str, ServiceStatus>,
}

/// Service status
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    #[schema(value_type = String)]
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check over every registered dependency
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "All dependencies reachable", body = HealthResponse),
        (status = 503, description = "At least one dependency is down", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let results = join_all(state.probes.iter().map(|probe| async move {
        (probe.name(), probe.check().await)
    }))
    .await;

    let mut all_healthy = true;
    let services = results
        .into_iter()
        .map(|(name, result)| {
            let status = match result {
                Ok(()) => ServiceStatus {
                    status: "healthy",
                    error: None,
                },
                Err(e) => {
                    all_healthy = false;
                    tracing::warn!(service = name, error = %e, "Health probe failed");
                    ServiceStatus {
                        status: "unhealthy",
                        error: Some(e.to_string()),
                    }
                }
            };
            (name, status)
        })
        .collect();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services,
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

/// Root endpoint
pub async fn root() -> &'static str {
    "Celebrity Booking API"
}
