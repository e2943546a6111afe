//! Admin catalog management handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use super::celebrity_handler::CelebrityQuery;
use crate::api::extractors::{parse_id, QueryParams, ValidatedJson};
use crate::api::AppState;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::domain::{Celebrity, CreateCelebrity, UpdateCelebrity};
use crate::errors::AppResult;
use crate::services::CelebrityPage;
use crate::types::{Created, MessageResponse};

/// Create admin catalog routes
pub fn admin_celebrity_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_celebrities).post(create_celebrity))
        .route(
            "/:id",
            get(get_celebrity)
                .put(update_celebrity)
                .delete(delete_celebrity),
        )
}

/// List celebrities for management
#[utoipa::path(
    get,
    path = "/admin/celebrities",
    tag = "Admin Celebrities",
    params(CelebrityQuery),
    responses(
        (status = 200, description = "One page of celebrities", body = CelebrityPage),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_celebrities(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CelebrityQuery>,
) -> AppResult<Json<CelebrityPage>> {
    let (filter, pagination) = query.split();
    let page = pagination.resolve(DEFAULT_PAGE_SIZE)?;
    Ok(Json(state.catalog_service.list(filter, page).await?))
}

/// Create a celebrity
#[utoipa::path(
    post,
    path = "/admin/celebrities",
    tag = "Admin Celebrities",
    request_body = CreateCelebrity,
    responses(
        (status = 201, description = "Celebrity created", body = Celebrity),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "No free slug for this name")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_celebrity(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCelebrity>,
) -> AppResult<Created<Celebrity>> {
    let celebrity = state.catalog_service.create(payload).await?;
    Ok(Created(celebrity))
}

/// Get a celebrity
#[utoipa::path(
    get,
    path = "/admin/celebrities/{id}",
    tag = "Admin Celebrities",
    params(("id" = String, Path, description = "Celebrity ID")),
    responses(
        (status = 200, description = "Celebrity found", body = Celebrity),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Celebrity not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_celebrity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Celebrity>> {
    let id = parse_id(&id, "celebrity")?;
    Ok(Json(state.catalog_service.get(id).await?))
}

/// Update a celebrity
///
/// Renaming re-derives the slug.
#[utoipa::path(
    put,
    path = "/admin/celebrities/{id}",
    tag = "Admin Celebrities",
    params(("id" = String, Path, description = "Celebrity ID")),
    request_body = UpdateCelebrity,
    responses(
        (status = 200, description = "Celebrity updated", body = Celebrity),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Celebrity not found"),
        (status = 409, description = "No free slug for this name")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_celebrity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCelebrity>,
) -> AppResult<Json<Celebrity>> {
    let id = parse_id(&id, "celebrity")?;
    Ok(Json(state.catalog_service.update(id, payload).await?))
}

/// Delete a celebrity
#[utoipa::path(
    delete,
    path = "/admin/celebrities/{id}",
    tag = "Admin Celebrities",
    params(("id" = String, Path, description = "Celebrity ID")),
    responses(
        (status = 200, description = "Celebrity deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Celebrity not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_celebrity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, "celebrity")?;
    state.catalog_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Celebrity deleted successfully")))
}
