//! Public catalog handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{parse_id, QueryParams};
use crate::api::AppState;
use crate::config::DEFAULT_CATALOG_PAGE_SIZE;
use crate::domain::{Celebrity, CelebrityFilter};
use crate::errors::AppResult;
use crate::services::CelebrityPage;
use crate::types::PaginationParams;

/// Catalog query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CelebrityQuery {
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size, capped at 100
    pub limit: Option<i64>,
    /// Case-insensitive substring of name or profession
    pub search: Option<String>,
    /// Exact profession
    pub profession: Option<String>,
}

impl CelebrityQuery {
    pub(crate) fn split(self) -> (CelebrityFilter, PaginationParams) {
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        (
            CelebrityFilter {
                search: non_empty(self.search),
                profession: non_empty(self.profession),
            },
            PaginationParams {
                page: self.page,
                limit: self.limit,
            },
        )
    }
}

/// Create public catalog routes
pub fn celebrity_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_celebrities))
        .route("/featured", get(featured_celebrities))
        .route("/slug/:slug", get(get_celebrity_by_slug))
        .route("/:id", get(get_celebrity))
}

/// List celebrities
#[utoipa::path(
    get,
    path = "/celebrities",
    tag = "Celebrities",
    params(CelebrityQuery),
    responses(
        (status = 200, description = "One page of celebrities plus all professions", body = CelebrityPage),
        (status = 400, description = "Invalid pagination")
    )
)]
pub async fn list_celebrities(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CelebrityQuery>,
) -> AppResult<Json<CelebrityPage>> {
    let (filter, pagination) = query.split();
    let page = pagination.resolve(DEFAULT_CATALOG_PAGE_SIZE)?;
    Ok(Json(state.catalog_service.list(filter, page).await?))
}

/// Featured celebrities
#[utoipa::path(
    get,
    path = "/celebrities/featured",
    tag = "Celebrities",
    responses(
        (status = 200, description = "Up to four featured celebrities", body = [Celebrity])
    )
)]
pub async fn featured_celebrities(State(state): State<AppState>) -> AppResult<Json<Vec<Celebrity>>> {
    Ok(Json(state.catalog_service.featured().await?))
}

/// Get celebrity by ID
#[utoipa::path(
    get,
    path = "/celebrities/{id}",
    tag = "Celebrities",
    params(("id" = String, Path, description = "Celebrity ID")),
    responses(
        (status = 200, description = "Celebrity found", body = Celebrity),
        (status = 400, description = "Invalid celebrity ID format"),
        (status = 404, description = "Celebrity not found")
    )
)]
pub async fn get_celebrity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Celebrity>> {
    let id = parse_id(&id, "celebrity")?;
    Ok(Json(state.catalog_service.get(id).await?))
}

/// Get celebrity by slug
#[utoipa::path(
    get,
    path = "/celebrities/slug/{slug}",
    tag = "Celebrities",
    params(("slug" = String, Path, description = "Celebrity slug")),
    responses(
        (status = 200, description = "Celebrity found", body = Celebrity),
        (status = 404, description = "Celebrity not found")
    )
)]
pub async fn get_celebrity_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Celebrity>> {
    Ok(Json(state.catalog_service.get_by_slug(&slug).await?))
}
