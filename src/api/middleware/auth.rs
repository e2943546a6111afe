//! Admin session middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::ROLE_ADMIN;
use crate::errors::AppError;

/// Authenticated admin extracted from the session token
#[derive(Clone, Debug)]
pub struct CurrentAdmin {
    pub id: Uuid,
    pub email: String,
}

/// Require a valid admin bearer token.
///
/// Injects [`CurrentAdmin`] into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::Unauthorized)?;
    let claims = state.auth_service.verify_token(bearer.token())?;

    if claims.role != ROLE_ADMIN {
        tracing::warn!(subject = %claims.sub, role = %claims.role, "Token without admin role");
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(CurrentAdmin {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
