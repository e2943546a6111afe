//! Authentication service - admin sessions and credentials.
//!
//! Password hashing lives in the domain `Password` value object; this
//! service only decides who gets a token.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{normalize_email, AdminUser, Password};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a session token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Create another admin account
    async fn register(&self, email: String, password: String) -> AppResult<AdminUser>;

    /// Replace the caller's password after re-checking the current one
    async fn change_password(
        &self,
        admin_id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(admin: &AdminUser, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: admin.id,
        email: admin.email.clone(),
        role: admin.role.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let email = normalize_email(&email);
        let Some(admin) = self.uow.admins().find_by_email(&email).await? else {
            // Same hashing cost as a real check so unknown emails are not
            // distinguishable by timing.
            Password::verify_dummy(&password);
            tracing::debug!("Login attempt for unknown admin");
            return Err(AppError::InvalidCredentials);
        };

        if !admin.password().verify(&password) {
            tracing::debug!(admin_id = %admin.id, "Login attempt with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(admin_id = %admin.id, "Admin logged in");
        generate_token(&admin, &self.config)
    }

    async fn register(&self, email: String, password: String) -> AppResult<AdminUser> {
        let email = normalize_email(&email);
        if self.uow.admins().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Admin"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let admin = self.uow.admins().create(email, password_hash).await?;
        tracing::info!(admin_id = %admin.id, "Admin registered");
        Ok(admin)
    }

    async fn change_password(
        &self,
        admin_id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let admin = self
            .uow
            .admins()
            .find_by_id(admin_id)
            .await?
            .ok_or_not_found("Admin")?;

        if !admin.password().verify(&current_password) {
            return Err(AppError::bad_request("Current password is incorrect"));
        }

        let password_hash = Password::new(&new_password)?.into_string();
        self.uow
            .admins()
            .update_password(admin_id, password_hash)
            .await?;
        tracing::info!(admin_id = %admin_id, "Admin password changed");
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
