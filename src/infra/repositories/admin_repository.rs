//! Admin account repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use super::entities::admin_user::{self, ActiveModel, Entity as AdminUserEntity};
use crate::config::ROLE_ADMIN;
use crate::domain::AdminUser;
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Admin account repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Look up by normalized email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AdminUser>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AdminUser>>;

    /// Create an account; a taken email surfaces as `Conflict`
    async fn create(&self, email: String, password_hash: String) -> AppResult<AdminUser>;

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()>;
}

/// SeaORM-backed admin store
pub struct AdminStore {
    db: DatabaseConnection,
}

impl AdminStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepository for AdminStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AdminUser>> {
        let result = AdminUserEntity::find()
            .filter(admin_user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(AdminUser::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AdminUser>> {
        let result = AdminUserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(AdminUser::from))
    }

    async fn create(&self, email: String, password_hash: String) -> AppResult<AdminUser> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(ROLE_ADMIN.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(|e: DbErr| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Admin"),
                _ => AppError::from(e),
            }
        })?;
        Ok(AdminUser::from(model))
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let admin = AdminUserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Admin")?;

        let mut active: ActiveModel = admin.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.db).await?;
        Ok(())
    }
}
