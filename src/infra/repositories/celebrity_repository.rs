//! Celebrity repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use super::entities::celebrity::{self, ActiveModel, Entity as CelebrityEntity};
use crate::domain::{Celebrity, CelebrityFilter};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Celebrity repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CelebrityRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Celebrity>>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Celebrity>>;

    /// Fetch several celebrities at once; missing ids are skipped
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Celebrity>>;

    /// Whether another celebrity already holds `slug`
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<bool>;

    /// Filtered page, newest first, with the total match count
    async fn list(
        &self,
        filter: &CelebrityFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<Celebrity>, u64)>;

    /// Distinct professions, alphabetical
    async fn professions(&self) -> AppResult<Vec<String>>;

    /// Featured celebrities, newest first
    async fn featured(&self, limit: u64) -> AppResult<Vec<Celebrity>>;

    async fn recent(&self, limit: u64) -> AppResult<Vec<Celebrity>>;

    async fn count(&self) -> AppResult<u64>;

    /// Insert; a taken slug surfaces as `Conflict`
    async fn create(&self, celebrity: Celebrity) -> AppResult<Celebrity>;

    /// Overwrite every column; a taken slug surfaces as `Conflict`
    async fn update(&self, celebrity: Celebrity) -> AppResult<Celebrity>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed celebrity store
pub struct CelebrityStore {
    db: DatabaseConnection,
}

impl CelebrityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CelebrityRepository for CelebrityStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Celebrity>> {
        let result = CelebrityEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Celebrity::from))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Celebrity>> {
        let result = CelebrityEntity::find()
            .filter(celebrity::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(result.map(Celebrity::from))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Celebrity>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = CelebrityEntity::find()
            .filter(celebrity::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Celebrity::from).collect())
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let mut query = CelebrityEntity::find().filter(celebrity::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(celebrity::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn list(
        &self,
        filter: &CelebrityFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<Celebrity>, u64)> {
        let mut condition = Condition::all();
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = contains_pattern(search);
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(celebrity::Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(celebrity::Column::Profession).ilike(pattern)),
            );
        }
        if let Some(profession) = filter.profession.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(celebrity::Column::Profession.eq(profession));
        }

        let query = CelebrityEntity::find().filter(condition);
        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_desc(celebrity::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(Celebrity::from).collect(), total))
    }

    async fn professions(&self) -> AppResult<Vec<String>> {
        let professions = CelebrityEntity::find()
            .select_only()
            .column(celebrity::Column::Profession)
            .distinct()
            .order_by_asc(celebrity::Column::Profession)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;
        Ok(professions)
    }

    async fn featured(&self, limit: u64) -> AppResult<Vec<Celebrity>> {
        let models = CelebrityEntity::find()
            .filter(celebrity::Column::Featured.eq(true))
            .order_by_desc(celebrity::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Celebrity::from).collect())
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<Celebrity>> {
        let models = CelebrityEntity::find()
            .order_by_desc(celebrity::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Celebrity::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(CelebrityEntity::find().count(&self.db).await?)
    }

    async fn create(&self, celebrity: Celebrity) -> AppResult<Celebrity> {
        let model = ActiveModel::from(celebrity)
            .insert(&self.db)
            .await
            .map_err(write_error)?;
        Ok(Celebrity::from(model))
    }

    async fn update(&self, celebrity: Celebrity) -> AppResult<Celebrity> {
        let model = ActiveModel::from(celebrity)
            .update(&self.db)
            .await
            .map_err(write_error)?;
        Ok(Celebrity::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = CelebrityEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Celebrity"));
        }

        Ok(())
    }
}

fn write_error(e: DbErr) -> AppError {
    if let DbErr::RecordNotUpdated = e {
        return AppError::NotFound("Celebrity");
    }
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Celebrity slug conflict: {}", detail);
            AppError::conflict("Celebrity slug")
        }
        _ => AppError::from(e),
    }
}

/// `%term%` with LIKE wildcards in the term escaped
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
