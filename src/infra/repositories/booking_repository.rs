//! Booking repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use super::celebrity_repository::contains_pattern;
use super::entities::booking::{self, ActiveModel, Entity as BookingEntity, StatRow};
use crate::domain::{Booking, BookingFilter, BookingStatRow};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Booking repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    async fn create(&self, booking: Booking) -> AppResult<Booking>;

    /// Persist every field of an existing booking
    async fn save(&self, booking: Booking) -> AppResult<Booking>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Filtered page, newest first, with the total match count
    async fn list(&self, filter: &BookingFilter, page: PageRequest)
        -> AppResult<(Vec<Booking>, u64)>;

    /// Reporting columns of every booking matching the filter
    async fn stat_rows(&self, filter: &BookingFilter) -> AppResult<Vec<BookingStatRow>>;

    /// Reporting columns of bookings created at or after `since`
    async fn created_since(&self, since: DateTime<Utc>) -> AppResult<Vec<BookingStatRow>>;

    async fn recent(&self, limit: u64) -> AppResult<Vec<Booking>>;

    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM-backed booking store
pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn stat_query(&self, query: Select<BookingEntity>) -> AppResult<Vec<BookingStatRow>> {
        let rows = query
            .select_only()
            .column(booking::Column::Status)
            .column(booking::Column::Service)
            .column(booking::Column::Amount)
            .column(booking::Column::CreatedAt)
            .into_model::<StatRow>()
            .all(&self.db)
            .await?;

        rows.into_iter().map(BookingStatRow::try_from).collect()
    }
}

fn filter_condition(filter: &BookingFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(booking::Column::CustomerName).ilike(pattern.clone()))
                .add(Expr::col(booking::Column::CustomerEmail).ilike(pattern.clone()))
                .add(Expr::col(booking::Column::CustomerPhone).ilike(pattern)),
        );
    }
    if let Some(status) = filter.status {
        condition = condition.add(booking::Column::Status.eq(status.as_str()));
    }
    if let Some(service) = filter.service {
        condition = condition.add(booking::Column::Service.eq(service.as_str()));
    }
    if let Some(start) = filter.start_date {
        condition = condition.add(booking::Column::Date.gte(start));
    }
    if let Some(end) = filter.end_date {
        condition = condition.add(booking::Column::Date.lte(end));
    }

    condition
}

fn to_domain(models: Vec<booking::Model>) -> AppResult<Vec<Booking>> {
    models.into_iter().map(Booking::try_from).collect()
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        BookingEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn create(&self, booking: Booking) -> AppResult<Booking> {
        let model = ActiveModel::from(booking).insert(&self.db).await?;
        Booking::try_from(model)
    }

    async fn save(&self, booking: Booking) -> AppResult<Booking> {
        let model = ActiveModel::from(booking)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::NotFound("Booking"),
                other => AppError::from(other),
            })?;
        Booking::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = BookingEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Booking"));
        }

        Ok(())
    }

    async fn list(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<Booking>, u64)> {
        let query = BookingEntity::find().filter(filter_condition(filter));
        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_desc(booking::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await?;

        Ok((to_domain(models)?, total))
    }

    async fn stat_rows(&self, filter: &BookingFilter) -> AppResult<Vec<BookingStatRow>> {
        self.stat_query(BookingEntity::find().filter(filter_condition(filter)))
            .await
    }

    async fn created_since(&self, since: DateTime<Utc>) -> AppResult<Vec<BookingStatRow>> {
        self.stat_query(BookingEntity::find().filter(booking::Column::CreatedAt.gte(since)))
            .await
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<Booking>> {
        let models = BookingEntity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        to_domain(models)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(BookingEntity::find().count(&self.db).await?)
    }
}
