//! Booking database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;

use crate::domain::{Booking, BookingMetadata, BookingStatRow, MetadataMap};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Not a foreign key: celebrities may be deleted under their bookings
    pub celebrity_id: Uuid,
    pub service: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub status: String,
    pub date: DateTimeUtc,
    pub amount: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub metadata: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Projection used by the reporting queries
#[derive(Debug, FromQueryResult)]
pub struct StatRow {
    pub status: String,
    pub service: String,
    pub amount: Decimal,
    pub created_at: DateTimeUtc,
}

impl TryFrom<StatRow> for BookingStatRow {
    type Error = AppError;

    fn try_from(row: StatRow) -> Result<Self, Self::Error> {
        Ok(BookingStatRow {
            status: row.status.parse().map_err(corrupt("status"))?,
            service: row.service.parse().map_err(corrupt("service"))?,
            amount: row.amount,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<Model> for Booking {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let service = model.service.parse().map_err(corrupt("service"))?;
        let map: MetadataMap = serde_json::from_value(model.metadata).unwrap_or_else(|e| {
            tracing::warn!(booking_id = %model.id, "Unreadable booking metadata: {}", e);
            MetadataMap::new()
        });

        Ok(Booking {
            id: model.id,
            celebrity_id: model.celebrity_id,
            service,
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            customer_phone: model.customer_phone,
            status: model.status.parse().map_err(corrupt("status"))?,
            date: model.date,
            amount: model.amount,
            notes: model.notes,
            payment_status: model
                .payment_status
                .parse()
                .map_err(corrupt("payment_status"))?,
            payment_method: model.payment_method,
            transaction_id: model.transaction_id,
            metadata: BookingMetadata::from_map(service, map),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<Booking> for ActiveModel {
    fn from(b: Booking) -> Self {
        use sea_orm::ActiveValue::Set;

        let metadata = serde_json::to_value(b.metadata.to_map()).unwrap_or_default();
        ActiveModel {
            id: Set(b.id),
            celebrity_id: Set(b.celebrity_id),
            service: Set(b.service.to_string()),
            customer_name: Set(b.customer_name),
            customer_email: Set(b.customer_email),
            customer_phone: Set(b.customer_phone),
            status: Set(b.status.to_string()),
            date: Set(b.date),
            amount: Set(b.amount),
            notes: Set(b.notes),
            payment_status: Set(b.payment_status.to_string()),
            payment_method: Set(b.payment_method),
            transaction_id: Set(b.transaction_id),
            metadata: Set(metadata),
            created_at: Set(b.created_at),
            updated_at: Set(b.updated_at),
        }
    }
}

fn corrupt(column: &'static str) -> impl Fn(AppError) -> AppError {
    move |e| AppError::internal(format!("Corrupt booking {}: {}", column, e))
}
