//! Migration: Create bookings table.
//!
//! `celebrity_id` deliberately has no foreign key: celebrities are hard
//! deleted and their bookings stay behind.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::CelebrityId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::Service).string_len(32).not_null())
                    .col(ColumnDef::new(Bookings::CustomerName).string_len(50).not_null())
                    .col(ColumnDef::new(Bookings::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerPhone).string().null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Bookings::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Bookings::Notes).text().null())
                    .col(
                        ColumnDef::new(Bookings::PaymentStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Bookings::PaymentMethod).string().null())
                    .col(ColumnDef::new(Bookings::TransactionId).string().null())
                    .col(
                        ColumnDef::new(Bookings::Metadata)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        let indexes = [
            ("idx_bookings_celebrity_date", vec![Bookings::CelebrityId, Bookings::Date]),
            ("idx_bookings_customer_email", vec![Bookings::CustomerEmail]),
            ("idx_bookings_status", vec![Bookings::Status]),
            ("idx_bookings_payment_status", vec![Bookings::PaymentStatus]),
            ("idx_bookings_created_at", vec![Bookings::CreatedAt]),
        ];
        for (name, columns) in indexes {
            let mut index = Index::create();
            index.name(name).table(Bookings::Table);
            for column in columns {
                index.col(column);
            }
            manager.create_index(index.to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum Bookings {
    Table,
    Id,
    CelebrityId,
    Service,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    Status,
    Date,
    Amount,
    Notes,
    PaymentStatus,
    PaymentMethod,
    TransactionId,
    Metadata,
    CreatedAt,
    UpdatedAt,
}
