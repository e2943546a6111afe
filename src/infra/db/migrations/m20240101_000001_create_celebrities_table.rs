//! Migration: Create celebrities table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Celebrities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Celebrities::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Celebrities::Slug).string().not_null())
                    .col(ColumnDef::new(Celebrities::Name).string().not_null())
                    .col(ColumnDef::new(Celebrities::Profession).string().not_null())
                    .col(ColumnDef::new(Celebrities::Bio).text().not_null())
                    .col(ColumnDef::new(Celebrities::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Celebrities::CoverImageUrl).string().null())
                    .col(ColumnDef::new(Celebrities::Instagram).string().null())
                    .col(ColumnDef::new(Celebrities::Twitter).string().null())
                    .col(ColumnDef::new(Celebrities::Tiktok).string().null())
                    .col(ColumnDef::new(Celebrities::Youtube).string().null())
                    .col(
                        ColumnDef::new(Celebrities::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(price(Celebrities::Bronze))
                    .col(price(Celebrities::Silver))
                    .col(price(Celebrities::Gold))
                    .col(price(Celebrities::Platinum))
                    .col(price(Celebrities::Event))
                    .col(price(Celebrities::Monthly))
                    .col(price(Celebrities::Quarterly))
                    .col(price(Celebrities::Annual))
                    .col(
                        ColumnDef::new(Celebrities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Celebrities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Source of truth for slug uniqueness
        manager
            .create_index(
                Index::create()
                    .name("idx_celebrities_slug")
                    .table(Celebrities::Table)
                    .col(Celebrities::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_celebrities_featured_created_at")
                    .table(Celebrities::Table)
                    .col(Celebrities::Featured)
                    .col(Celebrities::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Celebrities::Table).to_owned())
            .await
    }
}

fn price(column: Celebrities) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(10, 2)
        .not_null()
        .to_owned()
}

#[derive(Iden, Clone, Copy)]
enum Celebrities {
    Table,
    Id,
    Slug,
    Name,
    Profession,
    Bio,
    ImageUrl,
    CoverImageUrl,
    Instagram,
    Twitter,
    Tiktok,
    Youtube,
    Featured,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Event,
    Monthly,
    Quarterly,
    Annual,
    CreatedAt,
    UpdatedAt,
}
