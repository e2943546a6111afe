//! Admin account database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::AdminUser;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AdminUser {
    fn from(model: Model) -> Self {
        AdminUser {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            role: model.role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
