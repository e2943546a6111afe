//! Celebrity database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Celebrity, ServicePrices, SocialLinks, SubscriptionPrices};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "celebrities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub name: String,
    pub profession: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub image_url: String,
    pub cover_image_url: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub tiktok: Option<String>,
    pub youtube: Option<String>,
    pub featured: bool,
    pub bronze: Decimal,
    pub silver: Decimal,
    pub gold: Decimal,
    pub platinum: Decimal,
    pub event: Decimal,
    pub monthly: Decimal,
    pub quarterly: Decimal,
    pub annual: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Celebrity {
    fn from(model: Model) -> Self {
        Celebrity {
            id: model.id,
            slug: model.slug,
            name: model.name,
            profession: model.profession,
            bio: model.bio,
            image_url: model.image_url,
            cover_image_url: model.cover_image_url,
            social_media: SocialLinks {
                instagram: model.instagram,
                twitter: model.twitter,
                tiktok: model.tiktok,
                youtube: model.youtube,
            },
            featured: model.featured,
            prices: ServicePrices {
                bronze: model.bronze,
                silver: model.silver,
                gold: model.gold,
                platinum: model.platinum,
                event: model.event,
            },
            subscription_prices: SubscriptionPrices {
                monthly: model.monthly,
                quarterly: model.quarterly,
                annual: model.annual,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Celebrity> for ActiveModel {
    fn from(c: Celebrity) -> Self {
        use sea_orm::ActiveValue::Set;

        ActiveModel {
            id: Set(c.id),
            slug: Set(c.slug),
            name: Set(c.name),
            profession: Set(c.profession),
            bio: Set(c.bio),
            image_url: Set(c.image_url),
            cover_image_url: Set(c.cover_image_url),
            instagram: Set(c.social_media.instagram),
            twitter: Set(c.social_media.twitter),
            tiktok: Set(c.social_media.tiktok),
            youtube: Set(c.social_media.youtube),
            featured: Set(c.featured),
            bronze: Set(c.prices.bronze),
            silver: Set(c.prices.silver),
            gold: Set(c.prices.gold),
            platinum: Set(c.prices.platinum),
            event: Set(c.prices.event),
            monthly: Set(c.subscription_prices.monthly),
            quarterly: Set(c.subscription_prices.quarterly),
            annual: Set(c.subscription_prices.annual),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
        }
    }
}
