//! Celebrity domain entity, pricing tables and related DTOs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::config::{
    DEFAULT_ANNUAL_PRICE_CENTS, DEFAULT_BRONZE_PRICE, DEFAULT_EVENT_PRICE, DEFAULT_GOLD_PRICE,
    DEFAULT_MONTHLY_PRICE_CENTS, DEFAULT_PLATINUM_PRICE, DEFAULT_QUARTERLY_PRICE_CENTS,
    DEFAULT_SILVER_PRICE,
};
use crate::errors::{AppError, AppResult};

/// VIP fan card tiers, each priced per celebrity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Event,
}

impl CardTier {
    pub const ALL: [CardTier; 5] = [
        CardTier::Bronze,
        CardTier::Silver,
        CardTier::Gold,
        CardTier::Platinum,
        CardTier::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardTier::Bronze => "bronze",
            CardTier::Silver => "silver",
            CardTier::Gold => "gold",
            CardTier::Platinum => "platinum",
            CardTier::Event => "event",
        }
    }
}

impl fmt::Display for CardTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| AppError::validation(format!("{} is not a valid card tier", s)))
    }
}

/// Subscription plans and their billing periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Monthly,
    Quarterly,
    Annual,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "monthly",
            SubscriptionPlan::Quarterly => "quarterly",
            SubscriptionPlan::Annual => "annual",
        }
    }

    /// Length of one billing period in months
    pub fn months(&self) -> u32 {
        match self {
            SubscriptionPlan::Monthly => 1,
            SubscriptionPlan::Quarterly => 3,
            SubscriptionPlan::Annual => 12,
        }
    }

    /// Human-readable billing period, e.g. "3 months"
    pub fn duration_label(&self) -> String {
        match self.months() {
            1 => "1 month".to_string(),
            n => format!("{} months", n),
        }
    }

    /// Parse a plan name, treating anything unrecognized as monthly.
    pub fn from_name_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "quarterly" => SubscriptionPlan::Quarterly,
            "annual" => SubscriptionPlan::Annual,
            _ => SubscriptionPlan::Monthly,
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat VIP card prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServicePrices {
    #[schema(value_type = f64, example = 99)]
    pub bronze: Decimal,
    #[schema(value_type = f64, example = 199)]
    pub silver: Decimal,
    #[schema(value_type = f64, example = 499)]
    pub gold: Decimal,
    #[schema(value_type = f64, example = 999)]
    pub platinum: Decimal,
    #[schema(value_type = f64, example = 299)]
    pub event: Decimal,
}

impl Default for ServicePrices {
    fn default() -> Self {
        Self {
            bronze: Decimal::from(DEFAULT_BRONZE_PRICE),
            silver: Decimal::from(DEFAULT_SILVER_PRICE),
            gold: Decimal::from(DEFAULT_GOLD_PRICE),
            platinum: Decimal::from(DEFAULT_PLATINUM_PRICE),
            event: Decimal::from(DEFAULT_EVENT_PRICE),
        }
    }
}

impl ServicePrices {
    pub fn price_for(&self, tier: CardTier) -> Decimal {
        match tier {
            CardTier::Bronze => self.bronze,
            CardTier::Silver => self.silver,
            CardTier::Gold => self.gold,
            CardTier::Platinum => self.platinum,
            CardTier::Event => self.event,
        }
    }
}

/// Subscription prices per billing period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionPrices {
    #[schema(value_type = f64, example = 9.99)]
    pub monthly: Decimal,
    #[schema(value_type = f64, example = 24.99)]
    pub quarterly: Decimal,
    #[schema(value_type = f64, example = 89.99)]
    pub annual: Decimal,
}

impl Default for SubscriptionPrices {
    fn default() -> Self {
        Self {
            monthly: Decimal::new(DEFAULT_MONTHLY_PRICE_CENTS, 2),
            quarterly: Decimal::new(DEFAULT_QUARTERLY_PRICE_CENTS, 2),
            annual: Decimal::new(DEFAULT_ANNUAL_PRICE_CENTS, 2),
        }
    }
}

impl SubscriptionPrices {
    pub fn price_for(&self, plan: SubscriptionPlan) -> Decimal {
        match plan {
            SubscriptionPlan::Monthly => self.monthly,
            SubscriptionPlan::Quarterly => self.quarterly,
            SubscriptionPlan::Annual => self.annual,
        }
    }
}

/// Social profile links shown on the celebrity page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub tiktok: Option<String>,
    pub youtube: Option<String>,
}

/// Celebrity domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Celebrity {
    pub id: Uuid,
    /// URL-safe unique identifier derived from the name
    #[schema(example = "jane-o-brien")]
    pub slug: String,
    pub name: String,
    pub profession: String,
    pub bio: String,
    pub image_url: String,
    pub cover_image_url: Option<String>,
    pub social_media: SocialLinks,
    pub featured: bool,
    #[serde(flatten)]
    pub prices: ServicePrices,
    #[serde(flatten)]
    pub subscription_prices: SubscriptionPrices,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Celebrity {
    /// Build a new celebrity from validated admin input and a resolved slug.
    pub fn new(input: CreateCelebrity, slug: String, now: DateTime<Utc>) -> AppResult<Self> {
        let defaults = ServicePrices::default();
        let sub_defaults = SubscriptionPrices::default();

        let prices = ServicePrices {
            bronze: input.bronze.unwrap_or(defaults.bronze),
            silver: input.silver.unwrap_or(defaults.silver),
            gold: input.gold.unwrap_or(defaults.gold),
            platinum: input.platinum.unwrap_or(defaults.platinum),
            event: input.event.unwrap_or(defaults.event),
        };
        let subscription_prices = SubscriptionPrices {
            monthly: input.monthly.unwrap_or(sub_defaults.monthly),
            quarterly: input.quarterly.unwrap_or(sub_defaults.quarterly),
            annual: input.annual.unwrap_or(sub_defaults.annual),
        };

        let celebrity = Self {
            id: Uuid::new_v4(),
            slug,
            name: input.name.trim().to_string(),
            profession: input.profession.trim().to_string(),
            bio: input.bio,
            image_url: input.image_url,
            cover_image_url: input.cover_image_url,
            social_media: input.social_media.unwrap_or_default(),
            featured: input.featured.unwrap_or(false),
            prices,
            subscription_prices,
            created_at: now,
            updated_at: now,
        };
        celebrity.ensure_prices_non_negative()?;
        Ok(celebrity)
    }

    /// Apply an admin edit. The slug is handled separately by the caller.
    pub fn apply_update(&mut self, update: UpdateCelebrity, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(profession) = update.profession {
            self.profession = profession.trim().to_string();
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        if let Some(cover) = update.cover_image_url {
            self.cover_image_url = Some(cover);
        }
        if let Some(social) = update.social_media {
            self.social_media = social;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }

        let prices = &mut self.prices;
        prices.bronze = update.bronze.unwrap_or(prices.bronze);
        prices.silver = update.silver.unwrap_or(prices.silver);
        prices.gold = update.gold.unwrap_or(prices.gold);
        prices.platinum = update.platinum.unwrap_or(prices.platinum);
        prices.event = update.event.unwrap_or(prices.event);

        let subs = &mut self.subscription_prices;
        subs.monthly = update.monthly.unwrap_or(subs.monthly);
        subs.quarterly = update.quarterly.unwrap_or(subs.quarterly);
        subs.annual = update.annual.unwrap_or(subs.annual);

        self.updated_at = now;
        self.ensure_prices_non_negative()
    }

    fn ensure_prices_non_negative(&self) -> AppResult<()> {
        let p = &self.prices;
        let s = &self.subscription_prices;
        let all = [
            p.bronze, p.silver, p.gold, p.platinum, p.event, s.monthly, s.quarterly, s.annual,
        ];
        if all.iter().any(|price| price.is_sign_negative() && !price.is_zero()) {
            return Err(AppError::validation("Prices cannot be negative"));
        }
        Ok(())
    }

    /// Name and profession used in customer messages
    pub fn contact(&self) -> CelebrityContact {
        CelebrityContact {
            name: self.name.clone(),
            profession: self.profession.clone(),
        }
    }
}

/// The part of a celebrity embedded next to bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CelebritySummary {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub profession: String,
}

impl From<&Celebrity> for CelebritySummary {
    fn from(c: &Celebrity) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            image_url: c.image_url.clone(),
            profession: c.profession.clone(),
        }
    }
}

/// Celebrity details a customer notification needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelebrityContact {
    pub name: String,
    pub profession: String,
}

/// Names are stored trimmed, so whitespace alone counts as missing.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Celebrity creation data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCelebrity {
    #[validate(custom(function = "not_blank", message = "Celebrity name is required"))]
    #[schema(example = "Jane O'Brien")]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Profession is required"))]
    #[schema(example = "Actor")]
    pub profession: String,
    #[validate(length(min = 1, message = "Celebrity bio is required"))]
    pub bio: String,
    #[validate(length(min = 1, message = "Celebrity image is required"))]
    pub image_url: String,
    pub cover_image_url: Option<String>,
    pub social_media: Option<SocialLinks>,
    pub featured: Option<bool>,
    #[schema(value_type = Option<f64>)]
    pub bronze: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub silver: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub gold: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub platinum: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub event: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub monthly: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub quarterly: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub annual: Option<Decimal>,
}

/// Celebrity update data transfer object (all fields optional)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCelebrity {
    #[validate(custom(function = "not_blank", message = "Celebrity name cannot be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Profession cannot be empty"))]
    pub profession: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub social_media: Option<SocialLinks>,
    pub featured: Option<bool>,
    #[schema(value_type = Option<f64>)]
    pub bronze: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub silver: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub gold: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub platinum: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub event: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub monthly: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub quarterly: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub annual: Option<Decimal>,
}

/// Filters for celebrity listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CelebrityFilter {
    /// Case-insensitive substring of name or profession
    pub search: Option<String>,
    /// Exact profession
    pub profession: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> CreateCelebrity {
        CreateCelebrity {
            name: name.to_string(),
            profession: "Singer".to_string(),
            bio: "Bio".to_string(),
            image_url: "https://img.example.com/a.jpg".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_whitespace_name_is_rejected() {
        let err = input("   ").validate().unwrap_err();
        assert!(err.field_errors().contains_key("name"));

        let update = UpdateCelebrity {
            name: Some(" \t ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(input(" Jane ").validate().is_ok());
    }

    #[test]
    fn test_new_celebrity_uses_default_prices() {
        let celebrity = Celebrity::new(input("Jane"), "jane".into(), Utc::now()).unwrap();

        assert_eq!(celebrity.prices.gold, Decimal::from(499));
        assert_eq!(celebrity.prices.event, Decimal::from(299));
        assert_eq!(celebrity.subscription_prices.monthly, Decimal::new(999, 2));
        assert_eq!(celebrity.subscription_prices.annual, Decimal::new(8999, 2));
        assert!(!celebrity.featured);
    }

    #[test]
    fn test_new_celebrity_keeps_explicit_prices() {
        let mut data = input("Jane");
        data.gold = Some(Decimal::from(750));
        let celebrity = Celebrity::new(data, "jane".into(), Utc::now()).unwrap();

        assert_eq!(celebrity.prices.price_for(CardTier::Gold), Decimal::from(750));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut data = input("Jane");
        data.silver = Some(Decimal::from(-1));
        assert!(matches!(
            Celebrity::new(data, "jane".into(), Utc::now()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_update_changes_only_given_fields() {
        let mut celebrity = Celebrity::new(input("Jane"), "jane".into(), Utc::now()).unwrap();
        let update = UpdateCelebrity {
            bio: Some("New bio".into()),
            annual: Some(Decimal::from(120)),
            ..Default::default()
        };
        celebrity.apply_update(update, Utc::now()).unwrap();

        assert_eq!(celebrity.bio, "New bio");
        assert_eq!(celebrity.name, "Jane");
        assert_eq!(celebrity.subscription_prices.annual, Decimal::from(120));
        assert_eq!(celebrity.subscription_prices.monthly, Decimal::new(999, 2));
    }

    #[test]
    fn test_plan_durations() {
        assert_eq!(SubscriptionPlan::Monthly.duration_label(), "1 month");
        assert_eq!(SubscriptionPlan::Quarterly.duration_label(), "3 months");
        assert_eq!(SubscriptionPlan::Annual.duration_label(), "12 months");
    }

    #[test]
    fn test_unknown_plan_defaults_to_monthly() {
        assert_eq!(
            SubscriptionPlan::from_name_or_default("weekly"),
            SubscriptionPlan::Monthly
        );
        assert_eq!(
            SubscriptionPlan::from_name_or_default("Annual"),
            SubscriptionPlan::Annual
        );
    }

    #[test]
    fn test_card_tier_parse() {
        assert_eq!("gold".parse::<CardTier>().unwrap(), CardTier::Gold);
        assert_eq!(" Platinum ".parse::<CardTier>().unwrap(), CardTier::Platinum);
        assert!("diamond".parse::<CardTier>().is_err());
    }

    #[test]
    fn test_celebrity_json_flattens_prices() {
        let celebrity = Celebrity::new(input("Jane"), "jane".into(), Utc::now()).unwrap();
        let json = serde_json::to_value(&celebrity).unwrap();

        assert_eq!(json["gold"], serde_json::json!(499.0));
        assert_eq!(json["imageUrl"], "https://img.example.com/a.jpg");
        assert!(json.get("prices").is_none());
    }
}
