//! Service-specific booking metadata.
//!
//! Stored as a flat string map (a JSON object column). Inside the crate the
//! known keys for a booking's service are lifted into [`ServiceDetails`];
//! every other key rides along untouched in `extra`.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::booking::ServiceKind;
use super::celebrity::{CardTier, SubscriptionPlan};

pub const KEY_CARD_TYPE: &str = "cardType";
pub const KEY_DONATION_AMOUNT: &str = "donationAmount";
pub const KEY_SUBSCRIPTION_PLAN: &str = "subscriptionPlan";
pub const KEY_SUBSCRIPTION_DURATION: &str = "subscriptionDuration";
pub const KEY_RENEWAL_DATE: &str = "renewalDate";
pub const KEY_IS_ACTIVE: &str = "isActive";

/// Flat metadata as it travels over the wire and into storage
pub type MetadataMap = BTreeMap<String, String>;

/// Subscription terms fixed at creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTerms {
    pub plan: SubscriptionPlan,
    pub duration: String,
    pub renewal_date: DateTime<Utc>,
    pub is_active: bool,
}

/// Typed view of the keys a service defines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceDetails {
    VipFanCards { card_tier: CardTier },
    Donation { donation_amount: Decimal },
    Subscription(SubscriptionTerms),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingMetadata {
    /// `None` for meet-and-greet, or when stored keys could not be read back
    pub details: Option<ServiceDetails>,
    pub extra: MetadataMap,
}

impl BookingMetadata {
    pub fn new(details: Option<ServiceDetails>, extra: MetadataMap) -> Self {
        let mut extra = extra;
        if let Some(details) = &details {
            for key in details.keys() {
                extra.remove(*key);
            }
        }
        Self { details, extra }
    }

    /// Flatten into the stored representation.
    pub fn to_map(&self) -> MetadataMap {
        let mut map = self.extra.clone();
        match &self.details {
            Some(ServiceDetails::VipFanCards { card_tier }) => {
                map.insert(KEY_CARD_TYPE.into(), card_tier.to_string());
            }
            Some(ServiceDetails::Donation { donation_amount }) => {
                map.insert(KEY_DONATION_AMOUNT.into(), donation_amount.normalize().to_string());
            }
            Some(ServiceDetails::Subscription(terms)) => {
                map.insert(KEY_SUBSCRIPTION_PLAN.into(), terms.plan.to_string());
                map.insert(KEY_SUBSCRIPTION_DURATION.into(), terms.duration.clone());
                map.insert(
                    KEY_RENEWAL_DATE.into(),
                    terms
                        .renewal_date
                        .to_rfc3339_opts(SecondsFormat::Millis, true),
                );
                map.insert(KEY_IS_ACTIVE.into(), terms.is_active.to_string());
            }
            None => {}
        }
        map
    }

    /// Read the stored map back for a booking of the given service.
    ///
    /// Never fails: keys that do not parse stay in `extra` verbatim.
    pub fn from_map(service: ServiceKind, map: MetadataMap) -> Self {
        let details = match service {
            ServiceKind::MeetAndGreet => None,
            ServiceKind::VipFanCards => map
                .get(KEY_CARD_TYPE)
                .and_then(|v| v.parse::<CardTier>().ok())
                .map(|card_tier| ServiceDetails::VipFanCards { card_tier }),
            ServiceKind::Donation => map
                .get(KEY_DONATION_AMOUNT)
                .and_then(|v| v.parse::<Decimal>().ok())
                .map(|donation_amount| ServiceDetails::Donation { donation_amount }),
            ServiceKind::Subscription => read_subscription(&map).map(ServiceDetails::Subscription),
        };
        Self::new(details, map)
    }
}

impl ServiceDetails {
    fn keys(&self) -> &'static [&'static str] {
        match self {
            ServiceDetails::VipFanCards { .. } => &[KEY_CARD_TYPE],
            ServiceDetails::Donation { .. } => &[KEY_DONATION_AMOUNT],
            ServiceDetails::Subscription(_) => &[
                KEY_SUBSCRIPTION_PLAN,
                KEY_SUBSCRIPTION_DURATION,
                KEY_RENEWAL_DATE,
                KEY_IS_ACTIVE,
            ],
        }
    }
}

fn read_subscription(map: &MetadataMap) -> Option<SubscriptionTerms> {
    let plan = SubscriptionPlan::from_name_or_default(map.get(KEY_SUBSCRIPTION_PLAN)?);
    let renewal_date = DateTime::parse_from_rfc3339(map.get(KEY_RENEWAL_DATE)?)
        .ok()?
        .with_timezone(&Utc);
    Some(SubscriptionTerms {
        plan,
        duration: map
            .get(KEY_SUBSCRIPTION_DURATION)
            .cloned()
            .unwrap_or_else(|| plan.duration_label()),
        renewal_date,
        is_active: map.get(KEY_IS_ACTIVE).map(|v| v == "true").unwrap_or(true),
    })
}

impl Serialize for BookingMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

/// Turn caller-supplied metadata into a flat map.
///
/// Accepts an object or a JSON-encoded string of one. Anything unreadable
/// becomes an empty map. Non-string values are stringified.
pub fn metadata_from_value(value: Option<serde_json::Value>) -> MetadataMap {
    let object = match value {
        Some(serde_json::Value::Object(object)) => object,
        Some(serde_json::Value::String(raw)) => {
            match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(serde_json::Value::Object(object)) => object,
                _ => {
                    tracing::debug!("Ignoring unparseable booking metadata string");
                    return MetadataMap::new();
                }
            }
        }
        _ => return MetadataMap::new(),
    };

    object
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => return None,
                other => other.to_string(),
            };
            Some((key, text))
        })
        .collect()
}
