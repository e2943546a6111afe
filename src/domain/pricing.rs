//! Amount and metadata derivation for new bookings.
//!
//! The client never sets the amount on priced paths: VIP cards and
//! subscriptions read the celebrity's price table, donations take the
//! donated amount and meet-and-greet takes the declared budget.

use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;

use super::booking::{BookingStatus, CreateBookingRequest, PaymentStatus, ServiceKind};
use super::celebrity::{CardTier, Celebrity, SubscriptionPlan};
use super::metadata::{
    BookingMetadata, MetadataMap, ServiceDetails, SubscriptionTerms, KEY_CARD_TYPE,
    KEY_DONATION_AMOUNT, KEY_SUBSCRIPTION_PLAN,
};
use crate::config::MIN_MEET_AND_GREET_BUDGET;
use crate::errors::{AppError, AppResult};

/// Outcome of pricing a booking request
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub amount: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub metadata: BookingMetadata,
}

/// Price a request against the celebrity's tables.
///
/// `metadata` is the caller's flattened metadata; `now` is the creation
/// instant used for subscription renewal.
pub fn quote(
    celebrity: &Celebrity,
    service: ServiceKind,
    request: &CreateBookingRequest,
    metadata: MetadataMap,
    now: DateTime<Utc>,
) -> AppResult<Quote> {
    match service {
        ServiceKind::VipFanCards => {
            let raw = request
                .card_type
                .clone()
                .or_else(|| metadata.get(KEY_CARD_TYPE).cloned())
                .filter(|tier| !tier.trim().is_empty())
                .ok_or_else(|| AppError::validation("Card type is required"))?;
            let card_tier: CardTier = raw.parse()?;

            Ok(pending(
                celebrity.prices.price_for(card_tier),
                BookingMetadata::new(Some(ServiceDetails::VipFanCards { card_tier }), metadata),
            ))
        }
        ServiceKind::Donation => {
            let donation_amount = match request.donation_amount {
                Some(amount) => amount,
                None => metadata
                    .get(KEY_DONATION_AMOUNT)
                    .and_then(|v| v.trim().parse::<Decimal>().ok())
                    .ok_or_else(|| AppError::validation("Donation amount is required"))?,
            };

            Ok(pending(
                donation_amount,
                BookingMetadata::new(
                    Some(ServiceDetails::Donation { donation_amount }),
                    metadata,
                ),
            ))
        }
        ServiceKind::Subscription => {
            let plan = request
                .subscription_plan
                .as_deref()
                .or_else(|| metadata.get(KEY_SUBSCRIPTION_PLAN).map(String::as_str))
                .map(SubscriptionPlan::from_name_or_default)
                .unwrap_or_default();
            let renewal_date = now
                .checked_add_months(Months::new(plan.months()))
                .ok_or_else(|| AppError::internal("Subscription renewal date out of range"))?;

            let terms = SubscriptionTerms {
                plan,
                duration: plan.duration_label(),
                renewal_date,
                is_active: true,
            };

            Ok(Quote {
                amount: celebrity.subscription_prices.price_for(plan),
                status: BookingStatus::Approved,
                payment_status: PaymentStatus::Paid,
                metadata: BookingMetadata::new(Some(ServiceDetails::Subscription(terms)), metadata),
            })
        }
        ServiceKind::MeetAndGreet => {
            let budget = request
                .budget
                .or(request.amount)
                .ok_or_else(|| AppError::validation("Budget is required"))?;
            if budget < Decimal::from(MIN_MEET_AND_GREET_BUDGET) {
                return Err(AppError::validation(format!(
                    "Minimum budget is ${}",
                    MIN_MEET_AND_GREET_BUDGET
                )));
            }

            Ok(pending(budget, BookingMetadata::new(None, metadata)))
        }
    }
}

fn pending(amount: Decimal, metadata: BookingMetadata) -> Quote {
    Quote {
        amount,
        status: BookingStatus::Pending,
        payment_status: PaymentStatus::Pending,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::celebrity::CreateCelebrity;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn celebrity() -> Celebrity {
        let input = CreateCelebrity {
            name: "Jane".into(),
            profession: "Singer".into(),
            bio: "Bio".into(),
            image_url: "https://img.example.com/jane.jpg".into(),
            gold: Some(Decimal::from(650)),
            ..Default::default()
        };
        Celebrity::new(input, "jane".into(), Utc::now()).unwrap()
    }

    fn request(service: ServiceKind) -> CreateBookingRequest {
        CreateBookingRequest {
            celebrity_id: Uuid::new_v4(),
            service: Some(service),
            ..Default::default()
        }
    }

    #[test]
    fn test_vip_gold_uses_celebrity_price() {
        let mut req = request(ServiceKind::VipFanCards);
        req.card_type = Some("gold".into());
        req.amount = Some(Decimal::from(1));

        let quote = quote(&celebrity(), ServiceKind::VipFanCards, &req, MetadataMap::new(), Utc::now())
            .unwrap();

        assert_eq!(quote.amount, Decimal::from(650));
        assert_eq!(quote.status, BookingStatus::Pending);
        assert_eq!(quote.metadata.to_map()["cardType"], "gold");
    }

    #[test]
    fn test_vip_tier_from_metadata() {
        let req = request(ServiceKind::VipFanCards);
        let mut metadata = MetadataMap::new();
        metadata.insert("cardType".into(), "event".into());

        let quote = quote(&celebrity(), ServiceKind::VipFanCards, &req, metadata, Utc::now()).unwrap();
        assert_eq!(quote.amount, Decimal::from(299));
    }

    #[test]
    fn test_vip_without_tier_fails() {
        let req = request(ServiceKind::VipFanCards);
        let err = quote(&celebrity(), ServiceKind::VipFanCards, &req, MetadataMap::new(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_donation_amount_is_taken_verbatim() {
        let mut req = request(ServiceKind::Donation);
        req.donation_amount = Some(Decimal::from(250));

        let quote = quote(&celebrity(), ServiceKind::Donation, &req, MetadataMap::new(), Utc::now())
            .unwrap();
        assert_eq!(quote.amount, Decimal::from(250));
        assert_eq!(quote.status, BookingStatus::Pending);
        assert_eq!(quote.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_donation_requires_amount() {
        let req = request(ServiceKind::Donation);
        assert!(quote(&celebrity(), ServiceKind::Donation, &req, MetadataMap::new(), Utc::now()).is_err());
    }

    #[test]
    fn test_subscription_activates_and_sets_renewal() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let mut req = request(ServiceKind::Subscription);
        req.subscription_plan = Some("quarterly".into());

        let quote = quote(&celebrity(), ServiceKind::Subscription, &req, MetadataMap::new(), now).unwrap();
        let map = quote.metadata.to_map();

        assert_eq!(quote.status, BookingStatus::Approved);
        assert_eq!(quote.payment_status, PaymentStatus::Paid);
        assert_eq!(quote.amount, Decimal::new(2499, 2));
        assert_eq!(map["subscriptionPlan"], "quarterly");
        assert_eq!(map["subscriptionDuration"], "3 months");
        assert_eq!(map["renewalDate"], "2025-04-15T09:30:00.000Z");
        assert_eq!(map["isActive"], "true");
    }

    #[test]
    fn test_subscription_defaults_to_monthly() {
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap();
        let req = request(ServiceKind::Subscription);

        let quote = quote(&celebrity(), ServiceKind::Subscription, &req, MetadataMap::new(), now).unwrap();
        let map = quote.metadata.to_map();

        assert_eq!(quote.amount, Decimal::new(999, 2));
        assert_eq!(map["subscriptionDuration"], "1 month");
        // Month end clamps instead of rolling into March
        assert_eq!(map["renewalDate"], "2025-02-28T00:00:00.000Z");
    }

    #[test]
    fn test_meet_and_greet_minimum_budget() {
        let mut req = request(ServiceKind::MeetAndGreet);
        req.budget = Some(Decimal::from(99));
        assert!(quote(&celebrity(), ServiceKind::MeetAndGreet, &req, MetadataMap::new(), Utc::now()).is_err());

        req.budget = Some(Decimal::from(100));
        let quote = quote(&celebrity(), ServiceKind::MeetAndGreet, &req, MetadataMap::new(), Utc::now())
            .unwrap();
        assert_eq!(quote.amount, Decimal::from(100));
    }

    #[test]
    fn test_meet_and_greet_falls_back_to_amount() {
        let mut req = request(ServiceKind::MeetAndGreet);
        req.amount = Some(Decimal::from(300));
        let quote = quote(&celebrity(), ServiceKind::MeetAndGreet, &req, MetadataMap::new(), Utc::now())
            .unwrap();
        assert_eq!(quote.amount, Decimal::from(300));
    }
}
