//! Booking domain entity, lifecycle rules and related DTOs.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::celebrity::CelebritySummary;
use super::metadata::BookingMetadata;
use crate::config::{
    CANCELLATION_WINDOW_HOURS, CURRENCY_USD, MAX_CUSTOMER_NAME_LENGTH, MIN_CUSTOMER_NAME_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Approved,
        BookingStatus::Rejected,
        BookingStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Completed => "completed",
        }
    }

    /// Statuses reachable from this one in a single step
    pub fn allowed_targets(&self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Approved, BookingStatus::Rejected],
            BookingStatus::Approved => &[BookingStatus::Completed, BookingStatus::Rejected],
            BookingStatus::Rejected | BookingStatus::Completed => &[],
        }
    }

    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Whether the customer should hear about reaching this status
    pub fn notifies_customer(&self) -> bool {
        matches!(self, BookingStatus::Approved | BookingStatus::Rejected)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("'{}' is not a valid status", s)))
    }
}

/// Payment state tracked next to the booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(AppError::validation(format!(
                "'{}' is not a valid payment status",
                other
            ))),
        }
    }
}

/// Purchasable service offered by a celebrity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    MeetAndGreet,
    VipFanCards,
    Donation,
    Subscription,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::MeetAndGreet,
        ServiceKind::VipFanCards,
        ServiceKind::Donation,
        ServiceKind::Subscription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::MeetAndGreet => "meet-and-greet",
            ServiceKind::VipFanCards => "vip-fan-cards",
            ServiceKind::Donation => "donation",
            ServiceKind::Subscription => "subscription",
        }
    }

    /// Display name, e.g. "Vip Fan Cards"
    pub fn title(&self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("{} is not a valid service type", s)))
    }
}

/// Booking domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub celebrity_id: Uuid,
    pub service: ServiceKind,
    #[validate(custom(function = "validate_customer_name"))]
    #[schema(example = "Jane Doe")]
    pub customer_name: String,
    #[validate(email(message = "Please provide a valid email address"))]
    #[schema(example = "jane@example.com")]
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub status: BookingStatus,
    /// Scheduled date of the booking
    #[validate(custom(function = "validate_future_date"))]
    pub date: DateTime<Utc>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    #[schema(value_type = f64, example = 499)]
    pub amount: Decimal,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    /// Service-specific details as a flat string map
    #[schema(value_type = Object)]
    pub metadata: BookingMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Move the booking to `target`, enforcing the lifecycle table.
    ///
    /// Completing a booking always marks it paid. Every update path goes
    /// through here.
    pub fn apply_transition(&mut self, target: BookingStatus, now: DateTime<Utc>) -> AppResult<()> {
        if !self.status.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        if target == BookingStatus::Completed {
            self.payment_status = PaymentStatus::Paid;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Reject a booking that is still awaiting review.
    pub fn reject(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.status != BookingStatus::Pending {
            return Err(AppError::InvalidTransition {
                from: self.status,
                to: BookingStatus::Rejected,
            });
        }
        self.apply_transition(BookingStatus::Rejected, now)
    }

    /// A customer may cancel while the booking is pending and at least
    /// 24 hours away.
    pub fn can_cancel(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::Pending
            && self.date - now >= Duration::hours(CANCELLATION_WINDOW_HOURS)
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.map(|n| n.trim().to_string());
    }
}

fn validate_customer_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count() as u64;
    let message = if name.is_empty() {
        "Customer name is required".to_string()
    } else if len < MIN_CUSTOMER_NAME_LENGTH {
        format!(
            "Name must be at least {} characters long",
            MIN_CUSTOMER_NAME_LENGTH
        )
    } else if len > MAX_CUSTOMER_NAME_LENGTH {
        format!("Name cannot exceed {} characters", MAX_CUSTOMER_NAME_LENGTH)
    } else {
        return Ok(());
    };

    let mut err = ValidationError::new("customer_name");
    err.message = Some(Cow::Owned(message));
    Err(err)
}

fn validate_future_date(date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date > Utc::now() {
        return Ok(());
    }
    let mut err = ValidationError::new("future_date");
    err.message = Some(Cow::Borrowed("Booking date must be in the future"));
    Err(err)
}

fn validate_non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if !amount.is_sign_negative() || amount.is_zero() {
        return Ok(());
    }
    let mut err = ValidationError::new("amount");
    err.message = Some(Cow::Borrowed("Amount cannot be negative"));
    Err(err)
}

/// Booking as returned by the API: currency and, when resolvable, the
/// celebrity summary
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    #[schema(example = "USD")]
    pub currency: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebrity: Option<CelebritySummary>,
}

impl BookingView {
    pub fn new(booking: Booking, celebrity: Option<CelebritySummary>) -> Self {
        Self {
            booking,
            currency: CURRENCY_USD,
            celebrity,
        }
    }
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        Self::new(booking, None)
    }
}

/// Public booking request
///
/// `metadata` may be an object or a JSON-encoded string.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub celebrity_id: Uuid,
    pub service: Option<ServiceKind>,
    #[serde(default)]
    #[schema(example = "Jane Doe")]
    pub customer_name: String,
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub customer_email: String,
    pub customer_phone: Option<String>,
    /// Defaults to the time of the request when omitted
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    /// Only consulted as the meet-and-greet budget fallback
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<f64>, example = 250)]
    pub budget: Option<Decimal>,
    #[schema(example = "gold")]
    pub card_type: Option<String>,
    #[schema(example = "monthly")]
    pub subscription_plan: Option<String>,
    #[schema(value_type = Option<f64>, example = 250)]
    pub donation_amount: Option<Decimal>,
    pub payment_method: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

/// Generic status change with optional notes replacement
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

/// Direct admin edit of a booking
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBooking {
    pub status: Option<BookingStatus>,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}

/// Filters for admin booking listings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingFilter {
    /// Case-insensitive substring of customer name, email or phone
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
    pub service: Option<ServiceKind>,
    /// Inclusive lower bound on the scheduled date
    #[serde(default, deserialize_with = "crate::types::dates::start_bound")]
    #[param(value_type = Option<String>)]
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the scheduled date
    #[serde(default, deserialize_with = "crate::types::dates::end_bound")]
    #[param(value_type = Option<String>)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Trim and normalize a customer-supplied optional string
pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::BookingMetadata;

    fn booking(status: BookingStatus, date: DateTime<Utc>) -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            celebrity_id: Uuid::new_v4(),
            service: ServiceKind::MeetAndGreet,
            customer_name: "Jane Doe".into(),
            customer_email: "jane@example.com".into(),
            customer_phone: None,
            status,
            date,
            amount: Decimal::from(150),
            notes: None,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            transaction_id: None,
            metadata: BookingMetadata::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_transition_table() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Completed));
        assert!(Approved.can_transition_to(Completed));
        assert!(Approved.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Pending));
        for target in BookingStatus::ALL {
            assert!(!Rejected.can_transition_to(target));
            assert!(!Completed.can_transition_to(target));
        }
    }

    #[test]
    fn test_completing_forces_paid() {
        let mut b = booking(BookingStatus::Approved, Utc::now() + Duration::days(3));
        b.apply_transition(BookingStatus::Completed, Utc::now()).unwrap();

        assert_eq!(b.status, BookingStatus::Completed);
        assert_eq!(b.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_invalid_transition_leaves_status() {
        let mut b = booking(BookingStatus::Pending, Utc::now() + Duration::days(3));
        let err = b
            .apply_transition(BookingStatus::Completed, Utc::now())
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: BookingStatus::Pending,
                to: BookingStatus::Completed
            }
        ));
        assert_eq!(b.status, BookingStatus::Pending);
        assert_eq!(b.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_reject_only_from_pending() {
        let mut b = booking(BookingStatus::Pending, Utc::now() + Duration::days(3));
        b.reject(Utc::now()).unwrap();
        assert_eq!(b.status, BookingStatus::Rejected);

        let err = b.reject(Utc::now()).unwrap_err();
        assert!(err.to_string().contains("rejected"));

        let mut approved = booking(BookingStatus::Approved, Utc::now() + Duration::days(3));
        assert!(approved.reject(Utc::now()).is_err());
        assert_eq!(approved.status, BookingStatus::Approved);
    }

    #[test]
    fn test_can_cancel_window() {
        let now = Utc::now();
        assert!(booking(BookingStatus::Pending, now + Duration::hours(25)).can_cancel(now));
        assert!(booking(BookingStatus::Pending, now + Duration::hours(24)).can_cancel(now));
        assert!(!booking(BookingStatus::Pending, now + Duration::hours(23)).can_cancel(now));
        assert!(!booking(BookingStatus::Approved, now + Duration::days(10)).can_cancel(now));
        assert!(!booking(BookingStatus::Rejected, now + Duration::days(10)).can_cancel(now));
    }

    #[test]
    fn test_validation_aggregates_messages() {
        let mut b = booking(BookingStatus::Pending, Utc::now() - Duration::hours(1));
        b.customer_name = "J".into();
        b.customer_email = "not-an-email".into();

        let err: AppError = b.validate().unwrap_err().into();
        let message = err.to_string();
        assert!(message.contains("Name must be at least 2 characters long"));
        assert!(message.contains("Please provide a valid email address"));
        assert!(message.contains("Booking date must be in the future"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut b = booking(BookingStatus::Pending, Utc::now() + Duration::days(2));
        b.amount = Decimal::from(-5);
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_service_titles() {
        assert_eq!(ServiceKind::MeetAndGreet.title(), "Meet And Greet");
        assert_eq!(ServiceKind::VipFanCards.title(), "Vip Fan Cards");
        assert_eq!(ServiceKind::Donation.title(), "Donation");
    }

    #[test]
    fn test_status_parse_error_message() {
        let err = "archived".parse::<BookingStatus>().unwrap_err();
        assert_eq!(err.to_string(), "'archived' is not a valid status");
    }

    #[test]
    fn test_view_echoes_currency() {
        let b = booking(BookingStatus::Pending, Utc::now() + Duration::days(2));
        let json = serde_json::to_value(BookingView::from(b)).unwrap();

        assert_eq!(json["currency"], "USD");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["service"], "meet-and-greet");
        assert!(json.get("celebrity").is_none());
    }
}
