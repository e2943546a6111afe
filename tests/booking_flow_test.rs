//! Booking lifecycle tests over the real services and in-memory stores.

mod common;

use chrono::{DateTime, Duration, Months, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use celebrity_booking::domain::metadata::KEY_RENEWAL_DATE;
use celebrity_booking::domain::{
    BookingFilter, BookingStatus, CreateBookingRequest, PaymentStatus, ServiceKind,
    UpdateBooking, UpdateBookingStatus,
};
use celebrity_booking::errors::AppError;
use celebrity_booking::services::ServiceContainer;
use celebrity_booking::types::PageRequest;

use common::{RecordingNotifier, Sent, TestApp};

fn request(celebrity_id: Uuid, service: ServiceKind) -> CreateBookingRequest {
    CreateBookingRequest {
        celebrity_id,
        service: Some(service),
        customer_name: "Sam Fan".to_string(),
        customer_email: "  Sam.Fan@Example.com ".to_string(),
        date: Some(Utc::now() + Duration::days(7)),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_slugs_get_numeric_suffixes() {
    let app = TestApp::new();

    let first = app.add_celebrity("Jane O'Brien").await;
    let second = app.add_celebrity("Jane O'Brien").await;
    let third = app.add_celebrity("  jane   o'brien ").await;

    assert_eq!(first.slug, "jane-o-brien");
    assert_eq!(second.slug, "jane-o-brien-1");
    assert_eq!(third.slug, "jane-o-brien-2");

    let found = app
        .services
        .catalog()
        .get_by_slug("jane-o-brien-1")
        .await
        .unwrap();
    assert_eq!(found.id, second.id);
}

#[tokio::test]
async fn test_vip_fan_card_is_priced_from_tier() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;

    let mut req = request(celebrity.id, ServiceKind::VipFanCards);
    req.card_type = Some("gold".to_string());

    let view = app.services.bookings().create(req).await.unwrap();

    assert_eq!(view.booking.amount, Decimal::from(499));
    assert_eq!(view.booking.status, BookingStatus::Pending);
    assert_eq!(view.booking.payment_status, PaymentStatus::Pending);
    assert_eq!(view.booking.customer_email, "sam.fan@example.com");
    assert_eq!(view.currency, "USD");
    assert_eq!(view.celebrity.as_ref().map(|c| c.id), Some(celebrity.id));
    assert_eq!(
        app.notifier.sent(),
        vec![Sent::Confirmation {
            booking: view.booking.id,
            to: "sam.fan@example.com".to_string()
        }]
    );
}

#[tokio::test]
async fn test_donation_amount_read_from_string_metadata() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;

    let mut req = request(celebrity.id, ServiceKind::Donation);
    req.metadata = Some(json!("{\"donationAmount\": \"250\", \"message\": \"keep going\"}"));

    let view = app.services.bookings().create(req).await.unwrap();

    assert_eq!(view.booking.amount, Decimal::from(250));
    let stored = view.booking.metadata.to_map();
    assert_eq!(stored.get("donationAmount").map(String::as_str), Some("250"));
    assert_eq!(stored.get("message").map(String::as_str), Some("keep going"));
}

#[tokio::test]
async fn test_subscription_is_approved_and_paid_immediately() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;

    let mut req = request(celebrity.id, ServiceKind::Subscription);
    req.subscription_plan = Some("monthly".to_string());

    let view = app.services.bookings().create(req).await.unwrap();
    let booking = view.booking;

    assert_eq!(booking.status, BookingStatus::Approved);
    assert_eq!(booking.payment_status, PaymentStatus::Paid);
    assert_eq!(booking.amount, Decimal::new(999, 2));

    let renewal = booking
        .metadata
        .to_map()
        .get(KEY_RENEWAL_DATE)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc))
        .expect("renewal date recorded");
    let expected = booking.created_at.checked_add_months(Months::new(1)).unwrap();
    assert!((renewal - expected).num_seconds().abs() <= 1);
}

#[tokio::test]
async fn test_meet_and_greet_budget_floor() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;

    let mut req = request(celebrity.id, ServiceKind::MeetAndGreet);
    req.budget = Some(Decimal::from(99));
    let err = app.services.bookings().create(req.clone()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m == "Minimum budget is $100"));

    req.budget = Some(Decimal::from(100));
    let view = app.services.bookings().create(req).await.unwrap();
    assert_eq!(view.booking.amount, Decimal::from(100));
}

#[tokio::test]
async fn test_failed_confirmation_does_not_fail_booking() {
    let app = TestApp::with_notifier(RecordingNotifier::failing());
    let celebrity = app.add_celebrity("Rita Stone").await;

    let mut req = request(celebrity.id, ServiceKind::VipFanCards);
    req.card_type = Some("bronze".to_string());

    let view = app.services.bookings().create(req).await.unwrap();

    assert!(app.bookings.get(view.booking.id).is_some());
    assert_eq!(app.notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_unknown_celebrity_is_not_found() {
    let app = TestApp::new();
    let mut req = request(Uuid::new_v4(), ServiceKind::VipFanCards);
    req.card_type = Some("gold".to_string());

    let err = app.services.bookings().create(req).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Celebrity")));
}

#[tokio::test]
async fn test_omitted_date_defaults_to_now_and_is_rejected() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;

    let mut req = request(celebrity.id, ServiceKind::VipFanCards);
    req.card_type = Some("gold".to_string());
    req.date = None;

    let err = app.services.bookings().create(req).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref m) if m.contains("Booking date must be in the future")));
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_accept_then_complete_marks_paid() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;
    let mut req = request(celebrity.id, ServiceKind::VipFanCards);
    req.card_type = Some("silver".to_string());
    let id = app.services.bookings().create(req).await.unwrap().booking.id;

    let accepted = app.services.bookings().accept(id).await.unwrap();
    assert_eq!(accepted.booking.status, BookingStatus::Approved);

    let completed = app
        .services
        .bookings()
        .update_status(
            id,
            UpdateBookingStatus {
                status: BookingStatus::Completed,
                notes: Some(" delivered ".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.booking.status, BookingStatus::Completed);
    assert_eq!(completed.booking.payment_status, PaymentStatus::Paid);
    assert_eq!(completed.booking.notes.as_deref(), Some("delivered"));

    // Confirmation, then one update for approval; completion is silent
    let updates: Vec<_> = app
        .notifier
        .sent()
        .into_iter()
        .filter(|s| matches!(s, Sent::StatusUpdate { .. }))
        .collect();
    assert_eq!(
        updates,
        vec![Sent::StatusUpdate {
            booking: id,
            status: "approved".to_string()
        }]
    );
}

#[tokio::test]
async fn test_reject_twice_is_invalid_transition() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;
    let mut req = request(celebrity.id, ServiceKind::VipFanCards);
    req.card_type = Some("gold".to_string());
    let id = app.services.bookings().create(req).await.unwrap().booking.id;

    app.services.bookings().reject(id).await.unwrap();
    let err = app.services.bookings().reject(id).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::InvalidTransition {
            from: BookingStatus::Rejected,
            to: BookingStatus::Rejected
        }
    ));
    assert_eq!(app.bookings.get(id).unwrap().status, BookingStatus::Rejected);
}

#[tokio::test]
async fn test_direct_update_applies_payment_fields() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;
    let mut req = request(celebrity.id, ServiceKind::VipFanCards);
    req.card_type = Some("gold".to_string());
    let id = app.services.bookings().create(req).await.unwrap().booking.id;

    let updated = app
        .services
        .bookings()
        .update(
            id,
            UpdateBooking {
                status: Some(BookingStatus::Pending),
                payment_status: Some(PaymentStatus::Paid),
                payment_method: Some("card".to_string()),
                transaction_id: Some("txn_123".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.booking.status, BookingStatus::Pending);
    assert_eq!(updated.booking.payment_status, PaymentStatus::Paid);
    assert_eq!(updated.booking.transaction_id.as_deref(), Some("txn_123"));
}

#[tokio::test]
async fn test_cancellation_window() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;

    let mut far = request(celebrity.id, ServiceKind::VipFanCards);
    far.card_type = Some("gold".to_string());
    far.date = Some(Utc::now() + Duration::hours(48));
    let far_id = app.services.bookings().create(far).await.unwrap().booking.id;

    let mut near = request(celebrity.id, ServiceKind::VipFanCards);
    near.card_type = Some("gold".to_string());
    near.date = Some(Utc::now() + Duration::hours(2));
    let near_id = app.services.bookings().create(near).await.unwrap().booking.id;

    app.services.bookings().cancel(far_id).await.unwrap();
    assert!(app.bookings.get(far_id).is_none());

    let err = app.services.bookings().cancel(near_id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert!(app.bookings.get(near_id).is_some());
}

#[tokio::test]
async fn test_approved_booking_cannot_be_cancelled() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;
    let mut req = request(celebrity.id, ServiceKind::VipFanCards);
    req.card_type = Some("gold".to_string());
    req.date = Some(Utc::now() + Duration::days(10));
    let id = app.services.bookings().create(req).await.unwrap().booking.id;
    app.services.bookings().accept(id).await.unwrap();

    let err = app.services.bookings().cancel(id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn test_listing_stats_cover_whole_filter() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;

    for tier in ["bronze", "silver", "gold"] {
        let mut req = request(celebrity.id, ServiceKind::VipFanCards);
        req.card_type = Some(tier.to_string());
        app.services.bookings().create(req).await.unwrap();
    }

    let page = app
        .services
        .bookings()
        .list(BookingFilter::default(), PageRequest { page: 1, limit: 2 })
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.stats.pending, 3);
    assert_eq!(page.stats.total_amount, Decimal::from(99 + 199 + 499));
    assert!(page.items.iter().all(|b| b.celebrity.is_some()));
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = TestApp::new();
    let celebrity = app.add_celebrity("Rita Stone").await;
    app.add_celebrity("Ola Nord").await;

    let mut req = request(celebrity.id, ServiceKind::Donation);
    req.donation_amount = Some(Decimal::from(40));
    app.services.bookings().create(req).await.unwrap();

    let stats = app.services.reports().dashboard().await.unwrap();
    assert_eq!(stats.total_celebrities, 2);
    assert_eq!(stats.total_bookings, 1);
    assert_eq!(stats.recent_bookings.len(), 1);
}
