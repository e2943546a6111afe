//! Plain-text customer messages.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{Booking, BookingStatus, CelebrityContact, ServiceDetails, ServiceKind};

pub const CONFIRMATION_SUBJECT: &str = "Your Booking Confirmation";
pub const STATUS_UPDATE_SUBJECT: &str = "Your Booking Status Has Been Updated";

/// A rendered message ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Confirmation sent right after a booking is created.
pub fn booking_confirmation(booking: &Booking, celebrity: &CelebrityContact) -> RenderedEmail {
    let mut body = format!(
        "Dear {name},\n\n\
         Thank you for your booking with {celebrity} ({profession}). \
         Here are your booking details:\n\n\
         {details}",
        name = booking.customer_name,
        celebrity = celebrity.name,
        profession = celebrity.profession,
        details = details_block(booking, None),
    );

    if let Some(ServiceDetails::Subscription(terms)) = &booking.metadata.details {
        body.push_str(&format!(
            "Subscription Plan: {}\n\
             Duration: {}\n\
             Next Renewal: {}\n",
            capitalize(terms.plan.as_str()),
            terms.duration,
            terms.renewal_date.format("%B %-d, %Y"),
        ));
    }

    body.push('\n');
    if booking.service == ServiceKind::Subscription {
        body.push_str(&format!(
            "Your subscription is now active. You'll receive exclusive content from {} \
             according to your subscription plan.\n",
            celebrity.name
        ));
    } else {
        body.push_str(
            "Your booking is currently pending approval. \
             We'll notify you once it's been reviewed.\n",
        );
    }
    body.push_str(FOOTER);

    RenderedEmail {
        to: booking.customer_email.clone(),
        subject: CONFIRMATION_SUBJECT.to_string(),
        body,
    }
}

/// Update sent after an admin moves the booking to a new status.
pub fn status_update(booking: &Booking, celebrity: &CelebrityContact) -> RenderedEmail {
    let mut body = format!(
        "Dear {name},\n\n{message}\n\n{details}",
        name = booking.customer_name,
        message = status_message(booking.status),
        details = details_block(booking, Some(celebrity)),
    );

    if booking.status == BookingStatus::Approved {
        body.push_str("\nWe'll be in touch with further details about your booking soon.\n");
    }
    body.push_str(FOOTER);

    RenderedEmail {
        to: booking.customer_email.clone(),
        subject: STATUS_UPDATE_SUBJECT.to_string(),
        body,
    }
}

const FOOTER: &str = "\nIf you have any questions, please don't hesitate to contact us.\n";

fn details_block(booking: &Booking, celebrity: Option<&CelebrityContact>) -> String {
    let mut block = String::new();
    if let Some(celebrity) = celebrity {
        block.push_str(&format!(
            "Celebrity: {} ({})\n",
            celebrity.name, celebrity.profession
        ));
    }
    block.push_str(&format!(
        "Service: {}\n\
         Date: {}\n\
         Amount: {}\n\
         Status: {}\n",
        booking.service.title(),
        booking.date.format("%B %-d, %Y"),
        format_usd(booking.amount),
        capitalize(booking.status.as_str()),
    ));
    block
}

fn status_message(status: BookingStatus) -> String {
    match status {
        BookingStatus::Approved => "Great news! Your booking has been approved.".to_string(),
        BookingStatus::Rejected => {
            "We regret to inform you that your booking has been rejected.".to_string()
        }
        BookingStatus::Completed => "Your booking has been marked as completed.".to_string(),
        other => format!("Your booking status has been updated to {}.", other),
    }
}

/// `$1,234.50`
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use crate::domain::{BookingMetadata, PaymentStatus};

    fn booking(service: ServiceKind, status: BookingStatus) -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            celebrity_id: Uuid::new_v4(),
            service,
            customer_name: "Jane Doe".into(),
            customer_email: "jane@example.com".into(),
            customer_phone: None,
            status,
            date: Utc.with_ymd_and_hms(2030, 3, 7, 18, 0, 0).unwrap(),
            amount: Decimal::new(149999, 2),
            notes: None,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            transaction_id: None,
            metadata: BookingMetadata::default(),
            created_at: now - Duration::hours(1),
            updated_at: now,
        }
    }

    fn contact() -> CelebrityContact {
        CelebrityContact {
            name: "Ava Stone".into(),
            profession: "Singer".into(),
        }
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(Decimal::from(99)), "$99.00");
        assert_eq!(format_usd(Decimal::new(999, 2)), "$9.99");
        assert_eq!(format_usd(Decimal::new(123456750, 2)), "$1,234,567.50");
        assert_eq!(format_usd(Decimal::from(-1000)), "-$1,000.00");
    }

    #[test]
    fn test_confirmation_mentions_details() {
        let email = booking_confirmation(
            &booking(ServiceKind::VipFanCards, BookingStatus::Pending),
            &contact(),
        );

        assert_eq!(email.to, "jane@example.com");
        assert_eq!(email.subject, CONFIRMATION_SUBJECT);
        assert!(email.body.starts_with("Dear Jane Doe,"));
        assert!(email.body.contains("Ava Stone (Singer)"));
        assert!(email.body.contains("Service: Vip Fan Cards"));
        assert!(email.body.contains("Amount: $1,499.99"));
        assert!(email.body.contains("Date: March 7, 2030"));
        assert!(email.body.contains("pending approval"));
    }

    #[test]
    fn test_status_update_messages() {
        let approved = status_update(
            &booking(ServiceKind::MeetAndGreet, BookingStatus::Approved),
            &contact(),
        );
        assert!(approved.body.contains("Great news! Your booking has been approved."));
        assert!(approved.body.contains("further details"));
        assert!(approved.body.contains("Status: Approved"));

        let rejected = status_update(
            &booking(ServiceKind::MeetAndGreet, BookingStatus::Rejected),
            &contact(),
        );
        assert!(rejected.body.contains("has been rejected"));
        assert!(!rejected.body.contains("further details"));
    }
}
