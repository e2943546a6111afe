//! Customer notifications.
//!
//! Services only see [`Notifier`]. `NOTIFICATION_MODE` picks the transport:
//! `log` renders and logs in-process, `queue` hands an [`EmailJob`] to the
//! background worker.

pub mod templates;

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use async_trait::async_trait;

use crate::domain::{Booking, CelebrityContact};
use crate::errors::{AppError, AppResult};
use crate::jobs::EmailJob;
use templates::RenderedEmail;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Outbound customer messages about a booking.
///
/// Callers treat every error as non-fatal.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn booking_confirmation(
        &self,
        booking: &Booking,
        celebrity: &CelebrityContact,
    ) -> AppResult<()>;

    async fn status_update(&self, booking: &Booking, celebrity: &CelebrityContact)
        -> AppResult<()>;
}

/// Logs rendered messages instead of sending them
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    fn log(&self, email: &RenderedEmail) {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Customer notification (not sent)\n{}",
            email.body
        );
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn booking_confirmation(
        &self,
        booking: &Booking,
        celebrity: &CelebrityContact,
    ) -> AppResult<()> {
        self.log(&templates::booking_confirmation(booking, celebrity));
        Ok(())
    }

    async fn status_update(
        &self,
        booking: &Booking,
        celebrity: &CelebrityContact,
    ) -> AppResult<()> {
        self.log(&templates::status_update(booking, celebrity));
        Ok(())
    }
}

/// Pushes email jobs onto the apalis PostgreSQL queue
#[derive(Clone)]
pub struct QueueNotifier {
    storage: PostgresStorage<EmailJob>,
    from: String,
}

impl QueueNotifier {
    pub fn new(storage: PostgresStorage<EmailJob>, from: impl Into<String>) -> Self {
        Self {
            storage,
            from: from.into(),
        }
    }

    async fn enqueue(&self, email: RenderedEmail) -> AppResult<()> {
        let job = EmailJob::new(email.to, email.subject, email.body).with_from(&self.from);

        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to enqueue email job: {}", e)))?;

        tracing::debug!("Email job enqueued");
        Ok(())
    }
}

#[async_trait]
impl Notifier for QueueNotifier {
    async fn booking_confirmation(
        &self,
        booking: &Booking,
        celebrity: &CelebrityContact,
    ) -> AppResult<()> {
        self.enqueue(templates::booking_confirmation(booking, celebrity))
            .await
    }

    async fn status_update(
        &self,
        booking: &Booking,
        celebrity: &CelebrityContact,
    ) -> AppResult<()> {
        self.enqueue(templates::status_update(booking, celebrity))
            .await
    }
}
