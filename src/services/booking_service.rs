//! Booking service - creation, lifecycle transitions and admin listing.
//!
//! Every status change goes through [`Booking::apply_transition`]. Customer
//! notifications are sent after the change is stored and never decide the
//! outcome of the request.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    booking::clean_optional, metadata_from_value, normalize_email, quote, Booking, BookingFilter,
    BookingStatus, BookingView, CelebritySummary, CreateBookingRequest, ListingStats,
    UpdateBooking, UpdateBookingStatus,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::notifications::Notifier;
use crate::types::{PageRequest, PaginationMeta};

/// Admin booking listing: one page plus stats over the whole filtered set
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingPage {
    pub items: Vec<BookingView>,
    pub pagination: PaginationMeta,
    pub stats: ListingStats,
}

/// Booking service trait for dependency injection.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Price, validate and store a public booking request
    async fn create(&self, request: CreateBookingRequest) -> AppResult<BookingView>;

    async fn get(&self, id: Uuid) -> AppResult<BookingView>;

    /// Customer cancellation, allowed only inside the cancellation window
    async fn cancel(&self, id: Uuid) -> AppResult<()>;

    async fn list(&self, filter: BookingFilter, page: PageRequest) -> AppResult<BookingPage>;

    /// Generic transition with optional notes replacement
    async fn update_status(&self, id: Uuid, update: UpdateBookingStatus) -> AppResult<BookingView>;

    async fn accept(&self, id: Uuid) -> AppResult<BookingView>;

    /// Only valid while the booking is pending
    async fn reject(&self, id: Uuid) -> AppResult<BookingView>;

    /// Partial admin edit
    async fn update(&self, id: Uuid, update: UpdateBooking) -> AppResult<BookingView>;
}

/// Concrete implementation of BookingService using Unit of Work.
pub struct BookingDesk<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<dyn Notifier>,
}

impl<U: UnitOfWork> BookingDesk<U> {
    pub fn new(uow: Arc<U>, notifier: Arc<dyn Notifier>) -> Self {
        Self { uow, notifier }
    }

    async fn find(&self, id: Uuid) -> AppResult<Booking> {
        self.uow
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Booking")
    }

    async fn summary_for(&self, celebrity_id: Uuid) -> AppResult<Option<CelebritySummary>> {
        let celebrity = self.uow.celebrities().find_by_id(celebrity_id).await?;
        Ok(celebrity.as_ref().map(CelebritySummary::from))
    }

    /// Store a transitioned booking and tell the customer when the new
    /// status calls for it.
    async fn commit_transition(
        &self,
        booking: Booking,
        previous: BookingStatus,
    ) -> AppResult<BookingView> {
        let saved = self.uow.bookings().save(booking).await?;
        tracing::info!(
            booking_id = %saved.id,
            from = %previous,
            to = %saved.status,
            "Booking status changed"
        );

        if saved.status != previous && saved.status.notifies_customer() {
            self.notify_status(&saved).await;
        }

        let summary = self.summary_for(saved.celebrity_id).await?;
        Ok(BookingView::new(saved, summary))
    }

    async fn notify_status(&self, booking: &Booking) {
        let celebrity = match self.uow.celebrities().find_by_id(booking.celebrity_id).await {
            Ok(Some(celebrity)) => celebrity,
            Ok(None) => {
                tracing::warn!(
                    booking_id = %booking.id,
                    celebrity_id = %booking.celebrity_id,
                    "Celebrity not found, skipping status notification"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(booking_id = %booking.id, error = %e, "Failed to load celebrity for notification");
                return;
            }
        };

        if let Err(e) = self
            .notifier
            .status_update(booking, &celebrity.contact())
            .await
        {
            tracing::warn!(booking_id = %booking.id, error = %e, "Failed to send status update");
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> BookingService for BookingDesk<U> {
    async fn create(&self, request: CreateBookingRequest) -> AppResult<BookingView> {
        let celebrity = self
            .uow
            .celebrities()
            .find_by_id(request.celebrity_id)
            .await?
            .ok_or_not_found("Celebrity")?;

        let now = Utc::now();
        let metadata = metadata_from_value(request.metadata.clone());
        let service = request
            .service
            .ok_or_else(|| AppError::validation("Service type is required"))?;
        let priced = quote(&celebrity, service, &request, metadata, now)?;

        let booking = Booking {
            id: Uuid::new_v4(),
            celebrity_id: celebrity.id,
            service,
            customer_name: request.customer_name.trim().to_string(),
            customer_email: normalize_email(&request.customer_email),
            customer_phone: clean_optional(request.customer_phone),
            status: priced.status,
            date: request.date.unwrap_or(now),
            amount: priced.amount,
            notes: clean_optional(request.notes),
            payment_status: priced.payment_status,
            payment_method: clean_optional(request.payment_method),
            transaction_id: None,
            metadata: priced.metadata,
            created_at: now,
            updated_at: now,
        };
        booking.validate()?;

        let created = self.uow.bookings().create(booking).await?;
        tracing::info!(
            booking_id = %created.id,
            celebrity_id = %celebrity.id,
            service = %created.service,
            amount = %created.amount,
            "Booking created"
        );

        if let Err(e) = self
            .notifier
            .booking_confirmation(&created, &celebrity.contact())
            .await
        {
            tracing::warn!(booking_id = %created.id, error = %e, "Failed to send booking confirmation");
        }

        Ok(BookingView::new(created, Some(CelebritySummary::from(&celebrity))))
    }

    async fn get(&self, id: Uuid) -> AppResult<BookingView> {
        let booking = self.find(id).await?;
        let summary = self.summary_for(booking.celebrity_id).await?;
        Ok(BookingView::new(booking, summary))
    }

    async fn cancel(&self, id: Uuid) -> AppResult<()> {
        let booking = self.find(id).await?;
        if !booking.can_cancel(Utc::now()) {
            return Err(AppError::invalid_state(
                "Booking cannot be cancelled. Only pending bookings at least 24 hours away can be cancelled",
            ));
        }

        self.uow.bookings().delete(id).await?;
        tracing::info!(booking_id = %id, "Booking cancelled");
        Ok(())
    }

    async fn list(&self, filter: BookingFilter, page: PageRequest) -> AppResult<BookingPage> {
        let repo = self.uow.bookings();
        let (bookings, total) = repo.list(&filter, page).await?;
        let stats = ListingStats::from_rows(&repo.stat_rows(&filter).await?);

        let mut ids: Vec<Uuid> = bookings.iter().map(|b| b.celebrity_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let summaries: HashMap<Uuid, CelebritySummary> = self
            .uow
            .celebrities()
            .find_by_ids(&ids)
            .await?
            .iter()
            .map(|c| (c.id, CelebritySummary::from(c)))
            .collect();

        let items = bookings
            .into_iter()
            .map(|booking| {
                let summary = summaries.get(&booking.celebrity_id).cloned();
                BookingView::new(booking, summary)
            })
            .collect();

        Ok(BookingPage {
            items,
            pagination: PaginationMeta::new(page, total),
            stats,
        })
    }

    async fn update_status(&self, id: Uuid, update: UpdateBookingStatus) -> AppResult<BookingView> {
        update.validate()?;
        let mut booking = self.find(id).await?;
        let previous = booking.status;

        booking.apply_transition(update.status, Utc::now())?;
        if update.notes.is_some() {
            booking.set_notes(update.notes);
        }
        self.commit_transition(booking, previous).await
    }

    async fn accept(&self, id: Uuid) -> AppResult<BookingView> {
        let mut booking = self.find(id).await?;
        let previous = booking.status;

        booking.apply_transition(BookingStatus::Approved, Utc::now())?;
        self.commit_transition(booking, previous).await
    }

    async fn reject(&self, id: Uuid) -> AppResult<BookingView> {
        let mut booking = self.find(id).await?;
        let previous = booking.status;

        booking.reject(Utc::now())?;
        self.commit_transition(booking, previous).await
    }

    async fn update(&self, id: Uuid, update: UpdateBooking) -> AppResult<BookingView> {
        update.validate()?;
        let mut booking = self.find(id).await?;
        let previous = booking.status;
        let now = Utc::now();

        if let Some(payment_status) = update.payment_status {
            booking.payment_status = payment_status;
        }
        if let Some(status) = update.status.filter(|s| *s != previous) {
            booking.apply_transition(status, now)?;
        }
        if update.notes.is_some() {
            booking.set_notes(update.notes);
        }
        if let Some(method) = update.payment_method {
            booking.payment_method = clean_optional(Some(method));
        }
        if let Some(transaction_id) = update.transaction_id {
            booking.transaction_id = clean_optional(Some(transaction_id));
        }
        booking.updated_at = now;

        self.commit_transition(booking, previous).await
    }
}
