//! In-memory stand-ins for the stores, the notifier and the rate limiter.
//!
//! They implement the same traits as the SeaORM/Redis types, so the real
//! services and router run on top of them without a database.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use celebrity_booking::api::{create_router, AppState};
use celebrity_booking::config::Config;
use celebrity_booking::domain::{
    AdminUser, Booking, BookingFilter, BookingStatRow, Celebrity, CelebrityContact,
    CelebrityFilter, CreateCelebrity, Password,
};
use celebrity_booking::errors::{AppError, AppResult};
use celebrity_booking::infra::{
    AdminRepository, BookingRepository, CelebrityRepository, HealthProbe, Persistence,
    RateLimiter,
};
use celebrity_booking::notifications::Notifier;
use celebrity_booking::services::Services;
use celebrity_booking::types::PageRequest;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    items
        .iter()
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(page.limit as usize)
        .cloned()
        .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// =============================================================================
// Stores
// =============================================================================

#[derive(Default)]
pub struct MemoryCelebrities {
    rows: Mutex<Vec<Celebrity>>,
}

impl MemoryCelebrities {
    fn newest_first(&self) -> Vec<Celebrity> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

#[async_trait]
impl CelebrityRepository for MemoryCelebrities {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Celebrity>> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Celebrity>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Celebrity>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.slug == slug && Some(c.id) != exclude))
    }

    async fn list(
        &self,
        filter: &CelebrityFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<Celebrity>, u64)> {
        let matching: Vec<Celebrity> = self
            .newest_first()
            .into_iter()
            .filter(|c| {
                filter
                    .search
                    .as_deref()
                    .map_or(true, |s| contains_ci(&c.name, s) || contains_ci(&c.profession, s))
            })
            .filter(|c| filter.profession.as_deref().map_or(true, |p| c.profession == p))
            .collect();
        Ok((page_of(&matching, page), matching.len() as u64))
    }

    async fn professions(&self) -> AppResult<Vec<String>> {
        let mut professions: Vec<String> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.profession.clone())
            .collect();
        professions.sort();
        professions.dedup();
        Ok(professions)
    }

    async fn featured(&self, limit: u64) -> AppResult<Vec<Celebrity>> {
        Ok(self
            .newest_first()
            .into_iter()
            .filter(|c| c.featured)
            .take(limit as usize)
            .collect())
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<Celebrity>> {
        Ok(self.newest_first().into_iter().take(limit as usize).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn create(&self, celebrity: Celebrity) -> AppResult<Celebrity> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.slug == celebrity.slug) {
            return Err(AppError::conflict("Celebrity"));
        }
        rows.push(celebrity.clone());
        Ok(celebrity)
    }

    async fn update(&self, celebrity: Celebrity) -> AppResult<Celebrity> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|c| c.slug == celebrity.slug && c.id != celebrity.id)
        {
            return Err(AppError::conflict("Celebrity"));
        }
        let slot = rows
            .iter_mut()
            .find(|c| c.id == celebrity.id)
            .ok_or(AppError::NotFound("Celebrity"))?;
        *slot = celebrity.clone();
        Ok(celebrity)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound("Celebrity"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBookings {
    rows: Mutex<Vec<Booking>>,
}

impl MemoryBookings {
    pub fn insert(&self, booking: Booking) {
        self.rows.lock().unwrap().push(booking);
    }

    pub fn get(&self, id: Uuid) -> Option<Booking> {
        self.rows.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }

    fn matching(&self, filter: &BookingFilter) -> Vec<Booking> {
        let mut rows: Vec<Booking> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|b| {
                filter.search.as_deref().map_or(true, |s| {
                    contains_ci(&b.customer_name, s)
                        || contains_ci(&b.customer_email, s)
                        || b.customer_phone.as_deref().is_some_and(|p| contains_ci(p, s))
                })
            })
            .filter(|b| filter.status.map_or(true, |s| b.status == s))
            .filter(|b| filter.service.map_or(true, |s| b.service == s))
            .filter(|b| filter.start_date.map_or(true, |d| b.date >= d))
            .filter(|b| filter.end_date.map_or(true, |d| b.date <= d))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

fn stat_row(b: &Booking) -> BookingStatRow {
    BookingStatRow {
        status: b.status,
        service: b.service,
        amount: b.amount,
        created_at: b.created_at,
    }
}

#[async_trait]
impl BookingRepository for MemoryBookings {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(self.get(id))
    }

    async fn create(&self, booking: Booking) -> AppResult<Booking> {
        self.insert(booking.clone());
        Ok(booking)
    }

    async fn save(&self, booking: Booking) -> AppResult<Booking> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|b| b.id == booking.id)
            .ok_or(AppError::NotFound("Booking"))?;
        *slot = booking.clone();
        Ok(booking)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|b| b.id != id);
        Ok(())
    }

    async fn list(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<Booking>, u64)> {
        let matching = self.matching(filter);
        Ok((page_of(&matching, page), matching.len() as u64))
    }

    async fn stat_rows(&self, filter: &BookingFilter) -> AppResult<Vec<BookingStatRow>> {
        Ok(self.matching(filter).iter().map(stat_row).collect())
    }

    async fn created_since(&self, since: DateTime<Utc>) -> AppResult<Vec<BookingStatRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.created_at >= since)
            .map(stat_row)
            .collect())
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<Booking>> {
        Ok(self
            .matching(&BookingFilter::default())
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryAdmins {
    rows: Mutex<Vec<AdminUser>>,
}

#[async_trait]
impl AdminRepository for MemoryAdmins {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AdminUser>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AdminUser>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, email: String, password_hash: String) -> AppResult<AdminUser> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|a| a.email == email) {
            return Err(AppError::conflict("Admin"));
        }
        let now = Utc::now();
        let admin = AdminUser {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role: "admin".to_string(),
            created_at: now,
            updated_at: now,
        };
        rows.push(admin.clone());
        Ok(admin)
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let admin = rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AppError::NotFound("Admin"))?;
        admin.password_hash = password_hash;
        Ok(())
    }
}

// =============================================================================
// Notifier, rate limiter, health
// =============================================================================

/// What the notifier was asked to send
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Confirmation { booking: Uuid, to: String },
    StatusUpdate { booking: Uuid, status: String },
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Sent>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn outcome(&self) -> AppResult<()> {
        if self.fail {
            Err(AppError::internal("smtp unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn booking_confirmation(
        &self,
        booking: &Booking,
        _celebrity: &CelebrityContact,
    ) -> AppResult<()> {
        self.sent.lock().unwrap().push(Sent::Confirmation {
            booking: booking.id,
            to: booking.customer_email.clone(),
        });
        self.outcome()
    }

    async fn status_update(&self, booking: &Booking, _celebrity: &CelebrityContact) -> AppResult<()> {
        self.sent.lock().unwrap().push(Sent::StatusUpdate {
            booking: booking.id,
            status: booking.status.to_string(),
        });
        self.outcome()
    }
}

/// Fixed-window counter without expiry
#[derive(Default)]
pub struct MemoryRateLimiter {
    counts: Mutex<HashMap<String, u64>>,
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    async fn hit(
        &self,
        identifier: &str,
        max_requests: u64,
        _window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry(identifier.to_string()).or_default();
        *count += 1;
        Ok((*count, *count <= max_requests))
    }
}

pub struct StaticProbe {
    pub name: &'static str,
    pub healthy: bool,
}

#[async_trait]
impl HealthProbe for StaticProbe {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check(&self) -> AppResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::internal("connection refused"))
        }
    }
}

// =============================================================================
// Harness
// =============================================================================

pub struct TestApp {
    pub celebrities: Arc<MemoryCelebrities>,
    pub bookings: Arc<MemoryBookings>,
    pub admins: Arc<MemoryAdmins>,
    pub notifier: Arc<RecordingNotifier>,
    pub services: Services,
    pub config: Config,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_notifier(RecordingNotifier::default())
    }

    pub fn with_notifier(notifier: RecordingNotifier) -> Self {
        let celebrities = Arc::new(MemoryCelebrities::default());
        let bookings = Arc::new(MemoryBookings::default());
        let admins = Arc::new(MemoryAdmins::default());
        let notifier = Arc::new(notifier);
        let config = Config::new("postgres://localhost/test", TEST_SECRET);

        let uow = Arc::new(Persistence::from_parts(
            celebrities.clone(),
            bookings.clone(),
            admins.clone(),
        ));
        let services = Services::from_persistence(uow, config.clone(), None, notifier.clone());

        Self {
            celebrities,
            bookings,
            admins,
            notifier,
            services,
            config,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(&self.services, Arc::new(MemoryRateLimiter::default()))
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.state())
    }

    /// Insert a celebrity through the catalog service so the slug rules apply
    pub async fn add_celebrity(&self, name: &str) -> Celebrity {
        use celebrity_booking::services::ServiceContainer;

        self.services
            .catalog()
            .create(celebrity_input(name))
            .await
            .expect("celebrity should be created")
    }

    /// Seed an admin directly and return a bearer token for it
    pub async fn admin_token(&self, email: &str, password: &str) -> String {
        use celebrity_booking::services::ServiceContainer;

        let hash = Password::new(password).unwrap().into_string();
        self.admins.create(email.to_string(), hash).await.unwrap();
        self.services
            .auth()
            .login(email.to_string(), password.to_string())
            .await
            .unwrap()
            .access_token
    }
}

pub fn celebrity_input(name: &str) -> CreateCelebrity {
    CreateCelebrity {
        name: name.to_string(),
        profession: "Actor".to_string(),
        bio: "Award-winning performer".to_string(),
        image_url: "https://img.example.com/portrait.jpg".to_string(),
        ..Default::default()
    }
}
