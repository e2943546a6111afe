//! Unit of Work: the persistence registry.
//!
//! Every repository the services use is registered here once at startup and
//! handed out through typed accessors. No store operation spans more than one
//! row, so there is no transaction API; the slug unique index arbitrates the
//! only multi-step write.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    AdminRepository, AdminStore, BookingRepository, BookingStore, CelebrityRepository,
    CelebrityStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn celebrities(&self) -> Arc<dyn CelebrityRepository>;

    fn bookings(&self) -> Arc<dyn BookingRepository>;

    fn admins(&self) -> Arc<dyn AdminRepository>;
}

/// Concrete implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    celebrities: Arc<dyn CelebrityRepository>,
    bookings: Arc<dyn BookingRepository>,
    admins: Arc<dyn AdminRepository>,
}

impl Persistence {
    /// Register the SeaORM stores over one connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            celebrities: Arc::new(CelebrityStore::new(db.clone())),
            bookings: Arc::new(BookingStore::new(db.clone())),
            admins: Arc::new(AdminStore::new(db)),
        }
    }

    /// Register arbitrary implementations, e.g. in-memory fakes or mocks
    pub fn from_parts(
        celebrities: Arc<dyn CelebrityRepository>,
        bookings: Arc<dyn BookingRepository>,
        admins: Arc<dyn AdminRepository>,
    ) -> Self {
        Self {
            celebrities,
            bookings,
            admins,
        }
    }
}

impl UnitOfWork for Persistence {
    fn celebrities(&self) -> Arc<dyn CelebrityRepository> {
        self.celebrities.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.bookings.clone()
    }

    fn admins(&self) -> Arc<dyn AdminRepository> {
        self.admins.clone()
    }
}
