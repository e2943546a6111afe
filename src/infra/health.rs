//! Liveness checks for the health endpoint.

use async_trait::async_trait;

use super::db::Database;
use crate::errors::AppResult;

/// A dependency the health endpoint reports on
#[async_trait]
pub trait HealthProbe: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> AppResult<()>;
}

#[async_trait]
impl HealthProbe for Database {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> AppResult<()> {
        self.ping().await?;
        Ok(())
    }
}
