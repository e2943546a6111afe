//! Redis cache implementation.
//!
//! JSON values under string keys, plus the fixed-window counters used for
//! rate limiting and the featured-celebrity cache.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{
    Config, CACHE_KEY_FEATURED_CELEBRITIES, CACHE_PREFIX_RATE_LIMIT, DEFAULT_CACHE_TTL_SECONDS,
    FEATURED_CACHE_TTL_SECONDS,
};
use super::health::HealthProbe;
use crate::domain::Celebrity;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cache of the public featured-celebrities list.
///
/// Implemented by [`Cache`]; the catalog service only sees this trait so it
/// runs without Redis in tests.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FeaturedCache: Send + Sync {
    async fn get_featured(&self) -> AppResult<Option<Vec<Celebrity>>>;

    async fn set_featured(&self, celebrities: &[Celebrity]) -> AppResult<()>;

    async fn invalidate_featured(&self) -> AppResult<()>;
}

/// Fixed-window request counter.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one request for `identifier`; returns the count so far and
    /// whether it is still within `max_requests`.
    async fn hit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)>;
}

/// Redis cache wrapper over a multiplexed connection manager.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    default_ttl: u64,
}

impl Cache {
    /// Connect to Redis.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        })
    }

    /// Get a value from cache.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json).map_err(|e| {
                    AppError::internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with default TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Set a value in cache with custom TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Delete a value from cache.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    /// Round-trip to Redis for health checks.
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }

    /// Count a request against a fixed window.
    ///
    /// Returns the count so far and whether it is within `max_requests`. The
    /// window starts with the first request and expires after
    /// `window_seconds`.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let (count,): (i64,) = rate_limit_pipeline(&key, window_seconds)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        let count = count.max(0) as u64;
        Ok((count, count <= max_requests))
    }
}

#[async_trait]
impl FeaturedCache for Cache {
    async fn get_featured(&self) -> AppResult<Option<Vec<Celebrity>>> {
        self.get(CACHE_KEY_FEATURED_CELEBRITIES).await
    }

    async fn set_featured(&self, celebrities: &[Celebrity]) -> AppResult<()> {
        self.set_with_ttl(
            CACHE_KEY_FEATURED_CELEBRITIES,
            &celebrities,
            FEATURED_CACHE_TTL_SECONDS,
        )
        .await
    }

    async fn invalidate_featured(&self) -> AppResult<()> {
        self.delete(CACHE_KEY_FEATURED_CELEBRITIES).await
    }
}

#[async_trait]
impl RateLimiter for Cache {
    async fn hit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        self.check_rate_limit(identifier, max_requests, window_seconds)
            .await
    }
}

#[async_trait]
impl HealthProbe for Cache {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn check(&self) -> AppResult<()> {
        self.ping().await
    }
}

/// SET NX EX opens the window with its expiry in the same MULTI as the INCR,
/// so a counter never exists without a TTL.
fn rate_limit_pipeline(key: &str, window_seconds: u64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET")
        .arg(key)
        .arg(0)
        .arg("EX")
        .arg(window_seconds)
        .arg("NX")
        .ignore()
        .incr(key, 1);
    pipe
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys() {
        assert_eq!(CACHE_PREFIX_RATE_LIMIT, "rate_limit:");
        assert_eq!(CACHE_KEY_FEATURED_CELEBRITIES, "celebrities:featured");
    }

    #[test]
    fn test_rate_limit_window_is_set_atomically() {
        let packed = rate_limit_pipeline("rate_limit:auth:1.2.3.4", 60).get_packed_pipeline();
        let text = String::from_utf8_lossy(&packed);

        assert!(text.starts_with("*1\r\n$5\r\nMULTI"));
        assert!(text.contains("$2\r\nNX"));
        assert!(text.trim_end().ends_with("EXEC"));
        let set = text.find("$3\r\nSET").unwrap();
        let incr = text.find("$4\r\nINCR").unwrap();
        assert!(set < incr);
    }

    #[tokio::test]
    async fn test_mock_rate_limiter_denies_over_limit() {
        let mut limiter = MockRateLimiter::new();
        limiter
            .expect_hit()
            .returning(|_, max, _| Ok((max + 1, false)));

        let (count, allowed) = limiter.hit("general:1.2.3.4", 10, 60).await.unwrap();
        assert_eq!(count, 11);
        assert!(!allowed);
    }

    #[tokio::test]
    async fn test_mock_featured_cache_miss() {
        let mut cache = MockFeaturedCache::new();
        cache.expect_get_featured().returning(|| Ok(None));

        assert!(cache.get_featured().await.unwrap().is_none());
    }
}
