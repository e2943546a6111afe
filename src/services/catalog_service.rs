//! Catalog service - celebrity profiles, slugs and the featured list.
//!
//! Slug uniqueness is probed against the store and then enforced by the
//! unique index; a write that loses a race is retried with a fresh probe.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{FEATURED_CELEBRITY_LIMIT, MAX_SLUG_ATTEMPTS};
use crate::domain::{
    generate_slug, slug_candidate, Celebrity, CelebrityFilter, CreateCelebrity, UpdateCelebrity,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{FeaturedCache, UnitOfWork};
use crate::types::{PageRequest, PaginationMeta};

/// One page of the catalog plus every known profession
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CelebrityPage {
    pub items: Vec<Celebrity>,
    pub pagination: PaginationMeta,
    pub professions: Vec<String>,
}

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list(&self, filter: CelebrityFilter, page: PageRequest) -> AppResult<CelebrityPage>;

    async fn get(&self, id: Uuid) -> AppResult<Celebrity>;

    async fn get_by_slug(&self, slug: &str) -> AppResult<Celebrity>;

    /// Up to four featured celebrities, or the newest ones when none is featured
    async fn featured(&self) -> AppResult<Vec<Celebrity>>;

    async fn create(&self, input: CreateCelebrity) -> AppResult<Celebrity>;

    /// Partial edit; a rename renegotiates the slug
    async fn update(&self, id: Uuid, input: UpdateCelebrity) -> AppResult<Celebrity>;

    /// Hard delete. Bookings that reference the celebrity are left alone.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct Catalog<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Option<Arc<dyn FeaturedCache>>,
}

impl<U: UnitOfWork> Catalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow, cache: None }
    }

    /// Serve the featured list through a cache
    pub fn with_cache(mut self, cache: Arc<dyn FeaturedCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// First candidate (`base`, `base-1`, `base-2`, ...) no other celebrity holds.
    async fn resolve_slug(&self, base: &str, exclude: Option<Uuid>) -> AppResult<String> {
        let repo = self.uow.celebrities();
        let mut attempt = 0;
        loop {
            let candidate = slug_candidate(base, attempt);
            if !repo.slug_exists(&candidate, exclude).await? {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }

    async fn load_featured(&self) -> AppResult<Vec<Celebrity>> {
        let repo = self.uow.celebrities();
        let featured = repo.featured(FEATURED_CELEBRITY_LIMIT).await?;
        if !featured.is_empty() {
            return Ok(featured);
        }
        repo.recent(FEATURED_CELEBRITY_LIMIT).await
    }

    async fn invalidate_featured(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate_featured().await {
                tracing::warn!(error = %e, "Failed to invalidate featured cache");
            }
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for Catalog<U> {
    async fn list(&self, filter: CelebrityFilter, page: PageRequest) -> AppResult<CelebrityPage> {
        let repo = self.uow.celebrities();
        let (items, total) = repo.list(&filter, page).await?;
        let professions = repo.professions().await?;

        Ok(CelebrityPage {
            items,
            pagination: PaginationMeta::new(page, total),
            professions,
        })
    }

    async fn get(&self, id: Uuid) -> AppResult<Celebrity> {
        self.uow
            .celebrities()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Celebrity")
    }

    async fn get_by_slug(&self, slug: &str) -> AppResult<Celebrity> {
        self.uow
            .celebrities()
            .find_by_slug(slug)
            .await?
            .ok_or_not_found("Celebrity")
    }

    async fn featured(&self) -> AppResult<Vec<Celebrity>> {
        let Some(cache) = &self.cache else {
            return self.load_featured().await;
        };

        match cache.get_featured().await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Featured cache read failed, reading store"),
        }

        let featured = self.load_featured().await?;
        if let Err(e) = cache.set_featured(&featured).await {
            tracing::warn!(error = %e, "Failed to populate featured cache");
        }
        Ok(featured)
    }

    async fn create(&self, input: CreateCelebrity) -> AppResult<Celebrity> {
        input.validate()?;
        let base = generate_slug(&input.name);
        let repo = self.uow.celebrities();

        let mut attempts = 0;
        let created = loop {
            attempts += 1;
            let slug = self.resolve_slug(&base, None).await?;
            let celebrity = Celebrity::new(input.clone(), slug, Utc::now())?;

            match repo.create(celebrity).await {
                Err(AppError::Conflict(_)) if attempts < MAX_SLUG_ATTEMPTS => {
                    tracing::warn!(slug_base = %base, attempts, "Slug taken concurrently, retrying");
                }
                result => break result?,
            }
        };

        tracing::info!(celebrity_id = %created.id, slug = %created.slug, "Celebrity created");
        self.invalidate_featured().await;
        Ok(created)
    }

    async fn update(&self, id: Uuid, input: UpdateCelebrity) -> AppResult<Celebrity> {
        input.validate()?;
        let repo = self.uow.celebrities();
        let existing = repo.find_by_id(id).await?.ok_or_not_found("Celebrity")?;

        let renamed_base = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| *name != existing.name)
            .map(generate_slug);

        let mut attempts = 0;
        let updated = loop {
            attempts += 1;
            let mut celebrity = existing.clone();
            celebrity.apply_update(input.clone(), Utc::now())?;
            if let Some(base) = &renamed_base {
                celebrity.slug = self.resolve_slug(base, Some(id)).await?;
            }

            match repo.update(celebrity).await {
                Err(AppError::Conflict(_))
                    if renamed_base.is_some() && attempts < MAX_SLUG_ATTEMPTS =>
                {
                    tracing::warn!(celebrity_id = %id, attempts, "Slug taken concurrently, retrying");
                }
                result => break result?,
            }
        };

        self.invalidate_featured().await;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.celebrities().delete(id).await?;
        tracing::info!(celebrity_id = %id, "Celebrity deleted");
        self.invalidate_featured().await;
        Ok(())
    }
}
