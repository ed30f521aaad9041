//! Entity caching with per-kind TTL and in-flight coalescing.
//!
//! This module provides a process-local entity cache using Moka for
//! concurrent access with built-in TTL-based eviction.
//!
//! # Architecture
//!
//! The cache uses Moka's async Cache which provides:
//! - Lock-free concurrent reads
//! - Automatic TTL-based eviction
//! - Memory-bounded storage
//!
//! TTLs are per entity kind: users and groups expire quickly (membership
//! changes), badges/passes/assets are near-static and live much longer.
//!
//! # Coalescing
//!
//! [`EntityCache::get_or_load`] guarantees at most one in-flight loader per
//! `(kind, id)` key: concurrent callers for the same key await the same
//! in-progress load instead of issuing duplicate fetches. A failed load is
//! not cached; the next caller runs the loader again.
//!
//! # Thread Safety
//!
//! The cache is the only shared mutable structure in this core and can be
//! shared across evaluations without external synchronization.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use moka::Expiry;

use crate::entity::{Entity, EntityKind};
use crate::error::{DomainError, DomainResult};

/// Configuration for the entity cache.
#[derive(Debug, Clone)]
pub struct EntityCacheConfig {
    /// Maximum number of entries in the cache.
    pub max_capacity: u64,
    /// TTL for user entries (memberships change).
    pub user_ttl: Duration,
    /// TTL for group entries (rolesets change occasionally).
    pub group_ttl: Duration,
    /// TTL for badge/pass/asset entries (near-static).
    pub item_ttl: Duration,
}

impl Default for EntityCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            user_ttl: Duration::from_secs(120),
            group_ttl: Duration::from_secs(300),
            item_ttl: Duration::from_secs(3600),
        }
    }
}

impl EntityCacheConfig {
    /// Sets the maximum capacity.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Sets the TTL for user entries.
    pub fn with_user_ttl(mut self, ttl: Duration) -> Self {
        self.user_ttl = ttl;
        self
    }

    /// Sets the TTL for group entries.
    pub fn with_group_ttl(mut self, ttl: Duration) -> Self {
        self.group_ttl = ttl;
        self
    }

    /// Sets the TTL for badge/pass/asset entries.
    pub fn with_item_ttl(mut self, ttl: Duration) -> Self {
        self.item_ttl = ttl;
        self
    }
}

/// Cache key: entity kind plus id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub id: u64,
}

impl EntityKey {
    pub fn new(kind: EntityKind, id: u64) -> Self {
        Self { kind, id }
    }
}

/// Per-kind TTL policy plugged into Moka.
struct KindExpiry {
    user_ttl: Duration,
    group_ttl: Duration,
    item_ttl: Duration,
}

impl Expiry<EntityKey, Entity> for KindExpiry {
    fn expire_after_create(
        &self,
        key: &EntityKey,
        _value: &Entity,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(match key.kind {
            EntityKind::User => self.user_ttl,
            EntityKind::Group => self.group_ttl,
            EntityKind::Badge | EntityKind::GamePass | EntityKind::Asset => self.item_ttl,
        })
    }
}

/// Process-local entity cache with per-kind TTL and loader coalescing.
pub struct EntityCache {
    cache: Cache<EntityKey, Entity>,
    config: EntityCacheConfig,
}

impl std::fmt::Debug for EntityCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCache")
            .field("config", &self.config)
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

impl EntityCache {
    /// Creates a new entity cache with the given configuration.
    pub fn new(config: EntityCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(KindExpiry {
                user_ttl: config.user_ttl,
                group_ttl: config.group_ttl,
                item_ttl: config.item_ttl,
            })
            .build();

        Self { cache, config }
    }

    /// Creates a cache with default configuration, wrapped in Arc.
    pub fn new_shared(config: EntityCacheConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// Returns the configuration for this cache.
    pub fn config(&self) -> &EntityCacheConfig {
        &self.config
    }

    /// Returns the cached entity, or runs `loader` to populate the entry.
    ///
    /// At most one loader runs per key at any time; concurrent callers for
    /// the same key await the in-flight result. Loader errors are returned
    /// to every waiter and are not cached.
    ///
    /// # Metrics
    ///
    /// Records hits/misses to `rsblox_entity_cache_hits_total` and
    /// `rsblox_entity_cache_misses_total`.
    pub async fn get_or_load<F, Fut>(&self, key: EntityKey, loader: F) -> DomainResult<Entity>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = DomainResult<Entity>>,
    {
        if let Some(entity) = self.cache.get(&key).await {
            metrics::counter!("rsblox_entity_cache_hits_total").increment(1);
            return Ok(entity);
        }
        metrics::counter!("rsblox_entity_cache_misses_total").increment(1);

        self.cache
            .try_get_with(key, loader())
            .await
            .map_err(|err: Arc<DomainError>| (*err).clone())
    }

    /// Retrieves a cached entity without loading.
    pub async fn get(&self, key: &EntityKey) -> Option<Entity> {
        self.cache.get(key).await
    }

    /// Inserts an entity, replacing any existing entry atomically.
    pub async fn insert(&self, key: EntityKey, entity: Entity) {
        self.cache.insert(key, entity).await;
    }

    /// Forced refresh (`sync` path): loads a fresh value, then replaces the
    /// entry. Readers observe either the old or the new entity in full,
    /// never a partial one.
    pub async fn refresh<F, Fut>(&self, key: EntityKey, loader: F) -> DomainResult<Entity>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = DomainResult<Entity>>,
    {
        let entity = loader().await?;
        self.cache.insert(key, entity.clone()).await;
        Ok(entity)
    }

    /// Removes a single entry.
    pub async fn invalidate(&self, key: &EntityKey) {
        self.cache.invalidate(key).await;
    }

    /// Returns the approximate number of entries in the cache.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending maintenance tasks.
    ///
    /// This triggers any pending evictions. Useful for testing TTL behavior.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

/// Registers entity cache metrics descriptions.
///
/// Call once during application startup to register metric descriptions with
/// the metrics recorder; optional but gives better documentation in
/// Prometheus/Grafana.
pub fn register_entity_cache_metrics() {
    metrics::describe_counter!(
        "rsblox_entity_cache_hits_total",
        "Total number of entity cache hits"
    );
    metrics::describe_counter!(
        "rsblox_entity_cache_misses_total",
        "Total number of entity cache misses"
    );
}
