//! Cache Module
//!
//! Redis connection management and the cache-aside utilities used by the
//! post and comment services.
//!
//! This module provides:
//! - A generic `Cache` trait for abstracting cache operations
//! - A `RedisCache` implementation and an in-memory `MemoryCache`
//! - The persisted cache key convention (`post:<id>`, `posts:list`)
//! - Best-effort helpers that absorb cache failures
//!
//! # Consistency model
//!
//! The cache is populated lazily on read miss and invalidated synchronously
//! after every write that changes data reachable through a key. A read racing
//! a write can still re-populate a key with pre-write data after the write's
//! invalidation ran; such an entry is only corrected when its time-to-live
//! expires. That staleness window is accepted and bounded by the TTL.

mod cache_service;
mod memory;

pub use cache_service::{Cache, RedisCache};
pub use memory::MemoryCache;

use redis::aio::ConnectionManager;
use redis::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, instrument, warn};

use crate::config::RedisSettings;

/// Creates a Redis connection manager with automatic reconnection.
///
/// # Errors
/// Returns `redis::RedisError` if the initial connection fails.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_redis_client(
    settings: &RedisSettings,
) -> Result<ConnectionManager, redis::RedisError> {
    info!("Connecting to Redis...");
    let client = Client::open(settings.url.as_str())?;
    let manager = ConnectionManager::new(client).await?;
    info!("Redis connection established");
    Ok(manager)
}

/// Creates a `RedisCache` instance from configuration settings.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_redis_cache(settings: &RedisSettings) -> Result<RedisCache, redis::RedisError> {
    let conn = create_redis_client(settings).await?;
    Ok(RedisCache::new(conn))
}

/// Best-effort cache read: any backend or deserialization error is logged
/// and treated as a miss, so the caller falls back to storage. `None` cache
/// means the process runs without a cache backend.
pub async fn lookup<C, T>(cache: Option<&C>, key: &str) -> Option<T>
where
    C: Cache,
    T: DeserializeOwned + Send,
{
    let cache = cache?;
    match cache.get(key).await {
        Ok(hit) => hit,
        Err(err) => {
            warn!(key, error = %err, "cache read failed, treating as miss");
            None
        }
    }
}

/// Best-effort cache population with a time-to-live. A failure is logged and
/// swallowed; the read that produced `value` still succeeds from storage.
pub async fn store<C, T>(cache: Option<&C>, key: &str, value: &T, ttl_secs: u64)
where
    C: Cache,
    T: Serialize + Sync + Send,
{
    let Some(cache) = cache else { return };
    if let Err(err) = cache.set_ex(key, value, ttl_secs).await {
        warn!(key, error = %err, "cache population failed");
    }
}

/// Best-effort synchronous invalidation of the given keys. Runs after the
/// storage write committed and before the service call returns; failures are
/// logged, never surfaced.
pub async fn evict<C: Cache>(cache: Option<&C>, keys: &[&str]) {
    let Some(cache) = cache else { return };
    if let Err(err) = cache.delete_many(keys).await {
        warn!(?keys, error = %err, "cache invalidation failed");
    }
}

/// Cache key convention.
///
/// These names are a persisted contract other collaborators rely on; do not
/// rename them without coordinating.
pub mod keys {
    /// Key for the full materialized post collection
    pub const POSTS_LIST: &str = "posts:list";

    /// Prefix for a single materialized post (e.g., "post:\<id\>")
    pub const POST: &str = "post:";

    /// Generates the cache key for one materialized post
    #[inline]
    pub fn post(post_id: impl std::fmt::Display) -> String {
        format!("{}{}", POST, post_id)
    }
}
