//! Cache Service
//!
//! Generic cache trait and Redis implementation for the cache-aside read
//! path over materialized posts.
//!
//! This module provides:
//! - A `Cache` trait defining the operations the services perform
//! - A `RedisCache` implementation using Redis as the backing store
//! - JSON serialization/deserialization for complex types
//!
//! # Example
//!
//! ```rust,ignore
//! use comments_server::infrastructure::cache::{Cache, RedisCache};
//!
//! let cache = RedisCache::new(redis_connection);
//!
//! // Store a materialized post for five minutes
//! cache.set_ex("post:123", &post, 300).await?;
//!
//! // Retrieve it
//! let post: Option<Post> = cache.get("post:123").await?;
//! ```

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::shared::error::AppError;

/// Generic cache trait for abstracting cache operations.
///
/// Allows different backend implementations (Redis, in-memory, etc.). All
/// operations are async and return `Result<T, AppError>`; callers on the
/// request path are expected to absorb these errors, never surface them.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Retrieves a value from the cache by key.
    ///
    /// # Returns
    /// * `Ok(Some(T))` - If the key exists and deserialization succeeds
    /// * `Ok(None)` - If the key does not exist
    /// * `Err(AppError)` - If a cache or deserialization error occurs
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, AppError>;

    /// Stores a value in the cache with an expiration time.
    ///
    /// # Arguments
    /// * `key` - The cache key
    /// * `value` - The value to store (must implement Serialize)
    /// * `seconds` - Time-to-live in seconds
    async fn set_ex<T: Serialize + Sync + Send>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), AppError>;

    /// Deletes a key from the cache.
    ///
    /// # Returns
    /// * `Ok(true)` - If the key existed and was deleted
    /// * `Ok(false)` - If the key did not exist
    async fn delete(&self, key: &str) -> Result<bool, AppError>;

    /// Deletes multiple keys from the cache.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of keys that were deleted
    async fn delete_many(&self, keys: &[&str]) -> Result<u64, AppError>;
}

/// Redis-backed cache implementation.
///
/// Uses a Redis ConnectionManager for efficient connection pooling and
/// automatic reconnection handling.
#[derive(Clone)]
pub struct RedisCache {
    /// Redis connection manager with automatic reconnection
    conn: ConnectionManager,
    /// Optional key prefix for namespacing
    prefix: Option<Arc<str>>,
}

impl RedisCache {
    /// Creates a new RedisCache instance.
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn, prefix: None }
    }

    /// Creates a new RedisCache instance with a key prefix.
    ///
    /// All keys will be automatically prefixed, useful for sharing one Redis
    /// between deployments.
    ///
    /// # Example
    /// ```rust,ignore
    /// let cache = RedisCache::with_prefix(conn, "comments:v1:");
    /// // key "post:123" becomes "comments:v1:post:123"
    /// ```
    pub fn with_prefix(conn: ConnectionManager, prefix: impl Into<Arc<str>>) -> Self {
        Self {
            conn,
            prefix: Some(prefix.into()),
        }
    }

    /// Formats a key with the optional prefix.
    fn format_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, key),
            None => key.to_string(),
        }
    }

    /// Serializes a value to JSON string.
    fn serialize<T: Serialize>(value: &T) -> Result<String, AppError> {
        serde_json::to_string(value).map_err(|e| {
            warn!("Cache serialization error: {}", e);
            AppError::Internal(format!("Cache serialization failed: {}", e))
        })
    }

    /// Deserializes a JSON string to the target type.
    fn deserialize<T: DeserializeOwned>(data: &str) -> Result<T, AppError> {
        serde_json::from_str(data).map_err(|e| {
            warn!("Cache deserialization error: {}", e);
            AppError::Internal(format!("Cache deserialization failed: {}", e))
        })
    }
}

#[async_trait]
impl Cache for RedisCache {
    #[instrument(skip(self), level = "debug")]
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, AppError> {
        let full_key = self.format_key(key);
        let mut conn = self.conn.clone();

        let result: Option<String> = conn.get(&full_key).await?;

        match result {
            Some(data) => {
                debug!(key = %full_key, "Cache hit");
                let value = Self::deserialize(&data)?;
                Ok(Some(value))
            }
            None => {
                debug!(key = %full_key, "Cache miss");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_ex<T: Serialize + Sync + Send>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), AppError> {
        let full_key = self.format_key(key);
        let data = Self::serialize(value)?;
        let mut conn = self.conn.clone();

        let _: () = conn.set_ex(&full_key, data, seconds).await?;
        debug!(key = %full_key, ttl = seconds, "Cache set with expiry");

        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        let full_key = self.format_key(key);
        let mut conn = self.conn.clone();

        let deleted: u64 = conn.del(&full_key).await?;
        let existed = deleted > 0;

        debug!(key = %full_key, deleted = existed, "Cache delete");

        Ok(existed)
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_many(&self, keys: &[&str]) -> Result<u64, AppError> {
        if keys.is_empty() {
            return Ok(0);
        }

        let full_keys: Vec<String> = keys.iter().map(|k| self.format_key(k)).collect();
        let mut conn = self.conn.clone();

        let deleted: u64 = conn.del(full_keys.as_slice()).await?;
        debug!(count = deleted, "Cache delete many");

        Ok(deleted)
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
