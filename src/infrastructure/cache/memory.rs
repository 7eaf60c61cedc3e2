//! In-memory `Cache` implementation.
//!
//! TTL-respecting map-backed cache. Used by the test suites and usable as a
//! process-local fallback; it is not shared across instances.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};

use crate::shared::error::AppError;

use super::Cache;

struct Entry {
    data: String,
    expires_at: Instant,
}

/// Map-backed cache with per-entry expiry, checked on read.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.lock().values().filter(|e| e.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a live entry exists for the key.
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .lock()
            .get(key)
            .is_some_and(|e| e.expires_at > now)
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, AppError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                let value = serde_json::from_str(&entry.data).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization failed: {}", e))
                })?;
                Ok(Some(value))
            }
            Some(_) => {
                // Lazily evict expired entries
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_ex<T: Serialize + Sync + Send>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), AppError> {
        let data = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Cache serialization failed: {}", e)))?;
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                data,
                expires_at: Instant::now() + Duration::from_secs(seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.entries.lock().remove(key).is_some())
    }

    async fn delete_many(&self, keys: &[&str]) -> Result<u64, AppError> {
        let mut entries = self.entries.lock();
        Ok(keys.iter().filter(|k| entries.remove(**k).is_some()).count() as u64)
    }
}
