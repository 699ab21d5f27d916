//! In-process cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use parking_lot::RwLock;
use roster_core::{HealthCheck, HealthStatus, RosterError, RosterResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Process-local cache with per-entry expiry.
///
/// Expired entries are discarded lazily when they are next looked up. Time
/// comes from an injected [`Clock`] so expiry can be driven in tests.
pub struct InMemoryCacheService {
    entries: RwLock<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCacheService {
    /// Creates an empty cache on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty cache on the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of stored entries, including ones that expired but were not yet read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the live value for `key`, evicting it if it has expired.
    fn live_value(&self, key: &str) -> Option<String> {
        let now = self.clock.utc();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write();
        // Another writer may have refreshed the entry in between.
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
            debug!("Evicted expired key '{}'", key);
        }
        entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone())
    }
}

impl Default for InMemoryCacheService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        let value = self.live_value(key);
        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|e| RosterError::cache(format!("Invalid TTL for key '{}': {}", key, e)))?;
        let expires_at = self.clock.utc() + ttl;

        self.entries.write().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );

        debug!("Cached key '{}' until {}", key, expires_at);
        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> RosterResult<bool> {
        Ok(self.live_value(key).is_some())
    }
}

#[async_trait]
impl HealthCheck for InMemoryCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}

impl std::fmt::Debug for InMemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheService")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MutableClock;
    use chrono::TimeZone;

    fn cache_at_epoch() -> (Arc<MutableClock>, InMemoryCacheService) {
        let clock = Arc::new(MutableClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        let cache = InMemoryCacheService::with_clock(clock.clone());
        (clock, cache)
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let (_clock, cache) = cache_at_epoch();
        cache.set_raw("k", "\"v\"", Duration::from_secs(10)).await.unwrap();

        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("\"v\""));
        assert!(cache.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_key() {
        let (_clock, cache) = cache_at_epoch();
        assert!(cache.get_raw("absent").await.unwrap().is_none());
        assert!(!cache.exists("absent").await.unwrap());
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let (clock, cache) = cache_at_epoch();
        cache.set_raw("k", "1", Duration::from_secs(300)).await.unwrap();

        clock.advance_seconds(299);
        assert!(cache.get_raw("k").await.unwrap().is_some());

        clock.advance_seconds(1);
        assert!(cache.get_raw("k").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_expired_entry_is_kept_until_read() {
        let (clock, cache) = cache_at_epoch();
        cache.set_raw("k", "1", Duration::from_secs(5)).await.unwrap();

        clock.advance_seconds(60);
        assert_eq!(cache.len(), 1);
        assert!(!cache.exists("k").await.unwrap());
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_overwrite_resets_expiry() {
        let (clock, cache) = cache_at_epoch();
        cache.set_raw("k", "old", Duration::from_secs(10)).await.unwrap();
        clock.advance_seconds(8);
        cache.set_raw("k", "new", Duration::from_secs(10)).await.unwrap();
        clock.advance_seconds(8);

        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_delete() {
        let (_clock, cache) = cache_at_epoch();
        cache.set_raw("k", "1", Duration::from_secs(10)).await.unwrap();

        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
        assert!(cache.get_raw("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_always_healthy() {
        let (_clock, cache) = cache_at_epoch();
        assert!(cache.is_enabled());
        assert!(cache.check().await.is_healthy());
    }
}
