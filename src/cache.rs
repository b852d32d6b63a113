use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

/// In-memory store with a fixed time-to-live per entry.
///
/// The lock only guards the map itself; it does not serialize the rebuilds
/// that feed `set`. Concurrent cache misses each rebuild independently and the
/// last `set` wins, which is the documented contract of this service.
///
/// TTL arithmetic uses `tokio::time::Instant`, so tests can pause and advance
/// the clock instead of sleeping.
pub struct TtlCache<T> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the stored value while it is younger than the TTL. A stale
    /// entry is removed, not just skipped.
    pub async fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                debug!("cache entry {:?} expired", key);
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores the value with the current timestamp, replacing any prior entry
    /// and resetting the TTL window.
    pub async fn set(&self, key: &str, value: T) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }
}
