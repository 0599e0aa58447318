use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct StoredEntry {
    value: Value,
    expires_at: Instant,
}

/// Time-bounded memo of provider responses, keyed by the exact call
/// parameters. Entries live only as long as the process.
pub struct ResponseCache {
    store: Mutex<HashMap<String, StoredEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores a serializable value with the cache's default time-to-live.
    pub fn put<T: Serialize + Debug>(&self, key: &str, value: &T) -> Result<()> {
        self.put_with_ttl(key, value, self.ttl)
    }

    /// Stores a serializable value with an explicit time-to-live.
    /// Expired entries are dropped on every write.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub fn put_with_ttl<T: Serialize + Debug>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let now = Instant::now();
        let entry = StoredEntry {
            value: serde_json::to_value(value)?,
            expires_at: now + ttl,
        };

        let mut store = self.lock();
        let before = store.len();
        store.retain(|_, entry| entry.expires_at > now);
        if store.len() < before {
            tracing::debug!("Evicted {} expired entries", before - store.len());
        }
        store.insert(key.to_string(), entry);
        Ok(())
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut store = self.lock();

        let Some(entry) = store.get(key) else {
            tracing::debug!("Key not found");
            return Ok(None);
        };

        if Instant::now() < entry.expires_at {
            tracing::debug!("Key found and still fresh");
            Ok(Some(serde_json::from_value(entry.value.clone())?))
        } else {
            tracing::debug!("Key found but expired");
            store.remove(key);
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Number of stored entries, fresh or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredEntry>> {
        // mutations never leave a half-written entry, so a poisoned map is still consistent
        self.store
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
