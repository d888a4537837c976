//! In-memory query cache with per-entry revalidation windows.
//!
//! Caching is a performance hint only; a miss always falls through to the
//! content store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;
use sha2::{Digest, Sha256};

/// How a query result may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve from cache until the entry is older than the window.
    Revalidate(Duration),
    /// Always fetch; never store.
    NoStore,
}

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

/// Query results keyed by a digest of query text and parameters.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable key for a query and its parameters.
    pub fn key(query: &str, params: &[(&str, &str)]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(query.as_bytes());
        for (name, value) in params {
            hasher.update([0u8]);
            hasher.update(name.as_bytes());
            hasher.update([b'=']);
            hasher.update(value.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// A fresh cached value, if the policy allows reuse.
    pub fn get(&self, key: &str, policy: CachePolicy) -> Option<Value> {
        if policy == CachePolicy::NoStore {
            return None;
        }
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.is_fresh(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value under the policy's window.
    pub fn put(&self, key: String, value: Value, policy: CachePolicy) {
        let CachePolicy::Revalidate(ttl) = policy else {
            return;
        };
        if ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HOUR: CachePolicy = CachePolicy::Revalidate(Duration::from_secs(3600));

    #[test]
    fn test_key_depends_on_params() {
        let a = QueryCache::key("*[_type == $t]", &[("t", "\"project\"")]);
        let b = QueryCache::key("*[_type == $t]", &[("t", "\"article\"")]);
        assert_ne!(a, b);
        assert_eq!(a, QueryCache::key("*[_type == $t]", &[("t", "\"project\"")]));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_put_then_get() {
        let cache = QueryCache::new();
        cache.put("k".into(), json!([1, 2]), HOUR);
        assert_eq!(cache.get("k", HOUR), Some(json!([1, 2])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_no_store_bypasses_cache() {
        let cache = QueryCache::new();
        cache.put("k".into(), json!(1), CachePolicy::NoStore);
        assert!(cache.is_empty());

        cache.put("k".into(), json!(1), HOUR);
        assert_eq!(cache.get("k", CachePolicy::NoStore), None);
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = QueryCache::new();
        cache.put(
            "k".into(),
            json!(1),
            CachePolicy::Revalidate(Duration::from_millis(1)),
        );
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("k", HOUR), None);
        assert!(cache.is_empty());
    }
}
