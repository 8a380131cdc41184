//! Cache storage implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::entry::{CacheEntry, FetchResult};

/// Process-lifetime cache of registry documents keyed by final URL.
///
/// The cache stores the in-flight fetch itself, so concurrent requests for
/// the same URL share one network call. Failed fetches are evicted once
/// they complete so a later call can retry.
#[derive(Debug, Default)]
pub struct RequestCache {
    entries: Mutex<HashMap<String, Arc<CacheEntry>>>,
}

impl RequestCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<CacheEntry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached result for `key`, or run `fetch` to produce it.
    ///
    /// Callers arriving while a fetch for `key` is in flight wait for it
    /// instead of issuing their own request.
    pub fn get_or_fetch<F>(&self, key: &str, fetch: F) -> FetchResult
    where
        F: FnOnce() -> FetchResult,
    {
        let entry = {
            let mut entries = self.lock();
            Arc::clone(
                entries
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(CacheEntry::new())),
            )
        };

        let result = entry.resolve(fetch).clone();

        if result.is_err() {
            let mut entries = self.lock();
            if entries
                .get(key)
                .is_some_and(|current| Arc::ptr_eq(current, &entry))
            {
                entries.remove(key);
            }
        }

        result
    }

    /// Store a completed result directly.
    pub fn insert(&self, key: impl Into<String>, result: FetchResult) {
        self.lock()
            .insert(key.into(), Arc::new(CacheEntry::completed(result)));
    }

    /// The completed result cached for `key`, if any.
    pub fn get(&self, key: &str) -> Option<FetchResult> {
        let entry = self.lock().get(key).cloned()?;
        entry.get().cloned()
    }

    /// Whether `key` has an entry (pending or completed).
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Remove a single entry.
    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        let count = entries.len();
        entries.clear();
        tracing::debug!(count, "Cleared request cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn caches_successful_fetch() {
        let cache = RequestCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let result = cache.get_or_fetch("https://a.dev/x.json", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!({ "name": "x" }))
            });
            assert_eq!(result.unwrap()["name"], "x");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains("https://a.dev/x.json"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_fetch_is_evicted() {
        let cache = RequestCache::new();
        let calls = AtomicUsize::new(0);

        let fetch = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(RegistryError::Fetch {
                url: "https://a.dev/x.json".into(),
                status: Some(500),
                body: None,
            })
        };

        assert!(cache.get_or_fetch("k", fetch).is_err());
        assert!(!cache.contains("k"));
        assert!(cache.get_or_fetch("k", fetch).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clear_forces_refetch() {
        let cache = RequestCache::new();
        let calls = AtomicUsize::new(0);
        let fetch = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!(1))
        };

        cache.get_or_fetch("k", fetch).unwrap();
        cache.get_or_fetch("k", fetch).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        cache.get_or_fetch("k", fetch).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_callers_share_one_fetch() {
        let cache = RequestCache::new();
        let calls = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let result = cache.get_or_fetch("shared", || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(Duration::from_millis(50));
                        Ok(json!("done"))
                    });
                    assert_eq!(result.unwrap(), json!("done"));
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn insert_and_get() {
        let cache = RequestCache::new();
        assert!(cache.get("k").is_none());
        cache.insert("k", Ok(json!({ "a": 1 })));
        assert_eq!(cache.get("k").unwrap().unwrap()["a"], 1);
        assert!(cache.remove("k"));
        assert!(!cache.remove("k"));
    }
}
