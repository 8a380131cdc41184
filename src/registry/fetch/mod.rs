//! Registry document fetching.
//!
//! [`RegistryClient`] fetches remote documents over HTTP through a shared
//! [`RequestCache`] and reads local documents from disk. Batches are fetched
//! concurrently, one scoped thread per target.

pub mod http;
pub mod local;

pub use http::{status_error, HttpFetcher};
pub use local::{expand_local_path, read_local};

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crate::cache::{FetchResult, RequestCache};
use crate::error::RegistryError;
use crate::registry::builder::RegistryRequest;

/// Something to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    /// A built HTTP request.
    Remote(RegistryRequest),
    /// A local document path (may be `~/`-relative).
    Local(String),
}

impl FetchTarget {
    /// The cache key (final URL) or path of the target.
    pub fn key(&self) -> &str {
        match self {
            Self::Remote(request) => &request.url,
            Self::Local(path) => path,
        }
    }
}

/// Per-call fetch options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Reuse and populate the request cache.
    pub use_cache: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { use_cache: true }
    }
}

/// Fetches registry documents, remote or local.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: HttpFetcher,
    cache: Arc<RequestCache>,
    cwd: PathBuf,
}

impl RegistryClient {
    /// Create a client with a fresh cache. Local paths resolve against `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self::with_cache(cwd, Arc::new(RequestCache::new()))
    }

    /// Create a client sharing an existing cache.
    pub fn with_cache(cwd: impl Into<PathBuf>, cache: Arc<RequestCache>) -> Self {
        Self {
            http: HttpFetcher::new(),
            cache,
            cwd: cwd.into(),
        }
    }

    /// Replace the HTTP fetcher (e.g. for a different timeout).
    pub fn with_http(mut self, http: HttpFetcher) -> Self {
        self.http = http;
        self
    }

    pub fn cache(&self) -> &Arc<RequestCache> {
        &self.cache
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Fetch one target, propagating any error.
    ///
    /// Local documents are never cached.
    pub fn fetch(&self, target: &FetchTarget, options: FetchOptions) -> FetchResult {
        match target {
            FetchTarget::Local(path) => read_local(path, &self.cwd),
            FetchTarget::Remote(request) if options.use_cache => self
                .cache
                .get_or_fetch(&request.url, || self.http.fetch(request)),
            FetchTarget::Remote(request) => self.http.fetch(request),
        }
    }

    /// Fetch every target concurrently, keeping each result in input order.
    pub fn fetch_all(&self, targets: &[FetchTarget], options: FetchOptions) -> Vec<FetchResult> {
        if targets.len() <= 1 {
            return targets
                .iter()
                .map(|target| self.fetch(target, options))
                .collect();
        }

        thread::scope(|scope| {
            let handles: Vec<_> = targets
                .iter()
                .map(|target| (target, scope.spawn(move || self.fetch(target, options))))
                .collect();

            handles
                .into_iter()
                .map(|(target, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(RegistryError::Fetch {
                            url: target.key().to_string(),
                            status: None,
                            body: Some("fetch thread panicked".to_string()),
                        })
                    })
                })
                .collect()
        })
    }

    /// Best-effort batch fetch: failed slots are logged and left empty.
    pub fn fetch_batch(&self, targets: &[FetchTarget], options: FetchOptions) -> Vec<Option<Value>> {
        self.fetch_all(targets, options)
            .into_iter()
            .zip(targets)
            .map(|(result, target)| match result {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key = target.key(), code = %e.code(), "Skipping failed fetch: {e}");
                    None
                }
            })
            .collect()
    }

    /// Drop every cached document.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn target_keys() {
        let remote = FetchTarget::Remote(RegistryRequest::new("https://r.dev/x.json"));
        assert_eq!(remote.key(), "https://r.dev/x.json");
        assert_eq!(FetchTarget::Local("./x.json".into()).key(), "./x.json");
    }

    #[test]
    fn cache_is_on_by_default() {
        assert!(FetchOptions::default().use_cache);
    }

    #[test]
    fn batch_keeps_order_and_nulls_failures() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.json"), r#"{"name":"a"}"#).unwrap();
        fs::write(temp.path().join("c.json"), r#"{"name":"c"}"#).unwrap();

        let client = RegistryClient::new(temp.path());
        let targets = vec![
            FetchTarget::Local("a.json".into()),
            FetchTarget::Local("b.json".into()),
            FetchTarget::Local("c.json".into()),
        ];

        let results = client.fetch_batch(&targets, FetchOptions::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()["name"], "a");
        assert!(results[1].is_none());
        assert_eq!(results[2].as_ref().unwrap()["name"], "c");
    }

    #[test]
    fn local_documents_bypass_cache() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.json"), r#"{"name":"a"}"#).unwrap();

        let client = RegistryClient::new(temp.path());
        client
            .fetch(&FetchTarget::Local("a.json".into()), FetchOptions::default())
            .unwrap();
        assert!(client.cache().is_empty());
    }
}
