//! A single cached fetch.

use serde_json::Value;
use std::sync::OnceLock;

use crate::error::RegistryError;

/// Outcome of fetching one registry document.
pub type FetchResult = Result<Value, RegistryError>;

/// A fetch slot shared by every caller asking for the same key.
///
/// The first caller runs the fetch; concurrent callers block until it
/// completes and then observe the same result.
#[derive(Debug, Default)]
pub struct CacheEntry {
    cell: OnceLock<FetchResult>,
}

impl CacheEntry {
    /// Create an empty (in-flight or not yet started) entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entry that is already resolved.
    pub fn completed(result: FetchResult) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(result);
        Self { cell }
    }

    /// Run `fetch` unless another caller already did, returning the result.
    pub fn resolve<F>(&self, fetch: F) -> &FetchResult
    where
        F: FnOnce() -> FetchResult,
    {
        self.cell.get_or_init(fetch)
    }

    /// The result, if the fetch has completed.
    pub fn get(&self) -> Option<&FetchResult> {
        self.cell.get()
    }

    /// Whether the fetch completed successfully.
    pub fn is_ok(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }
}
