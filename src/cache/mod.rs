//! In-memory request caching.
//!
//! Registry documents are cached by final URL for the lifetime of the
//! process. The cache is an explicit object handed to the fetch layer and
//! can be cleared at any time.

pub mod entry;
pub mod store;

pub use entry::{CacheEntry, FetchResult};
pub use store::RequestCache;
