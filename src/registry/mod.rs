//! Component registries.
//!
//! This module turns component references into registry items:
//!
//! - [`reference`] classifies reference strings
//! - [`builder`] builds URLs and headers from the registry table
//! - [`fetch`] retrieves documents over HTTP or from disk
//! - [`resolver`] ties the above together behind [`Registry`]
//! - [`graph`] expands references into their transitive closure
//! - [`tree`] merges the closure into a [`ResolvedItemSet`]
//! - [`namespaces`] discovers which registries a request touches
//!
//! # Resolution Order
//!
//! References are classified in this order (first match wins):
//! 1. Absolute URL
//! 2. Local file path
//! 3. `@namespace/name`
//! 4. Bare name, resolved through the built-in `@shadcn` registry
//!
//! # Example
//!
//! ```
//! use regkit::config::{ComponentsConfig, Config, EnvVars};
//! use regkit::registry::{FetchTarget, Registry, RegistrySettings};
//!
//! let registry = Registry::new(
//!     Config::new(ComponentsConfig::default()),
//!     RegistrySettings::from_env(EnvVars::new()),
//! );
//!
//! match registry.resolve_target("button").unwrap() {
//!     FetchTarget::Remote(request) => {
//!         assert_eq!(request.url, "https://ui.shadcn.com/r/styles/new-york/button.json");
//!     }
//!     FetchTarget::Local(_) => unreachable!(),
//! }
//! ```

pub mod builder;
pub mod builtin;
pub mod fetch;
pub mod graph;
pub mod item;
pub mod namespaces;
pub mod reference;
pub mod resolver;
pub mod theme;
pub mod tree;

// Re-exports
pub use builder::{build_headers, build_request, build_url, RegistryRequest};
pub use builtin::{BUILTIN_NAMESPACE, DEFAULT_REGISTRY_URL};
pub use fetch::{FetchOptions, FetchTarget, HttpFetcher, RegistryClient};
pub use graph::{resolve_graph, GraphResolution, ResolvedNode};
pub use item::{ItemType, RegistryItem, RegistryItemFile, ResolvedItemSet};
pub use namespaces::{discover_namespaces, ensure_registries_configured};
pub use reference::RegistryReference;
pub use resolver::{parse_item, BareStyle, Registry, RegistrySettings};
pub use tree::{build_resolved_item_set, resolve_registry_tree};
