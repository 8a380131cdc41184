//! regkit - Resolve and install components from component registries.
//!
//! regkit takes component references (`button`, `@acme/card`, a URL or a
//! local JSON file), resolves them and their registry dependencies into one
//! merged item set, computes where each file belongs in the project,
//! rewrites sources for the project's conventions and writes them.
//!
//! # Modules
//!
//! - [`cache`] - Process-lifetime request cache with in-flight sharing
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `components.json` loading, validation and merging
//! - [`detection`] - Framework and project layout detection
//! - [`error`] - Error types and result aliases
//! - [`files`] - Destination resolution, deduplication and writing
//! - [`install`] - The end-to-end `add` workflow
//! - [`registry`] - Reference parsing, fetching and graph resolution
//! - [`transform`] - Source rewriting applied before writing
//! - [`ui`] - Prompts, spinners and terminal output
//!
//! # Example
//!
//! ```
//! use regkit::registry::RegistryReference;
//!
//! let reference = RegistryReference::parse("@acme/button");
//! assert_eq!(reference.namespace(), Some("@acme"));
//! assert_eq!(reference.item_name(), "button");
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod files;
pub mod install;
pub mod registry;
pub mod transform;
pub mod ui;

pub use error::{RegistryError, RegkitError, Result};
