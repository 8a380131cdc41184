//! Project configuration for regkit.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Merging in [`merger`]
//! - Validation in [`validator`]
//! - `${VAR}` expansion in [`env`]
//!
//! # Example
//!
//! ```
//! use regkit::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("components.json"),
//!     r#"{ "style": "new-york", "registries": { "@acme": "https://acme.dev/r/{name}.json" } }"#,
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! assert_eq!(config.style(), "new-york");
//! assert!(config.registries().contains_key("@acme"));
//! ```

pub mod env;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use env::{
    expand, expand_env_vars, extract_env_vars, has_env_vars, parse_env_template, strip_env_vars,
    EnvVars, Expansion, Segment,
};
pub use loader::{
    config_path, default_config, find_project_root, load_config, load_config_file, parse_config,
    resolve_alias, resolve_paths,
};
pub use merger::{deep_merge, merge_fragment_list, merge_fragments, persist_registries};
pub use schema::{
    Aliases, ComponentsConfig, Config, RegistryConfigEntry, RegistryEntry, ResolvedPaths,
    TailwindConfig, CONFIG_FILE_NAME,
};
pub use validator::{validate, validate_config, ValidationError};
