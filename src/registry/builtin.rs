//! Built-in registries.
//!
//! `@shadcn` is always available and serves the default catalog. Its base
//! URL can be overridden with the `REGISTRY_URL` environment variable.

use std::collections::BTreeMap;

use crate::config::{EnvVars, RegistryConfigEntry};

/// Default catalog base URL.
pub const DEFAULT_REGISTRY_URL: &str = "https://ui.shadcn.com/r";

/// Environment variable overriding [`DEFAULT_REGISTRY_URL`].
pub const REGISTRY_URL_ENV: &str = "REGISTRY_URL";

/// Namespace of the built-in catalog.
pub const BUILTIN_NAMESPACE: &str = "@shadcn";

/// Base URL of the default catalog, without a trailing slash.
pub fn registry_url(env: &EnvVars) -> String {
    env.get(REGISTRY_URL_ENV)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_REGISTRY_URL)
        .trim_end_matches('/')
        .to_string()
}

/// URL template of the default catalog.
pub fn builtin_template(base_url: &str) -> String {
    format!("{base_url}/styles/{{style}}/{{name}}.json")
}

/// The built-in registry table for a base URL.
pub fn builtin_registries(base_url: &str) -> BTreeMap<String, RegistryConfigEntry> {
    let mut registries = BTreeMap::new();
    registries.insert(
        BUILTIN_NAMESPACE.to_string(),
        RegistryConfigEntry::Template(builtin_template(base_url)),
    );
    registries
}

/// Whether a namespace is built in.
pub fn is_builtin(namespace: &str) -> bool {
    namespace == BUILTIN_NAMESPACE
}

/// URL of the registries index (namespace -> URL template).
pub fn registries_index_url(base_url: &str) -> String {
    format!("{base_url}/registries.json")
}

/// URL of a base color document.
pub fn base_color_url(base_url: &str, base_color: &str) -> String {
    format!("{base_url}/colors/{base_color}.json")
}

/// URL of the icon map.
pub fn icons_url(base_url: &str) -> String {
    format!("{base_url}/icons/index.json")
}
