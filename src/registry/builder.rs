//! Registry URL and header construction.
//!
//! Turns a registry table entry plus an item name into a concrete request:
//! `{name}` and `{style}` are substituted, `${VAR}` references expanded,
//! query params appended and headers filtered.

use reqwest::Url;

use crate::config::{expand_env_vars, extract_env_vars, has_env_vars, strip_env_vars};
use crate::config::{EnvVars, RegistryConfigEntry};
use crate::error::RegistryError;

/// A fully resolved fetch request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistryRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RegistryRequest {
    /// A request without headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }
}

/// Build the request for `name` from a registry entry.
///
/// Every `${VAR}` referenced by the entry must be set; otherwise this fails
/// with [`RegistryError::MissingEnvVars`] listing all missing names.
pub fn build_request(
    registry: &str,
    name: &str,
    entry: &RegistryConfigEntry,
    style: Option<&str>,
    env: &EnvVars,
) -> Result<RegistryRequest, RegistryError> {
    validate_registry_env(registry, entry, env)?;

    Ok(RegistryRequest {
        url: build_url(name, entry, style, env),
        headers: build_headers(entry, env),
    })
}

/// Substitute placeholders, expand variables and append query params.
///
/// Params whose expanded value is empty are skipped.
pub fn build_url(
    name: &str,
    entry: &RegistryConfigEntry,
    style: Option<&str>,
    env: &EnvVars,
) -> String {
    let mut url = entry.url().replace("{name}", name);
    if let Some(style) = style {
        url = url.replace("{style}", style);
    }
    let url = expand_env_vars(&url, env);

    let params: Vec<(String, String)> = entry
        .params()
        .iter()
        .filter_map(|(key, template)| {
            let value = expand_env_vars(template, env);
            (!value.is_empty()).then(|| (key.clone(), value))
        })
        .collect();

    append_query(&url, &params)
}

fn append_query(url: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }

    match Url::parse(url) {
        Ok(mut parsed) => {
            {
                let mut query = parsed.query_pairs_mut();
                for (key, value) in params {
                    query.append_pair(key, value);
                }
            }
            parsed.to_string()
        }
        Err(_) => {
            let separator = if url.contains('?') { '&' } else { '?' };
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{url}{separator}{}", query.join("&"))
        }
    }
}

/// Expand header templates, dropping headers that end up empty.
pub fn build_headers(entry: &RegistryConfigEntry, env: &EnvVars) -> Vec<(String, String)> {
    entry
        .headers()
        .iter()
        .filter_map(|(key, template)| {
            let value = expand_env_vars(template, env);
            should_include_header(template, &value).then(|| (key.clone(), value))
        })
        .collect()
}

/// Whether an expanded header value is worth sending.
///
/// Blank values are dropped. A templated value is also dropped when every
/// variable expanded to nothing, e.g. `Bearer ${TOKEN}` with `TOKEN` unset
/// leaves only `Bearer`.
pub fn should_include_header(template: &str, expanded: &str) -> bool {
    let trimmed = expanded.trim();
    if trimmed.is_empty() {
        return false;
    }

    if has_env_vars(template) {
        let literal = strip_env_vars(template);
        if trimmed == literal.trim() {
            return false;
        }
    }

    true
}

/// Every variable an entry references, in first-reference order.
pub fn required_env_vars(entry: &RegistryConfigEntry) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    let templates = std::iter::once(entry.url())
        .chain(entry.params().iter().map(|(_, v)| v.as_str()))
        .chain(entry.headers().iter().map(|(_, v)| v.as_str()));

    for template in templates {
        for name in extract_env_vars(template) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    names
}

/// Fail if any variable referenced by `entry` is unset or empty.
pub fn validate_registry_env(
    registry: &str,
    entry: &RegistryConfigEntry,
    env: &EnvVars,
) -> Result<(), RegistryError> {
    let missing: Vec<String> = required_env_vars(entry)
        .into_iter()
        .filter(|name| !env.is_set(name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RegistryError::MissingEnvVars {
            registry: registry.to_string(),
            names: missing,
        })
    }
}
