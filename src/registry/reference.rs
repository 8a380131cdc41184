//! Reference parsing.
//!
//! A reference is what a user (or a `registryDependencies` entry) names:
//!
//! | Input | Classification |
//! |---|---|
//! | `button` | [`RegistryReference::Bare`] |
//! | `@acme/button` | [`RegistryReference::Namespaced`] |
//! | `https://acme.dev/r/button.json` | [`RegistryReference::Url`] |
//! | `./button.json`, `~/x.json`, `/abs/x.json`, `x.json` | [`RegistryReference::LocalPath`] |

use regex::Regex;
use reqwest::Url;
use std::fmt;
use std::sync::LazyLock;

/// `@namespace/item`: the namespace is `@` plus alphanumerics, with `-` and
/// `_` allowed inside.
static NAMESPACED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[a-zA-Z0-9](?:[a-zA-Z0-9\-_]*[a-zA-Z0-9])?)/(.+)$")
        .expect("NAMESPACED_REGEX must compile")
});

/// Path fragment identifying a v0 chat-sharing endpoint.
const V0_CHAT_PATH: &str = "/chat/b/";

/// A classified reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistryReference {
    /// A plain item name resolved through the default registry.
    Bare(String),
    /// `@namespace/name`.
    Namespaced { namespace: String, name: String },
    /// An absolute URL (already normalized).
    Url(String),
    /// A filesystem path to a registry item document.
    LocalPath(String),
}

impl RegistryReference {
    /// Classify a reference string.
    pub fn parse(input: &str) -> Self {
        if is_url(input) {
            return Self::Url(normalize_url(input));
        }

        if is_local_file(input) {
            return Self::LocalPath(input.to_string());
        }

        match parse_namespace(input) {
            (Some(namespace), name) => Self::Namespaced { namespace, name },
            (None, name) => Self::Bare(name),
        }
    }

    /// The registry namespace, for namespaced references.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Namespaced { namespace, .. } => Some(namespace),
            _ => None,
        }
    }

    /// The item name part of the reference.
    pub fn item_name(&self) -> &str {
        match self {
            Self::Bare(name) | Self::Namespaced { name, .. } => name,
            Self::Url(url) | Self::LocalPath(url) => url,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl fmt::Display for RegistryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare(name) => f.write_str(name),
            Self::Namespaced { namespace, name } => write!(f, "{namespace}/{name}"),
            Self::Url(url) => f.write_str(url),
            Self::LocalPath(path) => f.write_str(path),
        }
    }
}

/// Split `@namespace/item` into its parts.
///
/// Inputs that do not match the namespaced form come back unchanged with no
/// namespace.
pub fn parse_namespace(input: &str) -> (Option<String>, String) {
    match NAMESPACED_REGEX.captures(input) {
        Some(caps) => (Some(caps[1].to_string()), caps[2].to_string()),
        None => (None, input.to_string()),
    }
}

/// Whether the input parses as an absolute URL.
pub fn is_url(input: &str) -> bool {
    Url::parse(input).is_ok()
}

/// Whether the input names a local registry item document.
pub fn is_local_file(input: &str) -> bool {
    if input.ends_with(".json") && !is_url(input) {
        return true;
    }

    input.starts_with("./")
        || input.starts_with("../")
        || input.starts_with("~/")
        || (input.starts_with('/') && !input.starts_with("//"))
}

/// Normalize endpoint URLs that need a JSON suffix.
///
/// v0 chat-sharing URLs serve HTML unless `/json` is appended. All other
/// URLs pass through unchanged.
pub fn normalize_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };

    if parsed.path().contains(V0_CHAT_PATH) && !parsed.path().ends_with("/json") {
        let mut normalized = parsed;
        let path = format!("{}/json", normalized.path().trim_end_matches('/'));
        normalized.set_path(&path);
        return normalized.to_string();
    }

    url.to_string()
}
