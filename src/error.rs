//! Error types for regkit operations.
//!
//! This module defines two layers of errors:
//!
//! - [`RegistryError`], the typed taxonomy for everything that can go wrong
//!   while turning a reference into a registry item (configuration, env
//!   vars, HTTP, local files, parsing, validation).
//! - [`RegkitError`], the crate-level error that wraps registry errors
//!   together with filesystem and configuration failures.
//!
//! # Error Handling Strategy
//!
//! - Setup problems (`NotConfigured`, `MissingEnvVars`) are always surfaced
//!   to the caller with full context
//! - Network, fetch and parse failures are swallowed per node during batch
//!   graph expansion and propagated for single, explicit fetches
//! - Filesystem write failures always propagate

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Machine-readable error code carried by every [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NetworkError,
    NotFound,
    Unauthorized,
    Forbidden,
    FetchError,
    NotConfigured,
    InvalidConfig,
    MissingEnvVars,
    LocalFileError,
    ParseError,
    ValidationError,
}

impl ErrorCode {
    /// The stable string form of the code (e.g. `NOT_CONFIGURED`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::FetchError => "FETCH_ERROR",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::MissingEnvVars => "MISSING_ENV_VARS",
            Self::LocalFileError => "LOCAL_FILE_ERROR",
            Self::ParseError => "PARSE_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while resolving, fetching and parsing registry items.
///
/// The type is `Clone` so a single in-flight fetch result can be handed to
/// every caller waiting on the same URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Connection, DNS or timeout failure before any response arrived.
    #[error("Failed to reach registry at {url}: {message}")]
    Network { url: String, message: String },

    /// The registry answered 404.
    #[error("The item at {url} was not found. It may not exist at the registry.")]
    NotFound { url: String, message: Option<String> },

    /// The registry answered 401.
    #[error(
        "You are not authorized to access the item at {url}. If this is a remote registry, you may need to authenticate."
    )]
    Unauthorized { url: String, message: Option<String> },

    /// The registry answered 403.
    #[error(
        "You do not have access to the item at {url}. The resource may require different permissions."
    )]
    Forbidden { url: String, message: Option<String> },

    /// Any other non-2xx answer, or a request that failed without a status.
    #[error("{}", fetch_error_message(.url, .status, .body))]
    Fetch {
        url: String,
        status: Option<u16>,
        body: Option<String>,
    },

    /// A namespaced reference names a registry missing from the config.
    #[error("{}", not_configured_message(.registry))]
    NotConfigured { registry: Option<String> },

    /// The registry configuration itself is malformed.
    #[error("Invalid registry configuration{}: {message}", registry_suffix(.registry))]
    InvalidConfig {
        registry: Option<String>,
        message: String,
    },

    /// The registry configuration references unset environment variables.
    #[error(
        "Registry \"{registry}\" requires the following environment variables:\n\n{}",
        bullet_list(.names)
    )]
    MissingEnvVars { registry: String, names: Vec<String> },

    /// A local registry file could not be read.
    #[error("Failed to read local registry file {}: {message}", .path.display())]
    LocalFile { path: PathBuf, message: String },

    /// A document could not be parsed into the expected shape.
    #[error("Failed to parse registry item {item}: {message}")]
    Parse { item: String, message: String },

    /// A parsed document (or config field) failed a semantic check.
    #[error("Invalid {target}: {message}")]
    Validation { target: String, message: String },
}

impl RegistryError {
    /// The machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Network { .. } => ErrorCode::NetworkError,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Unauthorized { .. } => ErrorCode::Unauthorized,
            Self::Forbidden { .. } => ErrorCode::Forbidden,
            Self::Fetch { .. } => ErrorCode::FetchError,
            Self::NotConfigured { .. } => ErrorCode::NotConfigured,
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::MissingEnvVars { .. } => ErrorCode::MissingEnvVars,
            Self::LocalFile { .. } => ErrorCode::LocalFileError,
            Self::Parse { .. } => ErrorCode::ParseError,
            Self::Validation { .. } => ErrorCode::ValidationError,
        }
    }

    /// The HTTP status behind this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Fetch { status, .. } => *status,
            _ => None,
        }
    }

    /// Structured context for reporting (key/value pairs).
    pub fn context(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Network { url, .. } => vec![("url", url.clone())],
            Self::NotFound { url, message }
            | Self::Unauthorized { url, message }
            | Self::Forbidden { url, message } => {
                let mut ctx = vec![("url", url.clone())];
                if let Some(message) = message {
                    ctx.push(("message", message.clone()));
                }
                ctx
            }
            Self::Fetch { url, body, .. } => {
                let mut ctx = vec![("url", url.clone())];
                if let Some(body) = body {
                    ctx.push(("responseBody", body.clone()));
                }
                ctx
            }
            Self::NotConfigured { registry } | Self::InvalidConfig { registry, .. } => registry
                .iter()
                .map(|r| ("registry", r.clone()))
                .collect(),
            Self::MissingEnvVars { registry, names } => vec![
                ("registry", registry.clone()),
                ("missingVars", names.join(", ")),
            ],
            Self::LocalFile { path, .. } => vec![("path", path.display().to_string())],
            Self::Parse { item, .. } => vec![("item", item.clone())],
            Self::Validation { target, .. } => vec![("target", target.clone())],
        }
    }

    /// A human remediation hint.
    pub fn suggestion(&self) -> Option<String> {
        let hint = match self {
            Self::Network { .. } => "Check your internet connection and that the registry URL is reachable.",
            Self::NotFound { .. } => {
                "Check if the item name is correct and the registry URL is accessible."
            }
            Self::Unauthorized { .. } => {
                "Check your authentication credentials and environment variables."
            }
            Self::Forbidden { .. } => {
                "Check if you have the necessary permissions to access this resource."
            }
            Self::Fetch { status, .. } => match status {
                Some(code) if *code >= 500 => {
                    "The registry server may be temporarily unavailable. Try again later."
                }
                _ => return None,
            },
            Self::NotConfigured { .. } => {
                "Check that the registry name is correct and that it is configured under \"registries\" in components.json."
            }
            Self::InvalidConfig { .. } => {
                "Registry names must start with @ and URLs must contain exactly one {name} placeholder."
            }
            Self::MissingEnvVars { .. } => {
                "Set the required environment variables in your shell or in a .env / .env.local file."
            }
            Self::LocalFile { .. } => "Check if the file exists and you have read permissions.",
            Self::Parse { .. } => "The registry item may be corrupted or have an invalid format.",
            Self::Validation { .. } => "Fix the reported field and try again.",
        };
        Some(hint.to_string())
    }

    /// Whether this error represents a fixable setup problem that must
    /// always reach the caller.
    pub fn is_setup_error(&self) -> bool {
        matches!(self, Self::NotConfigured { .. } | Self::MissingEnvVars { .. })
    }
}

fn fetch_error_message(url: &str, status: &Option<u16>, body: &Option<String>) -> String {
    let mut message = match status {
        Some(code) => format!("Failed to fetch from registry ({code}): {url}"),
        None => format!("Failed to fetch from registry: {url}"),
    };
    if let Some(body) = body.as_deref().filter(|b| !b.is_empty()) {
        message.push('\n');
        message.push_str(body);
    }
    message
}

fn not_configured_message(registry: &Option<String>) -> String {
    match registry {
        Some(name) => format!(
            "Unknown registry \"{name}\". Make sure it is defined in components.json as follows:\n{{\n  \"registries\": {{\n    \"{name}\": \"[URL_TO_REGISTRY]\"\n  }}\n}}"
        ),
        None => "Unknown registry. Make sure it is defined in components.json under \"registries\"."
            .to_string(),
    }
}

fn registry_suffix(registry: &Option<String>) -> String {
    registry
        .as_deref()
        .map(|r| format!(" for {r}"))
        .unwrap_or_default()
}

fn bullet_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("  • {n}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Crate-level error type.
#[derive(Debug, Error)]
pub enum RegkitError {
    /// A registry resolution failure.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// `components.json` was not found at the expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// `components.json` could not be parsed.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A destination path is an existing directory.
    #[error("Cannot write {path}: a directory exists at that location")]
    TargetIsDirectory { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for regkit operations.
pub type Result<T> = std::result::Result<T, RegkitError>;
