//! HTTP registry fetching.
//!
//! Provides a blocking HTTP client for registry documents that maps
//! response statuses onto [`RegistryError`] variants.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

use crate::error::RegistryError;
use crate::registry::builder::RegistryRequest;

/// Fetches registry documents over HTTP/HTTPS.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(concat!("regkit/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, timeout }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET a JSON document with the request's headers attached.
    pub fn fetch(&self, request: &RegistryRequest) -> Result<Value, RegistryError> {
        let url = request.url.as_str();
        tracing::debug!(url, headers = request.headers.len(), "Fetching registry document");

        let mut builder = self.client.get(url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(|e| {
            if e.is_builder() {
                RegistryError::InvalidConfig {
                    registry: None,
                    message: format!("invalid request for {url}: {e}"),
                }
            } else {
                RegistryError::Network {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| RegistryError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(status_error(url, status, &body));
        }

        serde_json::from_str(&body).map_err(|e| RegistryError::Parse {
            item: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a non-2xx response into the matching error variant.
pub fn status_error(url: &str, status: StatusCode, body: &str) -> RegistryError {
    let message = server_message(body);
    let url = url.to_string();

    match status.as_u16() {
        401 => RegistryError::Unauthorized { url, message },
        403 => RegistryError::Forbidden { url, message },
        404 => RegistryError::NotFound { url, message },
        code => RegistryError::Fetch {
            url,
            status: Some(code),
            body: message,
        },
    }
}

/// Extract a human message from a JSON error body.
///
/// Uses `detail` or `message`, prefixed with `[code]` when an `error` field
/// is present.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    let message = object
        .get("detail")
        .or_else(|| object.get("message"))
        .and_then(Value::as_str)?;

    match object.get("error").and_then(Value::as_str) {
        Some(code) => Some(format!("[{code}] {message}")),
        None => Some(message.to_string()),
    }
}
