//! Configuration validation rules.
//!
//! This module validates the registry table of `components.json`:
//! - Registry names must start with `@`
//! - Registry URLs must contain exactly one `{name}` placeholder

use crate::config::schema::ComponentsConfig;
use crate::error::RegistryError;

/// Placeholder every registry URL template must contain.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Registry name the error belongs to
    pub registry: String,
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &ComponentsConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, entry) in &config.registries {
        if !name.starts_with('@') {
            errors.push(ValidationError {
                rule: "registry-name".to_string(),
                message: format!("Registry name '{}' must start with @", name),
                registry: name.clone(),
            });
        }

        let placeholders = entry.url().matches(NAME_PLACEHOLDER).count();
        if placeholders != 1 {
            errors.push(ValidationError {
                rule: "registry-url-placeholder".to_string(),
                message: format!(
                    "Registry '{}' URL must contain exactly one {} placeholder (found {})",
                    name, NAME_PLACEHOLDER, placeholders
                ),
                registry: name.clone(),
            });
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `RegistryError::InvalidConfig` if any validation rules fail. The
/// registry is named when every error concerns the same registry.
pub fn validate(config: &ComponentsConfig) -> Result<(), RegistryError> {
    let errors = validate_config(config);

    let Some(first) = errors.first() else {
        return Ok(());
    };

    let registry = errors
        .iter()
        .all(|e| e.registry == first.registry)
        .then(|| first.registry.clone());
    let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();

    Err(RegistryError::InvalidConfig {
        registry,
        message: messages.join("; "),
    })
}
