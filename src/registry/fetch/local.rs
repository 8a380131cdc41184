//! Local registry documents.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RegistryError;

/// Expand `~/` and resolve relative paths against `cwd`.
pub fn expand_local_path(path: &str, cwd: &Path) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Read and parse a local registry document.
pub fn read_local(path: &str, cwd: &Path) -> Result<Value, RegistryError> {
    let resolved = expand_local_path(path, cwd);
    tracing::debug!(path = %resolved.display(), "Reading local registry document");

    let content = fs::read_to_string(&resolved).map_err(|e| RegistryError::LocalFile {
        path: resolved.clone(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| RegistryError::Parse {
        item: path.to_string(),
        message: e.to_string(),
    })
}
