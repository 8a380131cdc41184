//! Marker-file helpers.

use std::path::Path;

/// Check if a file or directory exists relative to the project root.
pub fn file_exists(project_root: &Path, file: &str) -> bool {
    project_root.join(file).exists()
}

/// Check if a directory exists relative to the project root.
pub fn dir_exists(project_root: &Path, dir: &str) -> bool {
    project_root.join(dir).is_dir()
}

/// Return the first of `files` that exists.
pub fn any_file_exists(project_root: &Path, files: &[&str]) -> Option<String> {
    files
        .iter()
        .find(|f| project_root.join(f).exists())
        .map(|f| f.to_string())
}

/// Return the first config file matching `stem` with any of the usual
/// script extensions (`next.config.js`, `vite.config.ts`, ...).
pub fn config_file_exists(project_root: &Path, stem: &str) -> Option<String> {
    ["js", "mjs", "cjs", "ts", "mts"]
        .iter()
        .map(|ext| format!("{stem}.{ext}"))
        .find(|f| project_root.join(f).exists())
}
