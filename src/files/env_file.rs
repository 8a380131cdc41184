//! `.env` file merging.
//!
//! Registry items may ship `.env` files. They are never overwritten: only
//! keys the project does not define yet are appended.

use std::path::Path;

/// Whether a destination is an environment file (`.env`, `.env.local`, ...).
pub fn is_env_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == ".env" || name.starts_with(".env."))
}

/// Keys defined by an env file, in order.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Exported: `export KEY=value`
/// - Comments and lines without `=` are ignored
pub fn parse_env_keys(content: &str) -> Vec<String> {
    content.lines().filter_map(parse_key).collect()
}

fn parse_key(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, _) = line.split_once('=')?;
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

/// Append the lines of `incoming` whose keys `existing` lacks.
///
/// Returns `None` when nothing new would be added.
pub fn merge_env_content(existing: &str, incoming: &str) -> Option<String> {
    let known = parse_env_keys(existing);

    let additions: Vec<&str> = incoming
        .lines()
        .filter(|line| parse_key(line).is_some_and(|key| !known.contains(&key)))
        .collect();

    if additions.is_empty() {
        return None;
    }

    let mut merged = existing.to_string();
    if !merged.is_empty() && !merged.ends_with('\n') {
        merged.push('\n');
    }
    for line in additions {
        merged.push_str(line);
        merged.push('\n');
    }
    Some(merged)
}
