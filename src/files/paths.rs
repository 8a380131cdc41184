//! Pure path algebra over registry paths.
//!
//! Registry paths always use `/` separators regardless of platform.

use std::path::{Path, PathBuf};

/// The part of `file_path` that is new relative to `target_dir`.
///
/// Finds the last segment of `file_path` equal to the last segment of
/// `target_dir` and keeps everything after it. Falls back to the file name
/// when no segment matches.
pub fn resolve_nested_file_path(file_path: &str, target_dir: &str) -> String {
    let file_segments: Vec<&str> = split_segments(file_path);
    let Some(&file_name) = file_segments.last() else {
        return String::new();
    };

    let Some(anchor) = split_segments(target_dir).last().copied() else {
        return file_name.to_string();
    };

    match file_segments.iter().rposition(|segment| *segment == anchor) {
        Some(index) if index + 1 < file_segments.len() => file_segments[index + 1..].join("/"),
        _ => file_name.to_string(),
    }
}

/// The deepest directory of `needle` that at least one other path shares.
///
/// Returns the needle's own directory when nothing is shared, and an empty
/// string for root-level files.
pub fn find_common_root(paths: &[&str], needle: &str) -> String {
    let normalized_needle = needle.trim_start_matches('/');
    let needle_segments = split_segments(normalized_needle);
    if needle_segments.len() < 2 {
        return String::new();
    }
    let dir_segments = &needle_segments[..needle_segments.len() - 1];

    for depth in (1..=dir_segments.len()).rev() {
        let prefix = format!("{}/", dir_segments[..depth].join("/"));
        let shared = paths.iter().any(|path| {
            let path = path.trim_start_matches('/');
            path != normalized_needle && path.starts_with(&prefix)
        });
        if shared {
            return format!("/{}", dir_segments[..depth].join("/"));
        }
    }

    format!("/{}", dir_segments.join("/"))
}

/// Remove a leading `src/` from a target.
pub fn strip_src_prefix(target: &str) -> &str {
    target.strip_prefix("src/").unwrap_or(target)
}

/// Rename `.tsx`/`.ts` to `.jsx`/`.js`. Other extensions are untouched.
pub fn to_js_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsx") => path.with_extension("jsx"),
        Some("ts") => path.with_extension("js"),
        _ => path.to_path_buf(),
    }
}

/// The final segment of a registry path.
pub fn file_name(path: &str) -> &str {
    split_segments(path).last().copied().unwrap_or(path)
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
