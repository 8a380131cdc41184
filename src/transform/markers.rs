//! Removal of internal marker classes.
//!
//! Registry sources tag elements with `cn-*` classes (for example
//! `cn-rtl-flip`) that only drive registry tooling. They never reach the
//! project.

use crate::transform::source::rewrite_class_strings;
use crate::transform::{Transform, TransformContext, TransformError};

const MARKER_PREFIX: &str = "cn-";

/// Whether a class (with or without variants) is an internal marker.
pub fn is_marker(class_name: &str) -> bool {
    class_name
        .rsplit(':')
        .next()
        .is_some_and(|value| value.starts_with(MARKER_PREFIX))
}

/// Strips marker classes, dropping `className` attributes left empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkersTransform;

impl Transform for MarkersTransform {
    fn name(&self) -> &'static str {
        "markers"
    }

    fn apply(&self, source: &str, _ctx: &TransformContext<'_>) -> Result<String, TransformError> {
        if !source.contains(MARKER_PREFIX) {
            return Ok(source.to_string());
        }
        rewrite_class_strings(source, true, strip_markers)
    }
}

/// Remove marker classes from a class string.
///
/// Strings without markers are returned unchanged; otherwise the remaining
/// classes are joined with single spaces.
pub fn strip_markers(input: &str) -> String {
    if !input.split_whitespace().any(is_marker) {
        return input.to_string();
    }
    input
        .split_whitespace()
        .filter(|class_name| !is_marker(class_name))
        .collect::<Vec<_>>()
        .join(" ")
}
