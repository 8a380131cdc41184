//! Module directive normalization.

use regex::Regex;
use std::sync::LazyLock;

use crate::transform::{Transform, TransformContext, TransformError};

/// A leading `"use client"` directive, after any comments, plus the blank
/// lines that follow it.
static USE_CLIENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^((?:\s*//[^\n]*\n|\s*/\*(?s:.*?)\*/)*\s*)["']use client["'];?[ \t]*(?:\r?\n)*"#)
        .expect("use client regex must compile")
});

/// Removes `"use client"` from projects without React Server Components.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectivesTransform;

impl Transform for DirectivesTransform {
    fn name(&self) -> &'static str {
        "directives"
    }

    fn apply(&self, source: &str, ctx: &TransformContext<'_>) -> Result<String, TransformError> {
        if ctx.config.rsc {
            return Ok(source.to_string());
        }
        Ok(USE_CLIENT_REGEX.replace(source, "$1").into_owned())
    }
}
