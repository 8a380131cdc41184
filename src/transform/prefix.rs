//! Tailwind class prefixing.

use crate::transform::markers::is_marker;
use crate::transform::source::{join_class_name, rewrite_class_strings, split_class_name};
use crate::transform::{Transform, TransformContext, TransformError};

/// Applies `tailwind.prefix` to every utility class.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixTransform;

impl Transform for PrefixTransform {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn apply(&self, source: &str, ctx: &TransformContext<'_>) -> Result<String, TransformError> {
        let prefix = ctx.config.tailwind.prefix.as_str();
        if prefix.is_empty() {
            return Ok(source.to_string());
        }
        rewrite_class_strings(source, false, |classes| apply_prefix(classes, prefix))
    }
}

/// Prefix every class in a class string.
///
/// Variants and modifiers keep their place (`hover:tw-bg-x/50`), negative
/// utilities keep their sign in front (`-tw-mt-2`), and marker classes and
/// already prefixed classes are left alone.
pub fn apply_prefix(input: &str, prefix: &str) -> String {
    input
        .split(' ')
        .map(|class_name| {
            if class_name.is_empty() || is_marker(class_name) {
                return class_name.to_string();
            }
            let (variant, value, modifier) = split_class_name(class_name);
            let prefixed = match value.strip_prefix('-') {
                _ if value.starts_with(prefix) => value.to_string(),
                Some(positive) if !positive.starts_with(prefix) => format!("-{prefix}{positive}"),
                Some(_) => value.to_string(),
                None => format!("{prefix}{value}"),
            };
            join_class_name(variant, &prefixed, modifier)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
