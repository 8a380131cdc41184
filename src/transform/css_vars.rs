//! Inline base colors for projects that do not use CSS variables.
//!
//! Registry sources use semantic color classes (`bg-primary`). Without CSS
//! variables those are replaced by the base color's palette classes, with a
//! `dark:` counterpart for each.

use crate::registry::item::InlineColors;
use crate::transform::source::{join_class_name, rewrite_class_strings, split_class_name};
use crate::transform::{Transform, TransformContext, TransformError};

/// Utility prefixes that take a color. Longer prefixes first.
const PREFIXES: &[&str] = &["bg-", "text-", "border-", "ring-offset-", "ring-"];

/// Replaces semantic color classes with the base color's palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssVarsTransform;

impl Transform for CssVarsTransform {
    fn name(&self) -> &'static str {
        "css-vars"
    }

    fn apply(&self, source: &str, ctx: &TransformContext<'_>) -> Result<String, TransformError> {
        if ctx.config.tailwind.css_variables {
            return Ok(source.to_string());
        }
        let Some(base_color) = ctx.base_color else {
            return Ok(source.to_string());
        };

        rewrite_class_strings(source, false, |classes| {
            apply_color_mapping(classes, &base_color.inline_colors)
        })
    }
}

/// Map semantic color classes in a class string to palette classes.
///
/// Mapped classes are replaced in place by their light value; their dark
/// values are appended under a `dark:` variant. A string with nothing to
/// map is returned unchanged.
pub fn apply_color_mapping(original: &str, colors: &InlineColors) -> String {
    let padded = format!(" {original} ");
    let input = if padded.contains(" border ") && colors.light.contains_key("border") {
        padded.replacen(" border ", " border border-border ", 1)
    } else {
        original.to_string()
    };

    let mut light: Vec<String> = Vec::new();
    let mut dark: Vec<String> = Vec::new();
    let mut mapped = false;

    for class_name in input.split_whitespace() {
        let (variant, value, modifier) = split_class_name(class_name);

        let replacement = PREFIXES.iter().find_map(|prefix| {
            let needle = value.strip_prefix(prefix)?;
            let light_color = colors.light.get(needle)?;
            let dark_color = colors.dark.get(needle).unwrap_or(light_color);
            let dark_variant = variant.map_or_else(|| "dark".to_string(), |v| format!("dark:{v}"));
            Some((
                join_class_name(variant, &format!("{prefix}{light_color}"), modifier),
                join_class_name(
                    Some(dark_variant.as_str()),
                    &format!("{prefix}{dark_color}"),
                    modifier,
                ),
            ))
        });

        match replacement {
            Some((light_class, dark_class)) => {
                mapped = true;
                push_unique(&mut light, light_class);
                push_unique(&mut dark, dark_class);
            }
            None => push_unique(&mut light, class_name.to_string()),
        }
    }

    if !mapped {
        return original.to_string();
    }

    light.extend(dark);
    light.join(" ")
}

fn push_unique(classes: &mut Vec<String>, class_name: String) {
    if !classes.contains(&class_name) {
        classes.push(class_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentsConfig;
    use crate::registry::item::BaseColor;
    use std::collections::BTreeMap;

    fn colors() -> InlineColors {
        let map = |pairs: &[(&str, &str)]| -> BTreeMap<String, String> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        InlineColors {
            light: map(&[
                ("background", "white"),
                ("foreground", "neutral-950"),
                ("primary", "neutral-900"),
                ("primary-foreground", "neutral-50"),
                ("border", "neutral-200"),
            ]),
            dark: map(&[
                ("background", "neutral-950"),
                ("foreground", "neutral-50"),
                ("primary", "neutral-50"),
                ("primary-foreground", "neutral-900"),
                ("border", "neutral-800"),
            ]),
        }
    }

    #[test]
    fn maps_semantic_colors() {
        assert_eq!(
            apply_color_mapping("bg-primary text-primary-foreground", &colors()),
            "bg-neutral-900 text-neutral-50 dark:bg-neutral-50 dark:text-neutral-900"
        );
    }

    #[test]
    fn keeps_variants_and_modifiers() {
        assert_eq!(
            apply_color_mapping("hover:bg-primary/90 flex", &colors()),
            "hover:bg-neutral-900/90 flex dark:hover:bg-neutral-50/90"
        );
    }

    #[test]
    fn bare_border_gets_a_color() {
        assert_eq!(
            apply_color_mapping("rounded border p-4", &colors()),
            "rounded border border-neutral-200 p-4 dark:border-neutral-800"
        );
    }

    #[test]
    fn unmapped_strings_are_unchanged() {
        assert_eq!(apply_color_mapping("flex gap-2", &colors()), "flex gap-2");
        assert_eq!(apply_color_mapping("bg-red-500", &colors()), "bg-red-500");
    }

    #[test]
    fn only_runs_without_css_variables() {
        let base_color = BaseColor {
            inline_colors: colors(),
            ..Default::default()
        };
        let source = r#"<div className="bg-background" />"#;

        let mut config = ComponentsConfig::default();
        let ctx = TransformContext::new("x.tsx", &config).with_base_color(Some(&base_color));
        assert_eq!(CssVarsTransform.apply(source, &ctx).unwrap(), source);

        config.tailwind.css_variables = false;
        let ctx = TransformContext::new("x.tsx", &config).with_base_color(Some(&base_color));
        assert_eq!(
            CssVarsTransform.apply(source, &ctx).unwrap(),
            r#"<div className="bg-white dark:bg-neutral-950" />"#
        );
    }
}
