//! Right-to-left class rewriting.
//!
//! Enabled by `rtl: true` in `components.json`. Physical utilities become
//! their logical counterparts (`ml-2` to `ms-2`, `text-left` to
//! `text-start`). Utilities without a logical form keep their class and gain
//! an `rtl:` twin, and `cn-rtl-flip` markers become `rtl:rotate-180`. The
//! `side` prop of a few menu components is switched to logical values.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::transform::source::{join_class_name, rewrite_class_strings, split_class_name};
use crate::transform::{Transform, TransformContext, TransformError};

/// Marker on icons that must be mirrored in RTL layouts.
pub const RTL_FLIP_MARKER: &str = "cn-rtl-flip";

/// Physical to logical value prefixes, most specific first.
///
/// Entries ending in `-` match as prefixes and also match their bare form
/// (`border-l`); other entries match whole values only.
const LOGICAL_MAPPINGS: &[(&str, &str)] = &[
    ("-ml-", "-ms-"),
    ("-mr-", "-me-"),
    ("ml-", "ms-"),
    ("mr-", "me-"),
    ("pl-", "ps-"),
    ("pr-", "pe-"),
    ("-left-", "-start-"),
    ("-right-", "-end-"),
    ("left-", "start-"),
    ("right-", "end-"),
    ("inset-l-", "inset-inline-start-"),
    ("inset-r-", "inset-inline-end-"),
    ("rounded-tl-", "rounded-ss-"),
    ("rounded-tr-", "rounded-se-"),
    ("rounded-bl-", "rounded-es-"),
    ("rounded-br-", "rounded-ee-"),
    ("rounded-l-", "rounded-s-"),
    ("rounded-r-", "rounded-e-"),
    ("border-l-", "border-s-"),
    ("border-r-", "border-e-"),
    ("text-left", "text-start"),
    ("text-right", "text-end"),
    ("scroll-ml-", "scroll-ms-"),
    ("scroll-mr-", "scroll-me-"),
    ("scroll-pl-", "scroll-ps-"),
    ("scroll-pr-", "scroll-pe-"),
    ("float-left", "float-start"),
    ("float-right", "float-end"),
    ("clear-left", "clear-start"),
    ("clear-right", "clear-end"),
    ("origin-top-left", "origin-top-start"),
    ("origin-top-right", "origin-top-end"),
    ("origin-bottom-left", "origin-bottom-start"),
    ("origin-bottom-right", "origin-bottom-end"),
    ("origin-left", "origin-start"),
    ("origin-right", "origin-end"),
];

/// Positioning entries that do not apply under `data-[side=left|right]`.
const POSITIONING_PREFIXES: &[&str] = &["-left-", "-right-", "left-", "right-"];

/// Translations whose sign flips in RTL.
const TRANSLATE_X_MAPPINGS: &[(&str, &str)] = &[
    ("-translate-x-", "translate-x-"),
    ("translate-x-", "-translate-x-"),
];

/// Utilities that need a `*-reverse` twin in RTL.
const REVERSE_MAPPINGS: &[(&str, &str)] = &[
    ("space-x-", "space-x-reverse"),
    ("divide-x-", "divide-x-reverse"),
];

/// Whole values swapped in RTL.
const SWAP_MAPPINGS: &[(&str, &str)] = &[
    ("cursor-w-resize", "cursor-e-resize"),
    ("cursor-e-resize", "cursor-w-resize"),
];

/// Slide animations under logical side variants: `(variant, physical, logical)`.
const SIDE_SLIDE_MAPPINGS: &[(&str, &str, &str)] = &[
    ("data-[side=inline-start]", "slide-in-from-right", "slide-in-from-end"),
    ("data-[side=inline-start]", "slide-out-to-right", "slide-out-to-end"),
    ("data-[side=inline-end]", "slide-in-from-left", "slide-in-from-start"),
    ("data-[side=inline-end]", "slide-out-to-left", "slide-out-to-start"),
];

/// Components whose `side` prop takes logical values.
const SIDE_PROP_COMPONENTS: &[&str] = &[
    "ContextMenuContent",
    "ContextMenuSubContent",
    "DropdownMenuSubContent",
];

/// `side="left|right"` on one of [`SIDE_PROP_COMPONENTS`].
static SIDE_PROP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"(<(?:{})\b[^<>]*?\bside\s*=\s*)"(left|right)""#,
        SIDE_PROP_COMPONENTS.join("|")
    );
    Regex::new(&pattern).expect("side prop regex must compile")
});

/// `side = "left|right"` defaults in one of [`SIDE_PROP_COMPONENTS`].
static SIDE_DEFAULT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"(\bfunction\s+(?:{})\s*\(\s*\{{[^}}]*?\bside\s*=\s*)"(left|right)""#,
        SIDE_PROP_COMPONENTS.join("|")
    );
    Regex::new(&pattern).expect("side default regex must compile")
});

/// Rewrites class names and side props for RTL projects.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtlTransform;

impl Transform for RtlTransform {
    fn name(&self) -> &'static str {
        "rtl"
    }

    fn apply(&self, source: &str, ctx: &TransformContext<'_>) -> Result<String, TransformError> {
        if !ctx.config.rtl {
            return Ok(source.to_string());
        }
        let source = rewrite_class_strings(source, false, apply_rtl_mapping)?;
        Ok(logical_side_props(&source))
    }
}

/// Rewrite a class string for RTL layouts.
pub fn apply_rtl_mapping(input: &str) -> String {
    input
        .split(' ')
        .flat_map(map_class)
        .collect::<Vec<_>>()
        .join(" ")
}

fn map_class(class_name: &str) -> Vec<String> {
    if class_name == RTL_FLIP_MARKER {
        return vec!["rtl:rotate-180".to_string()];
    }

    let (variant, value, modifier) = split_class_name(class_name);
    if value.is_empty() {
        return vec![class_name.to_string()];
    }
    let rtl_variant = variant.map_or_else(|| "rtl".to_string(), |v| format!("rtl:{v}"));

    for (physical, flipped) in TRANSLATE_X_MAPPINGS {
        if let Some(rest) = value.strip_prefix(physical) {
            let rtl_value = format!("{flipped}{rest}");
            return vec![
                class_name.to_string(),
                join_class_name(Some(&rtl_variant), &rtl_value, modifier),
            ];
        }
    }

    for (prefix, reverse) in REVERSE_MAPPINGS {
        if value.starts_with(prefix) {
            return vec![
                class_name.to_string(),
                join_class_name(Some(&rtl_variant), reverse, None),
            ];
        }
    }

    for (physical, swapped) in SWAP_MAPPINGS {
        if value == *physical {
            return vec![
                class_name.to_string(),
                join_class_name(Some(&rtl_variant), swapped, None),
            ];
        }
    }

    if let Some(variant) = variant {
        for (side, physical, logical) in SIDE_SLIDE_MAPPINGS {
            if let Some(rest) = value.strip_prefix(physical).filter(|_| variant.contains(side)) {
                let mapped = format!("{logical}{rest}");
                return vec![join_class_name(Some(variant), &mapped, modifier)];
            }
        }
    }

    let physical_side = variant
        .is_some_and(|v| v.contains("data-[side=left]") || v.contains("data-[side=right]"));

    let mapped = LOGICAL_MAPPINGS
        .iter()
        .filter(|(physical, _)| !(physical_side && POSITIONING_PREFIXES.contains(physical)))
        .find_map(|(physical, logical)| logical_value(value, physical, logical))
        .unwrap_or_else(|| value.to_string());

    vec![join_class_name(variant, &mapped, modifier)]
}

fn logical_value(value: &str, physical: &str, logical: &str) -> Option<String> {
    match physical.strip_suffix('-') {
        Some(bare) => {
            if let Some(rest) = value.strip_prefix(physical) {
                Some(format!("{logical}{rest}"))
            } else if value == bare {
                Some(logical.trim_end_matches('-').to_string())
            } else {
                None
            }
        }
        None => (value == physical).then(|| logical.to_string()),
    }
}

/// Switch `side` props and defaults of menu components to logical values.
pub fn logical_side_props(source: &str) -> String {
    let source = SIDE_PROP_REGEX.replace_all(source, logical_side);
    SIDE_DEFAULT_REGEX
        .replace_all(&source, logical_side)
        .into_owned()
}

fn logical_side(caps: &Captures<'_>) -> String {
    let side = if &caps[2] == "left" {
        "inline-start"
    } else {
        "inline-end"
    };
    format!("{}\"{side}\"", &caps[1])
}
