//! Icon library substitution.
//!
//! Registry sources reference icons in two ways:
//!
//! - `<IconPlaceholder lucide="CheckIcon" tabler="IconCheck" />` elements,
//!   which name the icon for every supported library. The element becomes
//!   the project library's component and the placeholder import is
//!   replaced by the library import.
//! - Plain `lucide-react` imports. When the project uses another library
//!   and the icon map knows an equivalent, the import and its usages are
//!   switched over.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::transform::source::{find_closing, scan_string};
use crate::transform::{Transform, TransformContext, TransformError};

/// Icon name -> library key -> that library's icon name.
pub type IconMap = BTreeMap<String, BTreeMap<String, String>>;

const HUGEICONS_WRAPPER: &str = "HugeiconsIcon";
const HUGEICONS_WRAPPER_PACKAGE: &str = "@hugeicons/react";
const HUGEICONS_DEFAULT_STROKE: &str = "strokeWidth={2}";

static PLACEHOLDER_IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^import\s*\{\s*IconPlaceholder\s*\}\s*from\s*["'][^"'\n]*["'](;?)[ \t]*(\r?\n)?"#)
        .expect("placeholder import regex must compile")
});

static PLACEHOLDER_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<IconPlaceholder\b").expect("placeholder tag regex must compile"));

static LUCIDE_IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^import\s*\{([^}]*)\}\s*from\s*["']lucide-react["'](;?)"#)
        .expect("lucide import regex must compile")
});

/// Supported icon libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconLibrary {
    Lucide,
    Tabler,
    Hugeicons,
    Phosphor,
    Remixicon,
}

impl IconLibrary {
    pub const ALL: [IconLibrary; 5] = [
        Self::Lucide,
        Self::Tabler,
        Self::Hugeicons,
        Self::Phosphor,
        Self::Remixicon,
    ];

    /// Parse the `iconLibrary` config value.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|library| library.key() == name)
    }

    /// Config value, placeholder attribute and icon map key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Lucide => "lucide",
            Self::Tabler => "tabler",
            Self::Hugeicons => "hugeicons",
            Self::Phosphor => "phosphor",
            Self::Remixicon => "remixicon",
        }
    }

    /// Package the icons are imported from.
    pub fn package(self) -> &'static str {
        match self {
            Self::Lucide => "lucide-react",
            Self::Tabler => "@tabler/icons-react",
            Self::Hugeicons => "@hugeicons/core-free-icons",
            Self::Phosphor => "@phosphor-icons/react",
            Self::Remixicon => "@remixicon/react",
        }
    }

    /// Icons are data passed to a wrapper component rather than components.
    pub fn uses_wrapper(self) -> bool {
        self == Self::Hugeicons
    }
}

impl fmt::Display for IconLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Rewrites icons to the configured `iconLibrary`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconsTransform;

impl Transform for IconsTransform {
    fn name(&self) -> &'static str {
        "icons"
    }

    fn apply(&self, source: &str, ctx: &TransformContext<'_>) -> Result<String, TransformError> {
        let Some(library) = ctx.config.icon_library.as_deref().and_then(IconLibrary::parse) else {
            return Ok(source.to_string());
        };

        let source = replace_placeholders(source, library)?;

        match ctx.icons {
            Some(icons) if !library.uses_wrapper() && library != IconLibrary::Lucide => {
                Ok(remap_lucide_imports(&source, library, icons))
            }
            _ => Ok(source),
        }
    }
}

/// A JSX attribute as written.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribute<'a> {
    name: &'a str,
    /// Raw value including quotes or braces.
    value: Option<&'a str>,
    raw: &'a str,
}

impl Attribute<'_> {
    fn string_value(&self) -> Option<&str> {
        let value = self.value?;
        let inner = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))?;
        Some(inner)
    }
}

fn replace_placeholders(source: &str, library: IconLibrary) -> Result<String, TransformError> {
    if !PLACEHOLDER_IMPORT_REGEX.is_match(source) {
        return Ok(source.to_string());
    }

    let mut out = String::with_capacity(source.len());
    let mut names: Vec<String> = Vec::new();
    let mut cursor = 0;

    while let Some(tag) = PLACEHOLDER_TAG_REGEX.find_at(source, cursor) {
        out.push_str(&source[cursor..tag.start()]);
        let (attrs_end, end, self_closing) = find_tag_end(source, tag.start(), tag.end())?;
        let element = &source[tag.start()..end];
        cursor = end;

        if !self_closing {
            out.push_str(element);
            continue;
        }

        let attributes = parse_attributes(source, tag.end(), attrs_end)?;
        let Some(icon) = attributes
            .iter()
            .find(|attr| attr.name == library.key())
            .and_then(Attribute::string_value)
        else {
            tracing::debug!(library = %library, "Icon placeholder has no name for library");
            out.push_str(element);
            continue;
        };

        let forwarded: Vec<&Attribute<'_>> = attributes
            .iter()
            .filter(|attr| IconLibrary::parse(attr.name).is_none())
            .collect();

        out.push_str(&render_icon(library, icon, &forwarded));
        if !names.iter().any(|name| name == icon) {
            names.push(icon.to_string());
        }
    }
    out.push_str(&source[cursor..]);

    let replaced = PLACEHOLDER_IMPORT_REGEX.replace(&out, |caps: &Captures<'_>| {
        if names.is_empty() {
            return String::new();
        }
        let semicolon = caps.get(1).map_or("", |m| m.as_str());
        let newline = caps.get(2).map_or("", |m| m.as_str());
        let icons = format!(
            "import {{ {} }} from \"{}\"{semicolon}{newline}",
            names.join(", "),
            library.package()
        );
        if library.uses_wrapper() {
            format!(
                "import {{ {HUGEICONS_WRAPPER} }} from \"{HUGEICONS_WRAPPER_PACKAGE}\"{semicolon}\n{icons}"
            )
        } else {
            icons
        }
    });

    Ok(replaced.into_owned())
}

fn render_icon(library: IconLibrary, icon: &str, forwarded: &[&Attribute<'_>]) -> String {
    let mut element = if library.uses_wrapper() {
        let mut element = format!("<{HUGEICONS_WRAPPER} icon={{{icon}}}");
        if !forwarded.iter().any(|attr| attr.name == "strokeWidth") {
            element.push(' ');
            element.push_str(HUGEICONS_DEFAULT_STROKE);
        }
        element
    } else {
        format!("<{icon}")
    };

    for attr in forwarded {
        element.push(' ');
        element.push_str(attr.raw);
    }
    element.push_str(" />");
    element
}

/// Returns `(attributes_end, element_end, self_closing)`.
fn find_tag_end(
    source: &str,
    tag_start: usize,
    from: usize,
) -> Result<(usize, usize, bool), TransformError> {
    let bytes = source.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = scan_string(source, i)?,
            b'{' => i = find_closing(source, i)?,
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                let attrs_end = source[..i].trim_end().len();
                return Ok((attrs_end, i + 2, true));
            }
            b'>' => return Ok((i, i + 1, false)),
            _ => i += 1,
        }
    }
    Err(TransformError::Unclosed {
        open: '<',
        offset: tag_start,
    })
}

fn parse_attributes(
    source: &str,
    start: usize,
    end: usize,
) -> Result<Vec<Attribute<'_>>, TransformError> {
    let bytes = source.as_bytes();
    let mut attributes = Vec::new();
    let mut i = start;

    while i < end {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let attr_start = i;
        if bytes[i] == b'{' {
            i = find_closing(source, i)?;
            attributes.push(Attribute {
                name: "",
                value: None,
                raw: &source[attr_start..i],
            });
            continue;
        }

        while i < end && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let name = &source[attr_start..i];

        let mut value = None;
        if i < end && bytes[i] == b'=' {
            let value_start = i + 1;
            i = match bytes.get(value_start) {
                Some(b'"' | b'\'') => scan_string(source, value_start)?,
                Some(b'{') => find_closing(source, value_start)?,
                _ => {
                    let mut j = value_start;
                    while j < end && !bytes[j].is_ascii_whitespace() {
                        j += 1;
                    }
                    j
                }
            };
            value = Some(&source[value_start..i]);
        }

        attributes.push(Attribute {
            name,
            value,
            raw: &source[attr_start..i],
        });
    }

    Ok(attributes)
}

/// Move mapped `lucide-react` imports to `library`, renaming usages.
fn remap_lucide_imports(source: &str, library: IconLibrary, icons: &IconMap) -> String {
    let mut renames: BTreeMap<String, String> = BTreeMap::new();
    let mut replacements: Vec<(usize, usize, String)> = Vec::new();

    for caps in LUCIDE_IMPORT_REGEX.captures_iter(source) {
        let (Some(statement), Some(list)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let semicolon = caps.get(2).map_or("", |m| m.as_str());

        let mut kept: Vec<String> = Vec::new();
        let mut moved: Vec<String> = Vec::new();

        for specifier in list.as_str().split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (imported, local) = match specifier.split_once(" as ") {
                Some((imported, local)) => (imported.trim(), Some(local.trim())),
                None => (specifier, None),
            };

            let Some(target) = icons.get(imported).and_then(|names| names.get(library.key())) else {
                kept.push(specifier.to_string());
                continue;
            };

            match local {
                Some(local) => moved.push(format!("{target} as {local}")),
                None => {
                    if target != imported {
                        renames.insert(imported.to_string(), target.clone());
                    }
                    moved.push(target.clone());
                }
            }
        }

        if moved.is_empty() {
            continue;
        }

        let mut statements = Vec::new();
        if !kept.is_empty() {
            statements.push(format!(
                "import {{ {} }} from \"lucide-react\"{semicolon}",
                kept.join(", ")
            ));
        }
        statements.push(format!(
            "import {{ {} }} from \"{}\"{semicolon}",
            moved.join(", "),
            library.package()
        ));
        replacements.push((statement.start(), statement.end(), statements.join("\n")));
    }

    if replacements.is_empty() {
        return source.to_string();
    }

    let rename = build_rename_regex(&renames);
    let rename_segment = |segment: &str| -> String {
        match &rename {
            Some(regex) => regex
                .replace_all(segment, |caps: &Captures<'_>| {
                    renames.get(&caps[0]).cloned().unwrap_or_else(|| caps[0].to_string())
                })
                .into_owned(),
            None => segment.to_string(),
        }
    };

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (start, end, replacement) in replacements {
        out.push_str(&rename_segment(&source[cursor..start]));
        out.push_str(&replacement);
        cursor = end;
    }
    out.push_str(&rename_segment(&source[cursor..]));

    tracing::debug!(library = %library, renamed = renames.len(), "Remapped lucide icons");
    out
}

fn build_rename_regex(renames: &BTreeMap<String, String>) -> Option<Regex> {
    if renames.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = renames.keys().map(|name| regex::escape(name)).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))).ok()
}
