//! Configuration schema definitions for regkit.
//!
//! This module contains the struct definitions that map to the
//! `components.json` project configuration file, plus the resolved form
//! consumed by the registry and file layers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::detection::ProjectInfo;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "components.json";

/// Root structure of `components.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentsConfig {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Component style (e.g. `new-york`), substituted for `{style}`.
    pub style: String,

    /// Whether the project supports React Server Components.
    pub rsc: bool,

    /// Whether the project is written in TypeScript.
    pub tsx: bool,

    /// Whether class names should be rewritten for right-to-left layouts.
    pub rtl: bool,

    pub tailwind: TailwindConfig,

    /// Icon library used by the project (e.g. `lucide`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_library: Option<String>,

    pub aliases: Aliases,

    /// Registry table: namespace -> URL template or detailed entry.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub registries: BTreeMap<String, RegistryConfigEntry>,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            schema: None,
            style: default_style(),
            rsc: false,
            tsx: true,
            rtl: false,
            tailwind: TailwindConfig::default(),
            icon_library: None,
            aliases: Aliases::default(),
            registries: BTreeMap::new(),
        }
    }
}

fn default_style() -> String {
    "new-york".to_string()
}

/// Tailwind settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TailwindConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,

    pub css: String,

    pub base_color: String,

    pub css_variables: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
}

impl Default for TailwindConfig {
    fn default() -> Self {
        Self {
            config: None,
            css: String::new(),
            base_color: "neutral".to_string(),
            css_variables: true,
            prefix: String::new(),
        }
    }
}

/// Import aliases for the project's directories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Aliases {
    pub components: String,
    pub utils: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lib: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooks: Option<String>,
}

impl Default for Aliases {
    fn default() -> Self {
        Self {
            components: "@/components".to_string(),
            utils: "@/lib/utils".to_string(),
            ui: None,
            lib: None,
            hooks: None,
        }
    }
}

impl Aliases {
    /// The `ui` alias, defaulting to `{components}/ui`.
    pub fn ui(&self) -> String {
        self.ui
            .clone()
            .unwrap_or_else(|| format!("{}/ui", self.components))
    }

    /// The `lib` alias, defaulting to the parent of `utils`.
    pub fn lib(&self) -> String {
        self.lib.clone().unwrap_or_else(|| {
            self.utils
                .rsplit_once('/')
                .map(|(parent, _)| parent.to_string())
                .unwrap_or_else(|| self.utils.clone())
        })
    }

    /// The `hooks` alias, defaulting to a sibling of `components`.
    pub fn hooks(&self) -> String {
        self.hooks.clone().unwrap_or_else(|| {
            match self.components.rsplit_once('/') {
                Some((parent, _)) => format!("{parent}/hooks"),
                None => "hooks".to_string(),
            }
        })
    }
}

/// A registry table entry.
///
/// Either a bare URL template (`"https://acme.dev/r/{name}.json"`) or a
/// detailed form carrying query params and headers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RegistryConfigEntry {
    Template(String),
    Detailed(RegistryEntry),
}

/// Detailed registry entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryEntry {
    pub url: String,

    /// Query params appended to the URL (values may use `${VAR}`).
    #[serde(
        default,
        with = "ordered_pairs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub params: Vec<(String, String)>,

    /// Request headers (values may use `${VAR}`).
    #[serde(
        default,
        with = "ordered_pairs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub headers: Vec<(String, String)>,
}

impl RegistryConfigEntry {
    /// The URL template.
    pub fn url(&self) -> &str {
        match self {
            Self::Template(url) => url,
            Self::Detailed(entry) => &entry.url,
        }
    }

    /// Query params, empty for the template form.
    pub fn params(&self) -> &[(String, String)] {
        match self {
            Self::Template(_) => &[],
            Self::Detailed(entry) => &entry.params,
        }
    }

    /// Headers, empty for the template form.
    pub fn headers(&self) -> &[(String, String)] {
        match self {
            Self::Template(_) => &[],
            Self::Detailed(entry) => &entry.headers,
        }
    }
}

impl From<&str> for RegistryConfigEntry {
    fn from(url: &str) -> Self {
        Self::Template(url.to_string())
    }
}

/// Serde adapter keeping a JSON object as ordered key/value pairs.
mod ordered_pairs {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of string values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs: Vec<(String, String)> = Vec::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    match pairs.iter_mut().find(|pair| pair.0 == key) {
                        Some(existing) => existing.1 = value,
                        None => pairs.push((key, value)),
                    }
                }
                Ok(pairs)
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

/// Absolute directories the aliases resolve to.
///
/// Any directory may be missing when the project cannot be inspected; the
/// file layer then falls back to plain concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub cwd: PathBuf,
    pub components: Option<PathBuf>,
    pub ui: Option<PathBuf>,
    pub lib: Option<PathBuf>,
    pub hooks: Option<PathBuf>,
    pub utils: Option<PathBuf>,
    pub tailwind_css: Option<PathBuf>,
}

/// Fully loaded project configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub components: ComponentsConfig,
    pub resolved_paths: ResolvedPaths,
    pub project: ProjectInfo,
}

impl Config {
    /// Build a configuration rooted at `cwd` with no resolved directories.
    pub fn new(components: ComponentsConfig) -> Self {
        Self {
            components,
            ..Default::default()
        }
    }

    pub fn style(&self) -> &str {
        &self.components.style
    }

    pub fn registries(&self) -> &BTreeMap<String, RegistryConfigEntry> {
        &self.components.registries
    }
}
