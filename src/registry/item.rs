//! Registry item data model.
//!
//! These types mirror the JSON documents served by a registry. Style and
//! theme fragments (`tailwind`, `cssVars`, `css`) are kept as opaque JSON
//! trees: they are merged, never interpreted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a registry item or file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:page")]
    Page,
    #[serde(rename = "registry:file")]
    File,
    #[serde(rename = "registry:theme")]
    Theme,
    #[serde(rename = "registry:style")]
    Style,
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:item")]
    Item,
    #[serde(rename = "registry:example")]
    Example,
    #[serde(rename = "registry:internal")]
    Internal,
}

impl ItemType {
    /// The wire name (`registry:ui`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ui => "registry:ui",
            Self::Lib => "registry:lib",
            Self::Hook => "registry:hook",
            Self::Page => "registry:page",
            Self::File => "registry:file",
            Self::Theme => "registry:theme",
            Self::Style => "registry:style",
            Self::Block => "registry:block",
            Self::Component => "registry:component",
            Self::Item => "registry:item",
            Self::Example => "registry:example",
            Self::Internal => "registry:internal",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file declared by a registry item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryItemFile {
    /// Registry-relative source path.
    pub path: String,

    /// File content. Files without content are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(rename = "type")]
    pub file_type: ItemType,

    /// Explicit destination, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl RegistryItemFile {
    pub fn new(path: impl Into<String>, file_type: ItemType) -> Self {
        Self {
            path: path.into(),
            content: None,
            file_type,
            target: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// One installable registry item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    pub name: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<RegistryItemFile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailwind: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_vars: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env_vars: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl RegistryItem {
    /// An empty item of the given type.
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            schema: None,
            name: name.into(),
            item_type,
            title: None,
            description: None,
            author: None,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
            files: Vec::new(),
            tailwind: None,
            css_vars: None,
            css: None,
            env_vars: BTreeMap::new(),
            docs: None,
            meta: None,
        }
    }

    pub fn is_theme(&self) -> bool {
        self.item_type == ItemType::Theme
    }
}

/// The merged result of resolving a set of references.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItemSet {
    /// Deduplicated items, themes first.
    pub items: Vec<RegistryItem>,

    pub dependencies: Vec<String>,

    pub dev_dependencies: Vec<String>,

    /// Every item's files, in item order.
    pub files: Vec<RegistryItemFile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tailwind: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_vars: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<Value>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env_vars: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub docs: String,
}

impl ResolvedItemSet {
    /// Item files grouped per item, in resolution order.
    pub fn file_lists(&self) -> Vec<&[RegistryItemFile]> {
        self.items.iter().map(|item| item.files.as_slice()).collect()
    }

    /// Names of the resolved items.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}

/// CSS variable tables of a base color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssVarTables {
    pub theme: serde_json::Map<String, Value>,
    pub light: serde_json::Map<String, Value>,
    pub dark: serde_json::Map<String, Value>,
}

/// Inline color mapping of a base color (semantic name -> palette color).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineColors {
    pub light: BTreeMap<String, String>,
    pub dark: BTreeMap<String, String>,
}

/// A base color document (`colors/<name>.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaseColor {
    pub inline_colors: InlineColors,
    pub css_vars: CssVarTables,
}
