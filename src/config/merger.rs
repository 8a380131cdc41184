//! Merge algorithms for JSON values.
//!
//! Two flavours are provided:
//!
//! - [`deep_merge`] is used when persisting configuration changes back to
//!   `components.json`.
//! - [`merge_fragments`] is used when combining the `tailwind`, `cssVars`
//!   and `css` fragments declared by many registry items.
//!
//! # Merge Rules
//!
//! | | `deep_merge` | `merge_fragments` |
//! |---|---|---|
//! | objects | merged recursively | merged recursively |
//! | arrays | replaced | concatenated (duplicates dropped) |
//! | `null` in overlay | deletes the key | ignored |
//! | scalars | overlay wins | overlay wins |

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::config::schema::RegistryConfigEntry;
use crate::error::{RegkitError, Result};

/// Deep merge two JSON values.
///
/// Later values override earlier values at the point of conflict.
/// Objects are merged recursively. Arrays are replaced entirely.
/// Null values in overlay delete the corresponding key from base.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Object(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge a style/theme fragment into an accumulator.
///
/// Objects are merged recursively and arrays are concatenated, skipping
/// values already present. `null` in the overlay leaves the base intact.
pub fn merge_fragments(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                let merged = match base_map.get(key) {
                    Some(base_value) => merge_fragments(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                result.insert(key.clone(), merged);
            }

            Value::Object(result)
        }

        (Value::Array(base_items), Value::Array(overlay_items)) => {
            let mut result = base_items.clone();
            for item in overlay_items {
                if !result.contains(item) {
                    result.push(item.clone());
                }
            }
            Value::Array(result)
        }

        (base, Value::Null) => base.clone(),

        (_, overlay) => overlay.clone(),
    }
}

/// Fold many optional fragments in order, starting from an empty object.
pub fn merge_fragment_list<'a, I>(fragments: I) -> Option<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    fragments.into_iter().fold(None, |acc, fragment| match acc {
        None => Some(merge_fragments(&Value::Object(Map::new()), fragment)),
        Some(acc) => Some(merge_fragments(&acc, fragment)),
    })
}

/// Add registry entries to a `components.json` file on disk.
///
/// The entries are deep-merged under `registries`: existing registries and
/// every unrelated key are preserved.
pub fn persist_registries<'a, I>(config_path: &Path, entries: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a String, &'a RegistryConfigEntry)>,
{
    let content = fs::read_to_string(config_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RegkitError::ConfigNotFound {
                path: config_path.to_path_buf(),
            }
        } else {
            RegkitError::Io(e)
        }
    })?;

    let current: Value =
        serde_json::from_str(&content).map_err(|e| RegkitError::ConfigParseError {
            path: config_path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut registries = Map::new();
    for (name, entry) in entries {
        let value = serde_json::to_value(entry).map_err(|e| RegkitError::ConfigParseError {
            path: config_path.to_path_buf(),
            message: e.to_string(),
        })?;
        registries.insert(name.clone(), value);
    }

    if registries.is_empty() {
        return Ok(());
    }

    let mut overlay = Map::new();
    overlay.insert("registries".to_string(), Value::Object(registries));
    let merged = deep_merge(&current, &Value::Object(overlay));

    let mut output =
        serde_json::to_string_pretty(&merged).map_err(|e| RegkitError::ConfigParseError {
            path: config_path.to_path_buf(),
            message: e.to_string(),
        })?;
    output.push('\n');
    fs::write(config_path, output)?;

    tracing::debug!(path = %config_path.display(), "Persisted registry configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn deep_merge_replaces_at_conflict_point() {
        let base = json!({ "tailwind": { "css": "app.css", "baseColor": "zinc" } });
        let overlay = json!({ "tailwind": { "css": "globals.css" } });

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["tailwind"]["css"], "globals.css");
        assert_eq!(result["tailwind"]["baseColor"], "zinc");
    }

    #[test]
    fn deep_merge_replaces_arrays() {
        let base = json!({ "list": ["a", "b"] });
        let overlay = json!({ "list": ["c"] });

        let result = deep_merge(&base, &overlay);
        assert_eq!(result["list"], json!(["c"]));
    }

    #[test]
    fn deep_merge_null_removes_value() {
        let base = json!({ "env": { "DEBUG": "true", "LOG": "verbose" } });
        let overlay = json!({ "env": { "DEBUG": null } });

        let result = deep_merge(&base, &overlay);

        assert!(result["env"].get("DEBUG").is_none());
        assert_eq!(result["env"]["LOG"], "verbose");
    }

    #[test]
    fn deep_merge_scalar_overlay_replaces_object() {
        let base = json!({ "settings": { "output": "verbose" } });
        let overlay = json!({ "settings": "disabled" });
        assert_eq!(deep_merge(&base, &overlay)["settings"], "disabled");
    }

    #[test]
    fn fragments_concatenate_arrays() {
        let base = json!({ "config": { "plugins": ["a"] } });
        let overlay = json!({ "config": { "plugins": ["a", "b"] } });

        let result = merge_fragments(&base, &overlay);
        assert_eq!(result["config"]["plugins"], json!(["a", "b"]));
    }

    #[test]
    fn fragments_merge_nested_css_vars() {
        let base = json!({ "light": { "background": "0 0% 100%" }, "dark": { "background": "0 0% 4%" } });
        let overlay = json!({ "light": { "primary": "240 5% 10%" } });

        let result = merge_fragments(&base, &overlay);
        assert_eq!(result["light"]["background"], "0 0% 100%");
        assert_eq!(result["light"]["primary"], "240 5% 10%");
        assert_eq!(result["dark"]["background"], "0 0% 4%");
    }

    #[test]
    fn fragments_ignore_null_overlay() {
        let base = json!({ "a": 1 });
        let result = merge_fragments(&base, &json!({ "a": null }));
        assert_eq!(result["a"], 1);
    }

    #[test]
    fn fragment_list_folds_in_order() {
        let fragments = [json!({ "a": 1, "b": 1 }), json!({ "b": 2 })];
        let merged = merge_fragment_list(fragments.iter()).unwrap();
        assert_eq!(merged, json!({ "a": 1, "b": 2 }));
        assert!(merge_fragment_list(std::iter::empty::<&Value>()).is_none());
    }

    #[test]
    fn persist_registries_preserves_unrelated_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("components.json");
        fs::write(
            &path,
            r#"{"style":"new-york","registries":{"@acme":"https://acme.dev/{name}.json"},"aliases":{"components":"@/components"}}"#,
        )
        .unwrap();

        let mut entries = BTreeMap::new();
        entries.insert(
            "@extra".to_string(),
            RegistryConfigEntry::from("https://extra.dev/r/{name}.json"),
        );
        persist_registries(&path, &entries).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["style"], "new-york");
        assert_eq!(written["aliases"]["components"], "@/components");
        assert_eq!(written["registries"]["@acme"], "https://acme.dev/{name}.json");
        assert_eq!(written["registries"]["@extra"], "https://extra.dev/r/{name}.json");

        let keys: Vec<_> = written.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["style", "registries", "aliases"]);
    }

    #[test]
    fn persist_registries_missing_file_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let entries: BTreeMap<String, RegistryConfigEntry> = BTreeMap::new();
        let result = persist_registries(&temp.path().join("components.json"), &entries);
        assert!(matches!(result, Err(RegkitError::ConfigNotFound { .. })));
    }
}
