//! Theme synthesis from base colors.

use serde_json::{json, Map, Value};

use crate::registry::builtin::base_color_url;
use crate::registry::item::{BaseColor, ItemType, RegistryItem};
use crate::registry::resolver::Registry;

/// Fetch a base color document. Failures are logged and yield `None`.
pub fn fetch_base_color(registry: &Registry, base_color: &str) -> Option<BaseColor> {
    let url = base_color_url(&registry.settings().registry_url, base_color);

    let value = match registry.fetch_document(&url) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(base_color, "Could not fetch base color: {e}");
            return None;
        }
    };

    match serde_json::from_value(value) {
        Ok(color) => Some(color),
        Err(e) => {
            tracing::warn!(base_color, "Invalid base color document: {e}");
            None
        }
    }
}

/// Build the theme item prepended when resolving `index`.
///
/// The item always carries the radius tokens. With CSS variables enabled it
/// also carries the base color's variable tables and the Tailwind colors
/// derived from the dark table.
pub fn build_theme_item(name: &str, base_color: &BaseColor, css_variables: bool) -> RegistryItem {
    let mut colors = Map::new();
    let mut light = Map::new();
    let mut dark = Map::new();

    if css_variables {
        colors = tailwind_colors_from_css_vars(&base_color.css_vars.dark);
        light.extend(base_color.css_vars.light.clone());
        dark.extend(base_color.css_vars.dark.clone());
    }
    light.insert("radius".to_string(), json!("0.5rem"));

    let mut item = RegistryItem::new(name, ItemType::Theme);
    item.tailwind = Some(json!({
        "config": {
            "theme": {
                "extend": {
                    "borderRadius": {
                        "lg": "var(--radius)",
                        "md": "calc(var(--radius) - 2px)",
                        "sm": "calc(var(--radius) - 4px)"
                    },
                    "colors": colors
                }
            }
        }
    }));
    item.css_vars = Some(json!({ "light": light, "dark": dark }));
    item
}

/// Derive Tailwind color entries from CSS variable names.
///
/// `primary` maps to `hsl(var(--primary))`; `primary-foreground` nests as
/// `primary.foreground`. A `DEFAULT` key is only kept when the bare color
/// variable exists.
pub fn tailwind_colors_from_css_vars(css_vars: &Map<String, Value>) -> Map<String, Value> {
    let mut result: Map<String, Value> = Map::new();

    for key in css_vars.keys() {
        let (color, sub_type) = match key.split_once('-') {
            Some((color, rest)) => (color, rest),
            None => (key.as_str(), ""),
        };
        let value = Value::String(format!("hsl(var(--{key}))"));

        if sub_type.is_empty() {
            match result.get_mut(color) {
                Some(Value::Object(nested)) => {
                    nested.insert("DEFAULT".to_string(), value);
                }
                _ => {
                    result.insert(color.to_string(), value);
                }
            }
            continue;
        }

        let entry = result
            .entry(color.to_string())
            .or_insert_with(|| Value::Null);
        if !entry.is_object() {
            *entry = json!({ "DEFAULT": format!("hsl(var(--{color}))") });
        }
        if let Value::Object(nested) = entry {
            nested.insert(sub_type.to_string(), value);
        }
    }

    for (color, value) in result.iter_mut() {
        if css_vars.contains_key(color) {
            continue;
        }
        if let Value::Object(nested) = value {
            let default = format!("hsl(var(--{color}))");
            if nested.get("DEFAULT").and_then(Value::as_str) == Some(default.as_str()) {
                nested.remove("DEFAULT");
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    #[test]
    fn nests_sub_types_under_color() {
        let colors = tailwind_colors_from_css_vars(&vars(&[
            ("background", "0 0% 100%"),
            ("primary", "240 5.9% 10%"),
            ("primary-foreground", "0 0% 98%"),
        ]));

        assert_eq!(colors["background"], "hsl(var(--background))");
        assert_eq!(
            colors["primary"],
            json!({
                "DEFAULT": "hsl(var(--primary))",
                "foreground": "hsl(var(--primary-foreground))"
            })
        );
    }

    #[test]
    fn drops_default_without_bare_variable() {
        let colors = tailwind_colors_from_css_vars(&vars(&[
            ("sidebar-background", "0 0% 98%"),
            ("sidebar-accent-foreground", "240 5.9% 10%"),
        ]));

        assert_eq!(
            colors["sidebar"],
            json!({
                "background": "hsl(var(--sidebar-background))",
                "accent-foreground": "hsl(var(--sidebar-accent-foreground))"
            })
        );
    }

    #[test]
    fn bare_variable_after_nested_sets_default() {
        let colors = tailwind_colors_from_css_vars(&vars(&[
            ("card-foreground", "x"),
            ("card", "y"),
        ]));
        assert_eq!(colors["card"]["DEFAULT"], "hsl(var(--card))");
        assert_eq!(colors["card"]["foreground"], "hsl(var(--card-foreground))");
    }

    #[test]
    fn theme_item_with_css_variables() {
        let base: BaseColor = serde_json::from_value(json!({
            "cssVars": {
                "light": { "background": "0 0% 100%" },
                "dark": { "background": "240 10% 3.9%" }
            }
        }))
        .unwrap();

        let item = build_theme_item("zinc", &base, true);
        assert!(item.is_theme());
        let css_vars = item.css_vars.unwrap();
        assert_eq!(css_vars["light"]["background"], "0 0% 100%");
        assert_eq!(css_vars["light"]["radius"], "0.5rem");
        assert_eq!(css_vars["dark"]["background"], "240 10% 3.9%");
        assert_eq!(
            item.tailwind.unwrap()["config"]["theme"]["extend"]["colors"]["background"],
            "hsl(var(--background))"
        );
    }

    #[test]
    fn theme_item_without_css_variables_keeps_radius_only() {
        let item = build_theme_item("zinc", &BaseColor::default(), false);
        let css_vars = item.css_vars.unwrap();
        assert_eq!(css_vars["light"], json!({ "radius": "0.5rem" }));
        assert_eq!(css_vars["dark"], json!({}));
        assert_eq!(
            item.tailwind.unwrap()["config"]["theme"]["extend"]["colors"],
            json!({})
        );
    }
}
