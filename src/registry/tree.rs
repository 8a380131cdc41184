//! Building the resolved item set.

use crate::config::merge_fragment_list;
use crate::error::RegistryError;
use crate::registry::graph::resolve_graph;
use crate::registry::item::{RegistryItem, ResolvedItemSet};
use crate::registry::resolver::Registry;
use crate::registry::theme::{build_theme_item, fetch_base_color};

/// The catalog entry that installs the base project setup.
pub const INDEX_ITEM: &str = "index";

/// Resolve references into a merged, deduplicated item set.
///
/// When `index` is requested it is resolved first, and a theme item built
/// from the project's base color is prepended.
pub fn resolve_registry_tree(
    registry: &Registry,
    references: &[String],
) -> Result<ResolvedItemSet, RegistryError> {
    let includes_index = references.iter().any(|r| r == INDEX_ITEM);

    let mut ordered: Vec<String> = Vec::with_capacity(references.len());
    if includes_index {
        ordered.push(INDEX_ITEM.to_string());
    }
    ordered.extend(references.iter().filter(|r| *r != INDEX_ITEM).cloned());

    let resolution = resolve_graph(registry, &ordered)?;
    if !resolution.is_complete() {
        tracing::debug!(
            failed = resolution.failures.len(),
            "Some registry items could not be resolved"
        );
    }

    let mut items = resolution.ordered_items();

    if includes_index {
        let tailwind = &registry.config().components.tailwind;
        if !tailwind.base_color.is_empty() {
            if let Some(base_color) = fetch_base_color(registry, &tailwind.base_color) {
                items.insert(
                    0,
                    build_theme_item(&tailwind.base_color, &base_color, tailwind.css_variables),
                );
            }
        }
    }

    Ok(build_resolved_item_set(items))
}

/// Merge a list of items into a [`ResolvedItemSet`].
///
/// Theme items are stably sorted to the front before merging. Fragments are
/// merged in item order, dependency lists are flattened and deduplicated,
/// and docs are concatenated one per line.
pub fn build_resolved_item_set(mut items: Vec<RegistryItem>) -> ResolvedItemSet {
    items.sort_by_key(|item| !item.is_theme());

    let mut set = ResolvedItemSet {
        tailwind: merge_fragment_list(items.iter().filter_map(|item| item.tailwind.as_ref())),
        css_vars: merge_fragment_list(items.iter().filter_map(|item| item.css_vars.as_ref())),
        css: merge_fragment_list(items.iter().filter_map(|item| item.css.as_ref())),
        ..Default::default()
    };

    for item in &items {
        extend_unique(&mut set.dependencies, &item.dependencies);
        extend_unique(&mut set.dev_dependencies, &item.dev_dependencies);
        set.files.extend(item.files.iter().cloned());
        set.env_vars
            .extend(item.env_vars.iter().map(|(k, v)| (k.clone(), v.clone())));

        if let Some(docs) = item.docs.as_deref().filter(|d| !d.is_empty()) {
            set.docs.push_str(docs);
            set.docs.push('\n');
        }
    }

    set.items = items;
    set
}

fn extend_unique(target: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}
