//! Namespace discovery and registry auto-configuration.
//!
//! Discovery walks the same reference graph as the resolver but only
//! records which namespaces are touched. It never fails: an unconfigured
//! registry is exactly what it is looking for, and unreachable nodes are
//! treated as dead ends.

use serde_json::Value;
use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::config::RegistryConfigEntry;
use crate::error::RegistryError;
use crate::registry::builtin::{is_builtin, registries_index_url};
use crate::registry::reference::RegistryReference;
use crate::registry::resolver::Registry;

/// Every non-built-in namespace reachable from `references`, in
/// first-discovery order.
pub fn discover_namespaces(registry: &Registry, references: &[String]) -> Vec<String> {
    let mut namespaces: Vec<String> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    for reference in references {
        record_namespace(&mut namespaces, reference);
        if visited.insert(reference.clone()) {
            queue.push_back(reference.clone());
        }
    }

    while let Some(reference) = queue.pop_front() {
        let item = match registry.fetch_item(&reference) {
            Ok(item) => item,
            Err(RegistryError::NotConfigured { registry: name }) => {
                tracing::debug!(reference = %reference, registry = ?name, "Registry not configured");
                continue;
            }
            Err(e) => {
                tracing::debug!(reference = %reference, "Skipping namespace discovery: {e}");
                continue;
            }
        };

        for dependency in &item.registry_dependencies {
            record_namespace(&mut namespaces, dependency);
            if visited.insert(dependency.clone()) {
                queue.push_back(dependency.clone());
            }
        }
    }

    namespaces
}

fn record_namespace(namespaces: &mut Vec<String>, reference: &str) {
    if let Some(namespace) = RegistryReference::parse(reference).namespace() {
        if !is_builtin(namespace) && !namespaces.iter().any(|n| n == namespace) {
            namespaces.push(namespace.to_string());
        }
    }
}

/// Fetch the registries index (namespace -> URL template).
pub fn fetch_registries_index(
    registry: &Registry,
) -> Result<BTreeMap<String, RegistryConfigEntry>, RegistryError> {
    let url = registries_index_url(&registry.settings().registry_url);
    let value = registry.fetch_document(&url)?;

    let Value::Object(entries) = value else {
        return Err(RegistryError::Parse {
            item: url,
            message: "expected an object of namespace to URL".to_string(),
        });
    };

    Ok(entries
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(url) => Some((name, RegistryConfigEntry::Template(url))),
            _ => None,
        })
        .collect())
}

/// Configure every namespace reachable from `references`.
///
/// Unconfigured namespaces are looked up in the registries index and added
/// to `registry`. Discovery repeats until no new namespace appears, since a
/// newly configured registry can reveal further dependencies. Returns the
/// entries that were added; fails with `NotConfigured` for a namespace the
/// index does not know.
pub fn ensure_registries_configured(
    registry: &mut Registry,
    references: &[String],
) -> Result<BTreeMap<String, RegistryConfigEntry>, RegistryError> {
    let mut added: BTreeMap<String, RegistryConfigEntry> = BTreeMap::new();
    let mut index: Option<BTreeMap<String, RegistryConfigEntry>> = None;

    loop {
        let missing: Vec<String> = discover_namespaces(registry, references)
            .into_iter()
            .filter(|namespace| !registry.is_configured(namespace))
            .collect();

        let Some(first_missing) = missing.first() else {
            return Ok(added);
        };

        if index.is_none() {
            index = Some(fetch_registries_index(registry).map_err(|e| {
                tracing::warn!("Could not fetch registries index: {e}");
                RegistryError::NotConfigured {
                    registry: Some(first_missing.clone()),
                }
            })?);
        }
        let known = index.as_ref().map(|index| index.len()).unwrap_or_default();
        tracing::debug!(missing = missing.len(), known, "Looking up registries");

        let mut found = Vec::with_capacity(missing.len());
        for namespace in &missing {
            let entry = index
                .as_ref()
                .and_then(|index| index.get(namespace))
                .ok_or_else(|| RegistryError::NotConfigured {
                    registry: Some(namespace.clone()),
                })?;
            found.push((namespace.clone(), entry.clone()));
        }

        added.extend(found.iter().cloned());
        registry.add_registries(found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_only_namespaced_non_builtin_references() {
        let mut namespaces = Vec::new();
        for reference in [
            "@foo/button",
            "button",
            "@shadcn/card",
            "https://acme.dev/r/x.json",
            "./local.json",
            "@foo/card",
            "@bar/dialog",
        ] {
            record_namespace(&mut namespaces, reference);
        }
        assert_eq!(namespaces, vec!["@foo", "@bar"]);
    }
}
