//! Dependency graph expansion.
//!
//! Expands requested references into the transitive closure of registry
//! items. The traversal is breadth-first and level-wise: every unvisited
//! reference in a level is fetched concurrently. The visited set is keyed by
//! the raw reference string, so repeated references and cycles are skipped
//! before any network call.
//!
//! Failures are recorded per node and the traversal continues, except for
//! setup errors (unknown registry, missing environment variables), which are
//! returned once the level they occurred in completes.

use std::collections::{HashMap, HashSet};

use crate::error::RegistryError;
use crate::registry::item::RegistryItem;
use crate::registry::resolver::Registry;

/// A successfully resolved reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    /// The reference as it was requested.
    pub reference: String,
    pub item: RegistryItem,
}

/// Outcome of expanding a set of references.
#[derive(Debug, Clone, Default)]
pub struct GraphResolution {
    /// Resolved nodes in traversal order.
    pub nodes: Vec<ResolvedNode>,
    /// References that could not be resolved, with the reason.
    pub failures: Vec<(String, RegistryError)>,
}

impl GraphResolution {
    /// Whether every reference resolved.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Items deduplicated by name and ordered dependencies-first.
    ///
    /// See [`order_items`].
    pub fn ordered_items(&self) -> Vec<RegistryItem> {
        order_items(&self.nodes)
    }
}

/// Expand `references` into every transitively required item.
pub fn resolve_graph(
    registry: &Registry,
    references: &[String],
) -> Result<GraphResolution, RegistryError> {
    let mut resolution = GraphResolution::default();
    let mut visited: HashSet<String> = HashSet::new();
    let mut level: Vec<String> = references.to_vec();

    while !level.is_empty() {
        let batch: Vec<String> = level
            .drain(..)
            .filter(|reference| visited.insert(reference.clone()))
            .collect();
        if batch.is_empty() {
            break;
        }

        tracing::debug!(count = batch.len(), "Resolving registry items");
        let mut setup_error = None;

        for (reference, result) in batch.iter().zip(registry.fetch_items(&batch)) {
            match result {
                Ok(item) => {
                    level.extend(
                        item.registry_dependencies
                            .iter()
                            .filter(|dependency| !visited.contains(*dependency))
                            .cloned(),
                    );
                    resolution.nodes.push(ResolvedNode {
                        reference: reference.clone(),
                        item,
                    });
                }
                Err(e) => {
                    if e.is_setup_error() && setup_error.is_none() {
                        setup_error = Some(e.clone());
                    } else {
                        tracing::warn!(reference = %reference, code = %e.code(), "Skipping unresolved item: {e}");
                    }
                    resolution.failures.push((reference.clone(), e));
                }
            }
        }

        if let Some(e) = setup_error {
            return Err(e);
        }
    }

    Ok(resolution)
}

/// Deduplicate nodes by item name and order dependencies before dependents.
///
/// An item keeps the position of its first occurrence and the content of its
/// last. Independent items keep traversal order; cycles are broken at the
/// edge that closes them.
pub fn order_items(nodes: &[ResolvedNode]) -> Vec<RegistryItem> {
    let mut names: Vec<&str> = Vec::new();
    let mut items: HashMap<&str, &RegistryItem> = HashMap::new();
    let mut by_reference: HashMap<&str, &str> = HashMap::new();

    for node in nodes {
        let name = node.item.name.as_str();
        if items.insert(name, &node.item).is_none() {
            names.push(name);
        }
        by_reference.insert(node.reference.as_str(), name);
    }

    let mut ordered: Vec<RegistryItem> = Vec::with_capacity(names.len());
    let mut state: HashMap<&str, VisitState> = HashMap::new();

    for &name in &names {
        visit(name, &items, &by_reference, &mut state, &mut ordered);
    }

    ordered
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

fn visit<'a>(
    name: &'a str,
    items: &HashMap<&'a str, &'a RegistryItem>,
    by_reference: &HashMap<&'a str, &'a str>,
    state: &mut HashMap<&'a str, VisitState>,
    ordered: &mut Vec<RegistryItem>,
) {
    if state.contains_key(name) {
        return;
    }
    let Some(&item) = items.get(name) else {
        return;
    };
    state.insert(name, VisitState::InProgress);

    for dependency in &item.registry_dependencies {
        let Some(&dependency_name) = by_reference.get(dependency.as_str()) else {
            continue;
        };
        match state.get(dependency_name) {
            Some(VisitState::InProgress) => {
                tracing::debug!(item = name, dependency = %dependency, "Circular dependency detected");
            }
            Some(VisitState::Done) => {}
            None => visit(dependency_name, items, by_reference, state, ordered),
        }
    }

    state.insert(name, VisitState::Done);
    ordered.push(item.clone());
}
