//! Cross-item file resolution and deduplication.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::ResolvedPaths;
use crate::files::paths::{find_common_root, to_js_extension};
use crate::files::target::{resolve_file_path, TargetOptions};
use crate::registry::item::RegistryItemFile;

/// A registry file together with where it will be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFile {
    pub file: RegistryItemFile,
    pub target: PathBuf,
}

impl ResolvedFile {
    pub fn content(&self) -> Option<&str> {
        self.file.content.as_deref()
    }
}

/// Whether the directory map is complete enough to compute real targets.
pub fn can_deduplicate(paths: &ResolvedPaths) -> bool {
    !paths.cwd.as_os_str().is_empty()
        && (paths.ui.is_some()
            || paths.lib.is_some()
            || paths.components.is_some()
            || paths.hooks.is_some())
}

/// Resolve every file's destination and collapse duplicates.
///
/// Files sharing a destination keep the position of the first and the
/// descriptor of the last. Files without a destination are dropped. When
/// the directory map is incomplete the files are concatenated in order,
/// laid out under `cwd` relative to their common root, without
/// deduplication.
pub fn resolve_files_with_dedup(
    lists: &[&[RegistryItemFile]],
    paths: &ResolvedPaths,
    options: &TargetOptions,
    tsx: bool,
) -> Vec<ResolvedFile> {
    if !can_deduplicate(paths) {
        tracing::debug!("Directory map incomplete, skipping file deduplication");
        return concatenate(lists, paths);
    }

    let mut resolved: Vec<ResolvedFile> = Vec::new();
    let mut positions: HashMap<PathBuf, usize> = HashMap::new();

    for (index, file) in lists.iter().flat_map(|list| list.iter()).enumerate() {
        let Some(target) = resolve_file_path(file, paths, options, index) else {
            tracing::debug!(path = %file.path, "No destination for file, skipping");
            continue;
        };
        let target = if tsx { target } else { to_js_extension(&target) };

        match positions.get(&target) {
            Some(&position) => {
                tracing::debug!(
                    destination = %target.display(),
                    replaced = %resolved[position].file.path,
                    by = %file.path,
                    "Duplicate file destination"
                );
                resolved[position].file = file.clone();
            }
            None => {
                positions.insert(target.clone(), resolved.len());
                resolved.push(ResolvedFile {
                    file: file.clone(),
                    target,
                });
            }
        }
    }

    resolved
}

fn concatenate(lists: &[&[RegistryItemFile]], paths: &ResolvedPaths) -> Vec<ResolvedFile> {
    let all: Vec<&RegistryItemFile> = lists.iter().flat_map(|list| list.iter()).collect();
    let all_paths: Vec<&str> = all.iter().map(|file| file.path.as_str()).collect();

    all.iter()
        .map(|file| {
            let root = find_common_root(&all_paths, &file.path);
            let normalized = file.path.trim_start_matches('/');
            let relative = normalized
                .strip_prefix(root.trim_start_matches('/'))
                .unwrap_or(normalized)
                .trim_start_matches('/');
            ResolvedFile {
                file: (*file).clone(),
                target: paths.cwd.join(relative),
            }
        })
        .collect()
}
