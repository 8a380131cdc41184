//! Destination paths for registry files.

use std::path::{Path, PathBuf};

use crate::config::ResolvedPaths;
use crate::detection::Framework;
use crate::files::paths::{file_name, resolve_nested_file_path, strip_src_prefix};
use crate::registry::item::{ItemType, RegistryItemFile};

/// Project facts that influence where files land.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetOptions {
    /// The project keeps sources under `src/`.
    pub is_src_dir: bool,
    pub framework: Framework,
    /// Caller-supplied output file or directory for the first file.
    pub path_override: Option<PathBuf>,
}

/// Compute the destination of a file.
///
/// `file_index` is the file's position across every input list; the path
/// override applies only to index 0. Returns `None` when the file has no
/// destination (a page target the framework cannot route).
pub fn resolve_file_path(
    file: &RegistryItemFile,
    paths: &ResolvedPaths,
    options: &TargetOptions,
    file_index: usize,
) -> Option<PathBuf> {
    if file_index == 0 {
        if let Some(path_override) = &options.path_override {
            let resolved = if path_override.is_absolute() {
                path_override.clone()
            } else {
                paths.cwd.join(path_override)
            };
            return Some(if looks_like_file(&resolved) {
                resolved
            } else {
                resolved.join(file_name(&file.path))
            });
        }
    }

    if let Some(target) = file.target.as_deref() {
        if let Some(rest) = target.strip_prefix("~/") {
            return Some(paths.cwd.join(rest));
        }

        let target = if file.file_type == ItemType::Page {
            resolve_page_target(target, options.framework)?
        } else {
            target.to_string()
        };

        let target = strip_src_prefix(&target);
        return Some(if options.is_src_dir {
            paths.cwd.join("src").join(target)
        } else {
            paths.cwd.join(target)
        });
    }

    let target_dir = default_target_dir(file.file_type, paths);
    let relative = resolve_nested_file_path(&file.path, &target_dir.to_string_lossy());
    Some(target_dir.join(relative))
}

/// The directory a file type installs into when it has no explicit target.
pub fn default_target_dir(file_type: ItemType, paths: &ResolvedPaths) -> PathBuf {
    let preferred = match file_type {
        ItemType::Ui => paths.ui.as_ref(),
        ItemType::Lib => paths.lib.as_ref(),
        ItemType::Hook => paths.hooks.as_ref(),
        _ => paths.components.as_ref(),
    };

    preferred
        .or(paths.components.as_ref())
        .cloned()
        .unwrap_or_else(|| paths.cwd.clone())
}

/// Route an `app/...` page target through the framework's conventions.
///
/// Next.js (app router) keeps targets as they are. Pages router, React
/// Router and Laravel move the `app/` root and collapse `/page.tsx` into
/// the route file. Other frameworks cannot host pages.
pub fn resolve_page_target(target: &str, framework: Framework) -> Option<String> {
    let root = match framework {
        Framework::NextApp => return Some(target.to_string()),
        Framework::NextPages => "pages/",
        Framework::ReactRouter => "app/routes/",
        Framework::Laravel => "resources/js/pages/",
        Framework::Vite | Framework::Unknown => return None,
    };

    let routed = match target.strip_prefix("app/") {
        Some(rest) => format!("{root}{rest}"),
        None => target.to_string(),
    };
    Some(collapse_page_suffix(&routed))
}

/// `a/b/page.tsx` -> `a/b.tsx`
fn collapse_page_suffix(target: &str) -> String {
    for ext in [".tsx", ".ts", ".jsx", ".js"] {
        if let Some(prefix) = target.strip_suffix(&format!("/page{ext}")) {
            return format!("{prefix}{ext}");
        }
    }
    target.to_string()
}

fn looks_like_file(path: &Path) -> bool {
    path.extension().is_some()
}
