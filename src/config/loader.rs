//! Configuration file discovery and loading.
//!
//! `components.json` lives at the project root. Loading it yields a
//! [`Config`]: the parsed file, the directories its aliases resolve to, and
//! the detected project layout.

use crate::config::schema::{ComponentsConfig, Config, ResolvedPaths, CONFIG_FILE_NAME};
use crate::config::validator::validate;
use crate::detection::{ProjectDetector, ProjectInfo};
use crate::error::{RegkitError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// First segments that make an alias project-relative (`@/components`).
const ALIAS_ROOTS: &[&str] = &["@", "~", "#", "$"];

/// Find the project root by walking up from `start`.
///
/// Looks for `components.json` first, then falls back to `package.json`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    let mut package_root = None;

    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }

        if package_root.is_none() && current.join("package.json").is_file() {
            package_root = Some(current.clone());
        }

        if !current.pop() {
            return package_root;
        }
    }
}

/// Path of the config file for a project root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Load `components.json` and parse it.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the JSON is invalid.
pub fn load_config_file(path: &Path) -> Result<ComponentsConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RegkitError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RegkitError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse JSON content into a [`ComponentsConfig`].
pub fn parse_config(content: &str, source_path: &Path) -> Result<ComponentsConfig> {
    serde_json::from_str(content).map_err(|e| RegkitError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load, validate and resolve the configuration of a project.
pub fn load_config(project_root: &Path) -> Result<Config> {
    let components = load_config_file(&config_path(project_root))?;
    validate(&components)?;

    let project = ProjectDetector::detect(project_root);
    let resolved_paths = resolve_paths(project_root, &components, &project);

    tracing::debug!(
        root = %project_root.display(),
        style = %components.style,
        registries = components.registries.len(),
        "Loaded components.json"
    );

    Ok(Config {
        components,
        resolved_paths,
        project,
    })
}

/// Build a [`Config`] without a config file, using defaults.
pub fn default_config(project_root: &Path) -> Config {
    let components = ComponentsConfig::default();
    let project = ProjectDetector::detect(project_root);
    let resolved_paths = resolve_paths(project_root, &components, &project);
    Config {
        components,
        resolved_paths,
        project,
    }
}

/// Resolve every alias of `components` to an absolute directory.
pub fn resolve_paths(
    project_root: &Path,
    components: &ComponentsConfig,
    project: &ProjectInfo,
) -> ResolvedPaths {
    let aliases = &components.aliases;
    let resolve = |alias: &str| resolve_alias(alias, project_root, project.src_dir);

    ResolvedPaths {
        cwd: project_root.to_path_buf(),
        components: Some(resolve(&aliases.components)),
        ui: Some(resolve(&aliases.ui())),
        lib: Some(resolve(&aliases.lib())),
        hooks: Some(resolve(&aliases.hooks())),
        utils: Some(resolve(&aliases.utils)),
        tailwind_css: (!components.tailwind.css.is_empty())
            .then(|| project_root.join(&components.tailwind.css)),
    }
}

/// Resolve an import alias to a directory.
///
/// `@/components` maps to `<root>/components`, or `<root>/src/components`
/// when the project uses a `src` directory. Aliases without a known root
/// segment are treated as paths relative to the project root.
pub fn resolve_alias(alias: &str, project_root: &Path, src_dir: bool) -> PathBuf {
    let base = if src_dir {
        project_root.join("src")
    } else {
        project_root.to_path_buf()
    };

    match alias.split_once('/') {
        Some((root, rest)) if ALIAS_ROOTS.contains(&root) => base.join(rest),
        _ if ALIAS_ROOTS.contains(&alias) => base,
        _ => project_root.join(alias.trim_start_matches("./")),
    }
}
