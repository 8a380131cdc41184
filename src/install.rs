//! The `add` workflow.
//!
//! 1. Configure every registry the references reach, persisting newly
//!    discovered entries into `components.json`
//! 2. Resolve the references into a [`ResolvedItemSet`]
//! 3. Compute and deduplicate file destinations
//! 4. Run the transform pipeline over each file
//! 5. Write the files
//!
//! Nothing is written until resolution and transformation have succeeded
//! for every file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{config_path, persist_registries, Config, RegistryConfigEntry};
use crate::error::Result;
use crate::files::{
    env_file::is_env_file, resolve_files_with_dedup, write_files, OverwritePrompt, ResolvedFile,
    TargetOptions, WriteOptions, WriteReport,
};
use crate::registry::builtin::icons_url;
use crate::registry::item::ResolvedItemSet;
use crate::registry::theme::fetch_base_color;
use crate::registry::{
    ensure_registries_configured, resolve_registry_tree, Registry, RegistryReference,
};
use crate::transform::{IconMap, Pipeline, TransformContext};

/// Extensions the transform pipeline understands.
const SCRIPT_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "mjs", "cjs"];

/// Options for [`add_components`].
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Replace changed files without asking.
    pub overwrite: bool,
    /// Output file or directory for the first file.
    pub path: Option<PathBuf>,
    /// Keep newly discovered registries in memory only.
    pub skip_persist: bool,
}

/// Outcome of [`add_components`].
#[derive(Debug, Clone, Default)]
pub struct AddReport {
    /// The resolved items and their merged fragments.
    pub tree: ResolvedItemSet,
    /// Every computed destination, in write order.
    pub destinations: Vec<PathBuf>,
    pub writes: WriteReport,
    /// Registries added from the registries index.
    pub added_registries: BTreeMap<String, RegistryConfigEntry>,
}

/// Install `references` into the project behind `registry`.
///
/// # Errors
///
/// Setup errors (unconfigured registries, missing environment variables),
/// transform failures and file system errors.
pub fn add_components(
    registry: &mut Registry,
    references: &[String],
    options: &AddOptions,
    prompt: &mut dyn OverwritePrompt,
) -> Result<AddReport> {
    let added_registries = ensure_registries_configured(registry, references)?;
    if !added_registries.is_empty() {
        tracing::info!(
            registries = ?added_registries.keys().collect::<Vec<_>>(),
            "Configured registries from the registries index"
        );
        if !options.skip_persist {
            persist_registries(
                &config_path(&registry.config().resolved_paths.cwd),
                &added_registries,
            )?;
        }
    }

    let tree = resolve_registry_tree(registry, references)?;
    tracing::debug!(items = ?tree.names(), files = tree.files.len(), "Resolved registry tree");

    let files = plan_files(registry.config(), &tree, options.path.clone());
    let files = transform_files(registry, files, is_remote_install(references))?;
    let destinations = files.iter().map(|file| file.target.clone()).collect();

    let writes = write_files(
        &files,
        WriteOptions {
            overwrite: options.overwrite,
        },
        prompt,
    )?;

    Ok(AddReport {
        tree,
        destinations,
        writes,
        added_registries,
    })
}

/// Compute destinations for every file of `tree`.
pub fn plan_files(
    config: &Config,
    tree: &ResolvedItemSet,
    path_override: Option<PathBuf>,
) -> Vec<ResolvedFile> {
    let options = TargetOptions {
        is_src_dir: config.project.src_dir,
        framework: config.project.framework,
        path_override,
    };
    resolve_files_with_dedup(
        &tree.file_lists(),
        &config.resolved_paths,
        &options,
        config.components.tsx,
    )
}

/// Run the default pipeline over every script file.
///
/// `.env` files and non-script files pass through untouched.
pub fn transform_files(
    registry: &Registry,
    mut files: Vec<ResolvedFile>,
    is_remote: bool,
) -> Result<Vec<ResolvedFile>> {
    let components = &registry.config().components;
    let base_color = (!components.tailwind.css_variables
        && !components.tailwind.base_color.is_empty())
    .then(|| fetch_base_color(registry, &components.tailwind.base_color))
    .flatten();
    let icons = components
        .icon_library
        .as_ref()
        .and_then(|_| fetch_icon_map(registry));

    let pipeline = Pipeline::default();
    for file in &mut files {
        if is_env_file(&file.target) || !is_script(&file.target) {
            continue;
        }
        let Some(content) = file.file.content.as_deref() else {
            continue;
        };

        let ctx = TransformContext::new(&file.file.path, components)
            .with_base_color(base_color.as_ref())
            .with_icons(icons.as_ref())
            .remote(is_remote);
        let transformed = pipeline.run(content, &ctx)?;
        file.file.content = Some(transformed);
    }

    Ok(files)
}

/// Fetch the icon map. Failures are logged and yield `None`.
pub fn fetch_icon_map(registry: &Registry) -> Option<IconMap> {
    let url = icons_url(&registry.settings().registry_url);
    let value = match registry.fetch_document(&url) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Could not fetch icon map: {e}");
            return None;
        }
    };
    match serde_json::from_value(value) {
        Ok(icons) => Some(icons),
        Err(e) => {
            tracing::warn!("Invalid icon map: {e}");
            None
        }
    }
}

fn is_remote_install(references: &[String]) -> bool {
    references.iter().any(|reference| {
        matches!(
            RegistryReference::parse(reference),
            RegistryReference::Url(_) | RegistryReference::LocalPath(_)
        )
    })
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}
