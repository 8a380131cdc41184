//! Namespaces command implementation.
//!
//! The `regkit namespaces` command lists the registry namespaces a set of
//! references reaches, without checking that they are configured.

use std::path::{Path, PathBuf};

use crate::cli::args::NamespacesArgs;
use crate::error::Result;
use crate::registry::discover_namespaces;
use crate::ui::UserInterface;

use super::dispatcher::{open_registry, Command, CommandResult, ConfigRequirement};
use super::display;

/// The namespaces command implementation.
pub struct NamespacesCommand {
    project_root: PathBuf,
    args: NamespacesArgs,
}

impl NamespacesCommand {
    /// Create a new namespaces command.
    pub fn new(project_root: &Path, args: NamespacesArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for NamespacesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(registry) =
            open_registry(&self.project_root, ConfigRequirement::Optional, true, ui)?
        else {
            return Ok(CommandResult::failure(display::SETUP_FAILURE));
        };

        let namespaces = discover_namespaces(&registry, &self.args.components);
        for namespace in &namespaces {
            let marker = if registry.is_configured(namespace) {
                ""
            } else {
                " (not configured)"
            };
            ui.message(&format!("{namespace}{marker}"));
        }

        Ok(CommandResult::success())
    }
}
