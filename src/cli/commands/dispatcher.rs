//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands
//! - [`open_registry`] for the project setup every command shares

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{default_config, load_config, EnvVars};
use crate::error::{RegkitError, Result};
use crate::registry::{FetchOptions, Registry, RegistrySettings};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Whether a missing `components.json` is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigRequirement {
    Required,
    /// Fall back to the default configuration.
    Optional,
}

/// Load the project configuration and build a [`Registry`] over it.
///
/// Returns `Ok(None)` after reporting to `ui` when a required
/// `components.json` is missing.
pub fn open_registry(
    project_root: &Path,
    requirement: ConfigRequirement,
    use_cache: bool,
    ui: &mut dyn UserInterface,
) -> Result<Option<Registry>> {
    let config = match load_config(project_root) {
        Ok(config) => config,
        Err(RegkitError::ConfigNotFound { path }) => match requirement {
            ConfigRequirement::Required => {
                ui.error(&format!("No components.json found at {}", path.display()));
                ui.hint("Create a components.json at the project root first.");
                return Ok(None);
            }
            ConfigRequirement::Optional => {
                tracing::debug!(path = %path.display(), "No components.json, using defaults");
                default_config(project_root)
            }
        },
        Err(e) => return Err(e),
    };

    let settings = RegistrySettings::from_env(EnvVars::from_process());
    Ok(Some(
        Registry::new(config, settings).with_options(FetchOptions { use_cache }),
    ))
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Add(args) => {
                let cmd = super::add::AddCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Commands::View(args) => {
                let cmd = super::view::ViewCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Commands::Namespaces(args) => {
                let cmd =
                    super::namespaces::NamespacesCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn required_config_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let registry =
            open_registry(temp.path(), ConfigRequirement::Required, true, &mut ui).unwrap();

        assert!(registry.is_none());
        assert!(ui.has_error("No components.json found"));
    }

    #[test]
    fn optional_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let registry = open_registry(temp.path(), ConfigRequirement::Optional, true, &mut ui)
            .unwrap()
            .unwrap();

        assert_eq!(registry.config().style(), "new-york");
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn invalid_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("components.json"), "{ not json").unwrap();
        let mut ui = MockUI::new();

        let result = open_registry(temp.path(), ConfigRequirement::Optional, true, &mut ui);
        assert!(matches!(result, Err(RegkitError::ConfigParseError { .. })));
    }
}
