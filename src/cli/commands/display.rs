//! Shared display helpers.
//!
//! These helpers are used by `add`, `view` and `namespaces` to render
//! registry failures and write reports consistently.

use std::path::Path;

use crate::error::{RegistryError, RegkitError, Result};
use crate::files::WriteReport;
use crate::ui::UserInterface;

use super::dispatcher::CommandResult;

/// Exit code for registry failures.
pub const REGISTRY_FAILURE: i32 = 1;

/// Exit code for setup problems the user has to fix.
pub const SETUP_FAILURE: i32 = 2;

/// `path` relative to `root`, or unchanged when it lies outside.
pub fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Print a registry error with its context and suggestion.
pub fn show_registry_error(ui: &mut dyn UserInterface, error: &RegistryError) {
    ui.error(&error.to_string());
    for (key, value) in error.context() {
        ui.message(&format!("  {key}: {value}"));
    }
    if let Some(suggestion) = error.suggestion() {
        ui.hint(&suggestion);
    }
}

/// Report that none of `references` resolved to an item.
pub fn show_unresolved(ui: &mut dyn UserInterface, references: &[String]) {
    ui.error(&format!("Could not resolve {}", references.join(", ")));
    ui.hint("Run with --debug to see why each item was skipped.");
}

/// Turn registry failures into a failed [`CommandResult`]; pass other
/// errors through.
pub fn handle_error(ui: &mut dyn UserInterface, error: RegkitError) -> Result<CommandResult> {
    match error {
        RegkitError::Registry(error) => {
            show_registry_error(ui, &error);
            let code = if error.is_setup_error() {
                SETUP_FAILURE
            } else {
                REGISTRY_FAILURE
            };
            Ok(CommandResult::failure(code))
        }
        other => Err(other),
    }
}

/// Print the created, updated and skipped files of a write.
pub fn show_write_report(ui: &mut dyn UserInterface, report: &WriteReport, root: &Path) {
    let sections = [
        ("Created", &report.created),
        ("Updated", &report.updated),
        ("Skipped", &report.skipped),
    ];

    for (label, paths) in sections {
        if paths.is_empty() {
            continue;
        }
        let noun = if paths.len() == 1 { "file" } else { "files" };
        let line = format!("{label} {} {noun}:", paths.len());
        if label == "Skipped" {
            ui.warning(&line);
        } else {
            ui.success(&line);
        }
        for path in paths {
            ui.message(&format!("  - {}", relative_display(path, root)));
        }
    }
}
