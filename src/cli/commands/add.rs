//! Add command implementation.
//!
//! The `regkit add` command resolves components and writes their files into
//! the project.

use std::path::{Path, PathBuf};

use crate::cli::args::AddArgs;
use crate::error::Result;
use crate::files::OverwritePrompt;
use crate::install::{add_components, AddOptions, AddReport};
use crate::ui::{SpinnerHandle, UiOverwritePrompt, UserInterface};

use super::dispatcher::{open_registry, Command, CommandResult, ConfigRequirement};
use super::display;

/// The add command implementation.
pub struct AddCommand {
    project_root: PathBuf,
    args: AddArgs,
}

impl AddCommand {
    /// Create a new add command.
    pub fn new(project_root: &Path, args: AddArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &AddArgs {
        &self.args
    }

    fn options(&self) -> AddOptions {
        AddOptions {
            overwrite: self.args.overwrite || self.args.yes,
            path: self.args.path.clone(),
            skip_persist: false,
        }
    }

    fn show_report(&self, ui: &mut dyn UserInterface, report: &AddReport) {
        if !report.added_registries.is_empty() {
            let names: Vec<&str> = report.added_registries.keys().map(String::as_str).collect();
            ui.success(&format!(
                "Added {} to components.json",
                names.join(", ")
            ));
        }

        display::show_write_report(ui, &report.writes, &self.project_root);

        if report.writes.is_empty() {
            ui.warning("No files to write.");
        }

        if !report.tree.dependencies.is_empty() {
            ui.message(&format!(
                "Dependencies: {}",
                report.tree.dependencies.join(" ")
            ));
        }
        if !report.tree.dev_dependencies.is_empty() {
            ui.message(&format!(
                "Dev dependencies: {}",
                report.tree.dev_dependencies.join(" ")
            ));
        }
        if !report.tree.docs.is_empty() {
            ui.message(&report.tree.docs);
        }
    }
}

impl Command for AddCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(mut registry) = open_registry(
            &self.project_root,
            ConfigRequirement::Required,
            !self.args.no_cache,
            ui,
        )?
        else {
            return Ok(CommandResult::failure(display::SETUP_FAILURE));
        };

        let spinner = ui.start_spinner(&format!(
            "Resolving {}",
            self.args.components.join(", ")
        ));
        let options = self.options();

        let (result, spinner) = {
            let mut prompt = SpinnerPrompt {
                spinner: Some(spinner),
                inner: UiOverwritePrompt::new(ui),
            };
            let result = add_components(&mut registry, &self.args.components, &options, &mut prompt);
            (result, prompt.spinner)
        };

        let report = match result {
            Ok(report) => {
                if let Some(mut spinner) = spinner {
                    spinner.finish_success(&format!("Resolved {}", report.tree.names().join(", ")));
                }
                report
            }
            Err(e) => {
                if let Some(mut spinner) = spinner {
                    spinner.finish_error("Could not add components");
                }
                return display::handle_error(ui, e);
            }
        };

        if report.tree.items.is_empty() {
            display::show_unresolved(ui, &self.args.components);
            return Ok(CommandResult::failure(display::REGISTRY_FAILURE));
        }

        self.show_report(ui, &report);
        Ok(CommandResult::success())
    }
}

/// Clears the progress spinner before the first overwrite question.
struct SpinnerPrompt<'a> {
    spinner: Option<Box<dyn SpinnerHandle>>,
    inner: UiOverwritePrompt<'a>,
}

impl OverwritePrompt for SpinnerPrompt<'_> {
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        if let Some(mut spinner) = self.spinner.take() {
            spinner.finish_clear();
        }
        self.inner.confirm_overwrite(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const ITEM: &str = r#"{
        "name": "badge",
        "type": "registry:ui",
        "dependencies": ["class-variance-authority"],
        "files": [{ "path": "ui/badge.tsx", "type": "registry:ui", "content": "export const Badge = 1\n" }]
    }"#;

    fn setup_project() -> (TempDir, String) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("components.json"), "{}").unwrap();
        let item = temp.path().join("badge.json");
        fs::write(&item, ITEM).unwrap();
        let reference = item.display().to_string();
        (temp, reference)
    }

    fn args(reference: &str) -> AddArgs {
        AddArgs {
            components: vec![reference.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn add_writes_files_and_reports() {
        let (temp, reference) = setup_project();
        let mut ui = MockUI::new();

        let result = AddCommand::new(temp.path(), args(&reference))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(temp.path().join("components/ui/badge.tsx").exists());
        assert!(ui.has_success("Created 1 file"));
        assert!(ui.has_message("components/ui/badge.tsx"));
        assert!(ui.has_message("Dependencies: class-variance-authority"));
        assert_eq!(ui.spinners().len(), 1);
    }

    #[test]
    fn add_asks_before_overwriting() {
        let (temp, reference) = setup_project();
        let target = temp.path().join("components/ui/badge.tsx");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "local edits\n").unwrap();

        let mut ui = MockUI::new();
        ui.queue_confirm_responses(vec![false]);
        let result = AddCommand::new(temp.path(), args(&reference))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.prompts_shown().len(), 1);
        assert!(ui.has_warning("Skipped 1 file"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "local edits\n");
    }

    #[test]
    fn add_with_yes_overwrites_without_asking() {
        let (temp, reference) = setup_project();
        let target = temp.path().join("components/ui/badge.tsx");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "local edits\n").unwrap();

        let mut ui = MockUI::new();
        let mut add_args = args(&reference);
        add_args.yes = true;
        AddCommand::new(temp.path(), add_args)
            .execute(&mut ui)
            .unwrap();

        assert!(ui.prompts_shown().is_empty());
        assert!(ui.has_success("Updated 1 file"));
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "export const Badge = 1\n"
        );
    }

    #[test]
    fn add_requires_config() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = AddCommand::new(temp.path(), args("button"))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, display::SETUP_FAILURE);
        assert!(ui.has_error("No components.json found"));
    }

    #[test]
    fn add_reports_unknown_registry() {
        let (temp, _) = setup_project();
        let mut ui = MockUI::new();
        // Keep the registries index lookup off the network.
        std::env::set_var("REGISTRY_URL", "http://127.0.0.1:9/r");

        let result = AddCommand::new(temp.path(), args("@nowhere/thing"))
            .execute(&mut ui)
            .unwrap();

        assert!(!result.success);
        assert!(ui.has_error("@nowhere"));
    }
}
