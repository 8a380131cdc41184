//! View command implementation.
//!
//! The `regkit view` command prints the resolved item set as JSON without
//! touching the project.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::args::ViewArgs;
use crate::error::Result;
use crate::registry::resolve_registry_tree;
use crate::ui::UserInterface;

use super::dispatcher::{open_registry, Command, CommandResult, ConfigRequirement};
use super::display;

/// The view command implementation.
pub struct ViewCommand {
    project_root: PathBuf,
    args: ViewArgs,
}

impl ViewCommand {
    /// Create a new view command.
    pub fn new(project_root: &Path, args: ViewArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ViewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(registry) =
            open_registry(&self.project_root, ConfigRequirement::Optional, true, ui)?
        else {
            return Ok(CommandResult::failure(display::SETUP_FAILURE));
        };

        let tree = match resolve_registry_tree(&registry, &self.args.components) {
            Ok(tree) => tree,
            Err(e) => return display::handle_error(ui, e.into()),
        };
        if tree.items.is_empty() {
            display::show_unresolved(ui, &self.args.components);
            return Ok(CommandResult::failure(display::REGISTRY_FAILURE));
        }

        let json = serde_json::to_string_pretty(&tree)
            .context("Failed to serialize the resolved items")?;
        ui.message(&json);

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn view_prints_resolved_items() {
        let temp = TempDir::new().unwrap();
        let item = temp.path().join("hello.json");
        fs::write(
            &item,
            r#"{
                "name": "hello",
                "type": "registry:lib",
                "dependencies": ["zod"],
                "files": [{ "path": "lib/hello.ts", "type": "registry:lib", "content": "export {}" }]
            }"#,
        )
        .unwrap();

        let mut ui = MockUI::new();
        let args = ViewArgs {
            components: vec![item.display().to_string()],
        };
        let result = ViewCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        assert!(result.success);
        let printed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(printed["items"][0]["name"], "hello");
        assert_eq!(printed["dependencies"][0], "zod");
        assert!(!temp.path().join("lib/hello.ts").exists());
    }

    #[test]
    fn view_reports_missing_local_file() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = ViewArgs {
            components: vec![temp.path().join("missing.json").display().to_string()],
        };

        let result = ViewCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        assert!(!result.success);
        assert!(ui.has_error("Could not resolve"));
    }
}
