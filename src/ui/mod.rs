//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use regkit::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("regkit");
//! ui.success("Installed button");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_confirm;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, RegkitTheme};

use std::path::Path;

use crate::error::Result;
use crate::files::OverwritePrompt;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a secondary hint.
    fn hint(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Remove the spinner without a final message.
    fn finish_clear(&mut self);
}

/// Asks the user before a changed file is overwritten.
///
/// A prompt that cannot be shown counts as "no".
pub struct UiOverwritePrompt<'a> {
    ui: &'a mut dyn UserInterface,
}

impl<'a> UiOverwritePrompt<'a> {
    pub fn new(ui: &'a mut dyn UserInterface) -> Self {
        Self { ui }
    }
}

impl OverwritePrompt for UiOverwritePrompt<'_> {
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        let question = format!("{} already exists. Overwrite?", path.display());
        match self.ui.confirm(&question, false) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Overwrite prompt failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_prompt_uses_ui_answer() {
        let mut ui = MockUI::new();
        ui.queue_confirm_responses(vec![true, false]);

        let mut prompt = UiOverwritePrompt::new(&mut ui);
        assert!(prompt.confirm_overwrite(Path::new("/p/a.tsx")));
        assert!(!prompt.confirm_overwrite(Path::new("/p/b.tsx")));

        assert_eq!(
            ui.prompts_shown(),
            [
                "/p/a.tsx already exists. Overwrite?",
                "/p/b.tsx already exists. Overwrite?"
            ]
        );
    }

    #[test]
    fn overwrite_prompt_defaults_to_no() {
        let mut ui = MockUI::new();
        let mut prompt = UiOverwritePrompt::new(&mut ui);
        assert!(!prompt.confirm_overwrite(Path::new("/p/a.tsx")));
    }
}
