//! Source rewriting applied to registry files before they are written.
//!
//! Each pass implements [`Transform`]: it takes the current text and the
//! shared [`TransformContext`] and returns the rewritten text. A
//! [`Pipeline`] runs its passes in order, each one seeing the output of the
//! previous. A pass that cannot lex its input fails the whole file, so a
//! file is never written half-transformed.
//!
//! The default order is:
//! 1. [`ImportsTransform`]: internal import paths to project aliases
//! 2. [`DirectivesTransform`]: drop `"use client"` outside RSC projects
//! 3. [`CssVarsTransform`]: inline base colors when CSS variables are off
//! 4. [`RtlTransform`]: logical classes for RTL projects
//! 5. [`PrefixTransform`]: apply the Tailwind class prefix
//! 6. [`IconsTransform`]: switch icons to the project's icon library
//! 7. [`MarkersTransform`]: strip internal `cn-*` marker classes

pub mod css_vars;
pub mod directives;
pub mod icons;
pub mod imports;
pub mod markers;
pub mod prefix;
pub mod rtl;
pub mod source;

use thiserror::Error;

use crate::config::ComponentsConfig;
use crate::error::RegistryError;
use crate::registry::item::BaseColor;

pub use css_vars::CssVarsTransform;
pub use directives::DirectivesTransform;
pub use icons::{IconLibrary, IconMap, IconsTransform};
pub use imports::ImportsTransform;
pub use markers::MarkersTransform;
pub use prefix::PrefixTransform;
pub use rtl::RtlTransform;

/// Why a pass could not process its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("unterminated string literal at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("unterminated comment at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("unclosed '{open}' at byte {offset}")]
    Unclosed { open: char, offset: usize },
}

/// Everything a pass may consult besides the text itself.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// Registry path of the file, used in error reports.
    pub file_path: &'a str,
    pub config: &'a ComponentsConfig,
    /// The project's base color, when it could be fetched.
    pub base_color: Option<&'a BaseColor>,
    /// Icon name table, when it could be fetched.
    pub icons: Option<&'a IconMap>,
    /// The file came from a URL or local-file reference.
    pub is_remote: bool,
}

impl<'a> TransformContext<'a> {
    pub fn new(file_path: &'a str, config: &'a ComponentsConfig) -> Self {
        Self {
            file_path,
            config,
            base_color: None,
            icons: None,
            is_remote: false,
        }
    }

    pub fn with_base_color(mut self, base_color: Option<&'a BaseColor>) -> Self {
        self.base_color = base_color;
        self
    }

    pub fn with_icons(mut self, icons: Option<&'a IconMap>) -> Self {
        self.icons = icons;
        self
    }

    pub fn remote(mut self, is_remote: bool) -> Self {
        self.is_remote = is_remote;
        self
    }

    /// The project is plain JavaScript.
    pub fn is_non_typed(&self) -> bool {
        !self.config.tsx
    }
}

/// One content-rewriting pass.
pub trait Transform: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    fn apply(&self, source: &str, ctx: &TransformContext<'_>) -> Result<String, TransformError>;
}

/// An ordered list of passes.
pub struct Pipeline {
    passes: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// A pipeline with no passes.
    pub fn empty() -> Self {
        Self { passes: Vec::new() }
    }

    /// Append a pass.
    pub fn with(mut self, pass: impl Transform + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Names of the passes, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Run every pass over `source`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Parse` naming the file and the failing pass.
    pub fn run(&self, source: &str, ctx: &TransformContext<'_>) -> Result<String, RegistryError> {
        let mut text = source.to_string();
        for pass in &self.passes {
            text = pass.apply(&text, ctx).map_err(|e| {
                tracing::debug!(file = ctx.file_path, pass = pass.name(), "Transform failed: {e}");
                RegistryError::Parse {
                    item: ctx.file_path.to_string(),
                    message: format!("{} transform failed: {e}", pass.name()),
                }
            })?;
        }
        Ok(text)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::empty()
            .with(ImportsTransform)
            .with(DirectivesTransform)
            .with(CssVarsTransform)
            .with(RtlTransform)
            .with(PrefixTransform)
            .with(IconsTransform)
            .with(MarkersTransform)
    }
}
