//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`regkit add`, `regkit view`)
//! - Shared project and registry setup
//! - Consistent global flag handling

pub mod add;
pub mod dispatcher;
pub mod display;
pub mod namespaces;
pub mod view;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
