//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// regkit - Resolve and install components from registries.
#[derive(Debug, Parser)]
#[command(name = "regkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add components to the project
    Add(AddArgs),

    /// Print the resolved items as JSON
    View(ViewArgs),

    /// List the registry namespaces the references depend on
    Namespaces(NamespacesArgs),
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddArgs {
    /// Components to add (names, @namespace/names, URLs or local files)
    #[arg(required = true)]
    pub components: Vec<String>,

    /// Overwrite existing files without asking
    #[arg(short, long)]
    pub overwrite: bool,

    /// Answer yes to every prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Write the first file to this file or directory
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Bypass the request cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `view` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ViewArgs {
    /// Components to resolve
    #[arg(required = true)]
    pub components: Vec<String>,
}

/// Arguments for the `namespaces` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NamespacesArgs {
    /// Components whose namespaces to discover
    #[arg(required = true)]
    pub components: Vec<String>,
}
