//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Report the version of an installation and its dependencies.
#[derive(Debug, Parser)]
#[command(name = "appversion")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Installation root (defaults to the current directory)
    #[arg(short = 'd', long, global = true, env = "APPVERSION_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    /// Path to config file (overrides <install-dir>/appversion.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show every component version (default if no command specified)
    Report(ReportArgs),

    /// Print the application version
    Local,

    /// Show the checked-out commit
    Commit(CommitArgs),

    /// Print the last ten commits
    Changelog,
}

/// Arguments for the `report` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the upstream commit lookup
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the `commit` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommitArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
