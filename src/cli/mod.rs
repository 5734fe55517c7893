// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for repodash using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! repodash [global options] <command>
//! scan [--sort recent|alpha] [--json]
//! fetch <repo> [--json]
//! pull <repo> [--yes] [--json]
//! options
//! ```

pub mod global;


use clap::{Args, Parser, Subcommand};

use crate::cli::global::GlobalOptions;
use crate::config::SortMode;

/// Git working-copy status dashboard.
///
/// Scans every git repository under a root directory and reports branch,
/// divergence from upstream, uncommitted changes, and last-commit metadata.
#[derive(Debug, Parser)]
#[command(
    name = "repodash",
    author,
    version,
    about = "Git working-copy status dashboard",
    long_about = "repodash Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Scans every git working copy under a root directory (default\n\
                  ~/git) and reports a status snapshot per repository. `fetch`\n\
                  and `pull` run guarded remote operations against a single\n\
                  repository; `pull` on a dirty working tree asks for --yes.",
    after_help = "CONFIG FILES:\n\n\
                  repodash reads `repodash.toml` from the current directory if\n\
                  present. Additional files can be passed with --config and are\n\
                  applied on top; REPODASH_* environment variables and command\n\
                  line flags override both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Scans every working copy under the root.
    Scan(ScanArgs),

    /// Refreshes remote refs for one repository (git fetch).
    Fetch(FetchArgs),

    /// Merges upstream changes into one repository (git pull).
    Pull(PullArgs),
}

/// Arguments for the scan command.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Result ordering, overrides the configured default.
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<SortMode>,

    /// Emit a JSON array instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the fetch command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Repository name under the scan root.
    pub repo: String,

    /// Emit the operation result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the pull command.
#[derive(Debug, Args)]
pub struct PullArgs {
    /// Repository name under the scan root.
    pub repo: String,

    /// Confirm merging even with uncommitted local changes.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Emit the operation result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
