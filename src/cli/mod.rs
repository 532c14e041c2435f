// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for reword-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! reword [global options] <command>
//! fix <repo> <hash> <message>
//! bulk <repo> --fix HASH=MSG... | --from FILE
//! history <repo>
//! options
//! version
//! ```

pub mod global;
pub mod rewrite;


use crate::cli::global::GlobalOptions;
use crate::cli::rewrite::{BulkArgs, FixArgs, HistoryArgs};
use clap::{Parser, Subcommand};

/// Rewrite commit messages on GitHub branches.
#[derive(Debug, Parser)]
#[command(
    name = "reword",
    author,
    version,
    about = "Rewrite commit messages on GitHub branches",
    long_about = "reword-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Rewrites commit messages on a GitHub branch through the REST API.\n\
                  The target commit and every newer commit are recreated with the\n\
                  same trees, then the branch is force-moved once to the new tip.\n\
                  Nothing is cloned locally.",
    after_help = "CONFIG FILES:\n\n\
                  reword loads `reword.toml` from the current directory if present,\n\
                  then any --config files in order, then REWORD_SECTION__KEY\n\
                  environment variables. Use --no-default-config to skip\n\
                  `reword.toml`.\n\n\
                  WARNING: rewriting history force-pushes the branch. Anyone who\n\
                  has the old commits must rebase onto the new ones."
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
    Version,

    /// Lists all options and their values.
    Options,

    /// Rewords a single commit.
    Fix(FixArgs),

    /// Rewords several commits in one replay.
    Bulk(BulkArgs),

    /// Lists recent commits of a branch.
    History(HistoryArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
