// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI arguments for the rewrite commands.
//!
//! ```text
//! reword fix <owner/repo> <hash> <message>
//! reword bulk <owner/repo> --fix HASH=MSG ... [--from fixes.json]
//! reword history <owner/repo> [-n N]
//!
//! USAGE:
//! $ reword fix octo/hello 3f2a91c "fix: correct typo in README"
//! $ reword bulk octo/hello -f 3f2a91c="docs: ..." -f 9b0e4d1="feat: ..." --dry
//! $ reword history octo/hello -b develop
//! ```
//!
//! `fixes.json` is an array of `{"target", "message"}` objects;
//! `targetHash` and `newMessage` are accepted as field names too.

use clap::Args;
use std::path::PathBuf;

use crate::history::FixRequest;

/// Repository and branch selection shared by every rewrite command.
#[derive(Debug, Clone, Args)]
pub struct RepoArgs {
    /// Repository as owner/name (a github.com URL also works).
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// Branch to operate on; defaults to the repository's default branch.
    #[arg(short = 'b', long = "branch", value_name = "BRANCH")]
    pub branch: Option<String>,
}

/// Arguments for the `fix` command.
#[derive(Debug, Clone, Args)]
pub struct FixArgs {
    #[command(flatten)]
    pub target: RepoArgs,

    /// Full or abbreviated hash of the commit to reword.
    #[arg(value_name = "HASH")]
    pub hash: String,

    /// Replacement commit message.
    #[arg(value_name = "MESSAGE")]
    pub message: String,

    /// Shows the replay plan without touching the repository.
    #[arg(long)]
    pub dry: bool,
}

/// Arguments for the `bulk` command.
#[derive(Debug, Clone, Args)]
pub struct BulkArgs {
    #[command(flatten)]
    pub target: RepoArgs,

    /// A fix as HASH=MESSAGE. Can be specified multiple times.
    #[arg(short = 'f', long = "fix", value_name = "HASH=MESSAGE", action = clap::ArgAction::Append)]
    pub fixes: Vec<FixRequest>,

    /// JSON file with an array of fixes.
    #[arg(long = "from", value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Shows the replay plan without touching the repository.
    #[arg(long)]
    pub dry: bool,
}

/// Arguments for the `history` command.
#[derive(Debug, Clone, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub target: RepoArgs,

    /// Number of commits to list; defaults to rewrite.window_size.
    #[arg(short = 'n', long = "limit", value_name = "N", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub limit: Option<u16>,
}
