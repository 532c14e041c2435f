// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `history` command: lists the window so users can pick targets.

use super::open_session;
use crate::cli::rewrite::HistoryArgs;
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryWindow;
use crate::history::fetch::fetch_window;

/// Characters of the summary line shown per commit.
pub const SUMMARY_WIDTH: usize = 50;

/// First line of `message`, cut to [`SUMMARY_WIDTH`] characters.
#[must_use]
pub fn truncate_summary(message: &str) -> &str {
    let first = message.lines().next().unwrap_or_default();
    first
        .char_indices()
        .nth(SUMMARY_WIDTH)
        .map_or(first, |(end, _)| &first[..end])
}

#[must_use]
pub fn format_history(window: &HistoryWindow) -> Vec<String> {
    window
        .iter()
        .map(|commit| {
            let merge = if commit.is_merge() { " (merge)" } else { "" };
            format!(
                "{}  {}{merge}",
                commit.short_hash(),
                truncate_summary(&commit.message)
            )
        })
        .collect()
}

/// Main handler for the `history` command.
///
/// # Errors
///
/// Returns an error if the repository cannot be reached.
pub async fn run_history_command(args: &HistoryArgs, config: &Config) -> Result<()> {
    let session = open_session(&args.target, config).await?;
    let limit = args
        .limit
        .map_or(session.rewrite.window_size, usize::from);

    let window = fetch_window(&session.client, &session.branch, limit).await?;
    if window.is_empty() {
        println!("Branch '{}' has no commits", session.branch);
        return Ok(());
    }

    for line in format_history(&window) {
        println!("{line}");
    }
    Ok(())
}
