// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `fix` and `bulk` commands.
//!
//! ```text
//! open_session --> Rewriter::plan --> print plan
//!                                       |
//!                          --dry ? preview : apply (Ctrl-C -> cancel)
//! ```

use std::path::Path;

use anyhow::Context;
use tracing::warn;

use super::open_session;
use crate::cli::rewrite::{BulkArgs, FixArgs, RepoArgs};
use crate::config::Config;
use crate::error::{Result, RewordError, RewriteError};
use crate::history::model::short_hash;
use crate::history::{FixRequest, PlannedRewrite, RewriteResult, Rewriter};

/// Main handler for the `fix` command.
///
/// # Errors
///
/// Returns an error if planning, replay or the ref update fails.
pub async fn run_fix_command(args: &FixArgs, config: &Config) -> Result<()> {
    let requests = [FixRequest::new(&args.hash, &args.message)];
    run_rewrite(&args.target, &requests, args.dry, config).await
}

/// Main handler for the `bulk` command.
///
/// # Errors
///
/// Returns an error if no fixes are given, the fixes file is unreadable, or
/// the rewrite fails.
pub async fn run_bulk_command(args: &BulkArgs, config: &Config) -> Result<()> {
    let requests = collect_fixes(args)?;
    run_rewrite(&args.target, &requests, args.dry, config).await
}

/// `--fix` entries followed by the contents of `--from`.
///
/// # Errors
///
/// Returns `NoFixes` when both are empty, or the file error.
pub fn collect_fixes(args: &BulkArgs) -> Result<Vec<FixRequest>> {
    let mut requests = args.fixes.clone();
    if let Some(path) = &args.from {
        requests.extend(load_fix_file(path)?);
    }
    if requests.is_empty() {
        return Err(RewordError::from(RewriteError::NoFixes).into());
    }
    Ok(requests)
}

/// Reads a JSON array of fixes.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of fixes.
pub fn load_fix_file(path: &Path) -> Result<Vec<FixRequest>> {
    let content = std::fs::read_to_string(path)
        .map_err(RewordError::from)
        .with_context(|| format!("failed to read fixes from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse fixes in {}", path.display()))
}

async fn run_rewrite(
    target: &RepoArgs,
    requests: &[FixRequest],
    dry: bool,
    config: &Config,
) -> Result<()> {
    let session = open_session(target, config).await?;
    let rewriter = Rewriter::new(&session.client).with_options(session.rewrite.options());

    let planned = rewriter.plan(&session.branch, requests).await?;
    for line in format_plan(&planned) {
        println!("{line}");
    }

    if dry {
        let preview = rewriter.preview(&planned).await?;
        println!(
            "dry run: {} commit(s) would be recreated, {} left untouched",
            preview.rewritten.len(),
            session.branch
        );
        return Ok(());
    }

    let cancel = rewriter.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping before the branch is updated");
            cancel.cancel();
        }
    });
    let outcome = rewriter.apply(&planned).await;
    interrupt.abort();

    let result = outcome.with_context(|| {
        format!(
            "failed to rewrite {}@{}",
            session.client.repo(),
            session.branch
        )
    })?;
    println!("{}", format_result(&result));
    Ok(())
}

/// One line per recreated commit, oldest first, then any skipped ids.
#[must_use]
pub fn format_plan(planned: &PlannedRewrite) -> Vec<String> {
    let mut lines = vec![format!(
        "{} commit(s) on {} will be recreated:",
        planned.plan.replay_len(),
        planned.branch
    )];
    lines.extend(planned.steps().map(|step| {
        let action = if step.changed { "reword" } else { "replay" };
        let summary = step.message.lines().next().unwrap_or_default();
        format!("  {action}  {}  {summary}", step.commit.short_hash())
    }));
    if !planned.plan.unresolved.is_empty() {
        lines.push(format!(
            "skipped, not in the last {} commits: {}",
            planned.window.limit(),
            planned.plan.unresolved.join(", ")
        ));
    }
    lines
}

#[must_use]
pub fn format_result(result: &RewriteResult) -> String {
    format!(
        "{}: {} -> {} ({} commit(s) rewritten, branch force-updated)",
        result.branch,
        short_hash(&result.old_tip),
        short_hash(&result.new_tip),
        result.rewritten.len()
    )
}
