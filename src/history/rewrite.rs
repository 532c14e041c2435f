// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rewrite orchestration.
//!
//! ```text
//! plan():    fetch_window --> resolve_targets --> MessageMap
//! apply():   timeout(replay_chain) --> update_ref(force)   <- only visible effect
//! preview(): replay_chain into MemoryStore, remote untouched
//! ```
//!
//! Bulk fixes fold into one fetch, one replay and one ref update.

use std::sync::OnceLock;
use std::time::Duration;

use bon::Builder;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::fetch::{DEFAULT_WINDOW_SIZE, fetch_window};
use super::memory::MemoryStore;
use super::messages::MessageMap;
use super::model::{
    CommitRecord, FixRequest, HistoryWindow, RewritePlan, RewriteResult, short_hash,
};
use super::replay::replay_chain;
use super::resolve::resolve_targets;
use super::store::ObjectStore;
use crate::error::{RewordResult, RewriteError};

/// Default replay deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

fn replay_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} commits",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Knobs for one rewrite invocation.
#[derive(Debug, Clone, Builder)]
pub struct RewriteOptions {
    /// Lookback limit for target resolution.
    #[builder(setters(name = with_window_size), default = DEFAULT_WINDOW_SIZE)]
    window_size: usize,
    /// Deadline around the replay loop.
    #[builder(setters(name = with_timeout), default = DEFAULT_TIMEOUT)]
    timeout: Duration,
    /// Show a progress bar while replaying.
    #[builder(setters(name = with_progress), default = false)]
    progress: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RewriteOptions {
    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub const fn progress(&self) -> bool {
        self.progress
    }
}

/// A resolved rewrite, ready to apply or preview.
#[derive(Debug, Clone)]
pub struct PlannedRewrite {
    pub branch: String,
    pub window: HistoryWindow,
    pub plan: RewritePlan,
    pub messages: MessageMap,
}

/// One commit of a planned rewrite, for display.
#[derive(Debug, Clone, Copy)]
pub struct PlannedStep<'a> {
    pub index: usize,
    pub commit: &'a CommitRecord,
    pub message: &'a str,
    pub changed: bool,
}

impl PlannedRewrite {
    /// Commits that will be recreated, oldest first.
    pub fn steps(&self) -> impl Iterator<Item = PlannedStep<'_>> {
        (0..=self.plan.deepest_index).rev().filter_map(|index| {
            let commit = self.window.get(index)?;
            Some(PlannedStep {
                index,
                commit,
                message: self.messages.resolve(commit),
                changed: self.messages.changes(commit),
            })
        })
    }

    fn old_tip(&self) -> String {
        self.window
            .tip()
            .map(|c| c.hash.clone())
            .unwrap_or_default()
    }
}

/// Drives the fetch, resolve, replay and ref-update sequence against a store.
pub struct Rewriter<S> {
    store: S,
    options: RewriteOptions,
    cancel: CancellationToken,
}

impl<S: ObjectStore> Rewriter<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            options: RewriteOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RewriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Shares an external cancellation token (e.g. wired to Ctrl-C).
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Fetches the window and resolves every request into a single plan.
    ///
    /// # Errors
    ///
    /// Returns `NoFixes`, `EmptyHistory`, any resolver error, or the
    /// store's `RemoteError`.
    pub async fn plan(&self, branch: &str, requests: &[FixRequest]) -> RewordResult<PlannedRewrite> {
        if requests.is_empty() {
            return Err(RewriteError::NoFixes.into());
        }

        let window = fetch_window(&self.store, branch, self.options.window_size).await?;
        if window.is_empty() {
            return Err(RewriteError::EmptyHistory(branch.to_string()).into());
        }

        let targets: Vec<&str> = requests.iter().map(|r| r.target.as_str()).collect();
        let plan = resolve_targets(&window, &targets)?;
        let messages = MessageMap::from_requests(&window, requests)?;

        Ok(PlannedRewrite {
            branch: branch.to_string(),
            window,
            plan,
            messages,
        })
    }

    /// Replays the planned range and force-moves the branch to the new tip.
    ///
    /// The ref update happens once, after every commit exists. On any
    /// failure before that point the branch is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the first creation `RemoteError`, `DeadlineExceeded`,
    /// `Cancelled`, or the ref update's `RemoteError`.
    pub async fn apply(&self, planned: &PlannedRewrite) -> RewordResult<RewriteResult> {
        let rewritten = self.replay_into(&self.store, planned).await?;
        let new_tip = new_tip(&rewritten);

        if self.cancel.is_cancelled() {
            return Err(RewriteError::Cancelled.into());
        }

        self.store
            .update_ref(&planned.branch, &new_tip, true)
            .await
            .inspect_err(|e| {
                warn!(branch = %planned.branch, error = %e, "ref update failed, branch unchanged");
            })?;

        let result = RewriteResult {
            branch: planned.branch.clone(),
            old_tip: planned.old_tip(),
            new_tip,
            rewritten,
        };
        info!(
            branch = %result.branch,
            old_tip = short_hash(&result.old_tip),
            new_tip = short_hash(&result.new_tip),
            commits = result.rewritten.len(),
            "history rewritten"
        );
        Ok(result)
    }

    /// Replays into an in-memory copy of the window; the remote is not touched.
    ///
    /// # Errors
    ///
    /// Returns `DeadlineExceeded` or `Cancelled`.
    pub async fn preview(&self, planned: &PlannedRewrite) -> RewordResult<RewriteResult> {
        let scratch = MemoryStore::from_window(&planned.branch, &planned.window);
        let rewritten = self.replay_into(&scratch, planned).await?;
        Ok(RewriteResult {
            branch: planned.branch.clone(),
            old_tip: planned.old_tip(),
            new_tip: new_tip(&rewritten),
            rewritten,
        })
    }

    /// Rewrites the message of one commit.
    ///
    /// # Errors
    ///
    /// See [`Self::plan`] and [`Self::apply`].
    pub async fn single_fix(
        &self,
        branch: &str,
        target: &str,
        message: &str,
    ) -> RewordResult<RewriteResult> {
        self.bulk_fix(branch, &[FixRequest::new(target, message)])
            .await
    }

    /// Rewrites several commit messages in one replay.
    ///
    /// # Errors
    ///
    /// See [`Self::plan`] and [`Self::apply`].
    pub async fn bulk_fix(
        &self,
        branch: &str,
        requests: &[FixRequest],
    ) -> RewordResult<RewriteResult> {
        let planned = self.plan(branch, requests).await?;
        self.apply(&planned).await
    }

    async fn replay_into<T: ObjectStore>(
        &self,
        store: &T,
        planned: &PlannedRewrite,
    ) -> RewordResult<Vec<(String, String)>> {
        let progress = self.options.progress.then(|| {
            let bar = ProgressBar::new(planned.plan.replay_len() as u64);
            bar.set_style(replay_style());
            bar
        });

        let timeout = self.options.timeout;
        let replay = replay_chain(
            store,
            &planned.window,
            &planned.plan,
            &planned.messages,
            &self.cancel,
            progress.as_ref(),
        );
        let outcome = tokio::time::timeout(timeout, replay).await;

        if let Some(bar) = &progress {
            bar.finish_and_clear();
        }

        match outcome {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    branch = %planned.branch,
                    secs = timeout.as_secs(),
                    "replay deadline exceeded, branch unchanged"
                );
                Err(RewriteError::DeadlineExceeded {
                    secs: timeout.as_secs(),
                }
                .into())
            }
        }
    }
}

fn new_tip(rewritten: &[(String, String)]) -> String {
    rewritten
        .last()
        .map(|(_, new)| new.clone())
        .unwrap_or_default()
}

/// Rewrites one commit message on `branch` with default options.
///
/// # Errors
///
/// See [`Rewriter::single_fix`].
pub async fn single_fix<S: ObjectStore>(
    store: S,
    branch: &str,
    target: &str,
    message: &str,
) -> RewordResult<RewriteResult> {
    Rewriter::new(store).single_fix(branch, target, message).await
}

/// Rewrites several commit messages on `branch` with default options.
///
/// # Errors
///
/// See [`Rewriter::bulk_fix`].
pub async fn bulk_fix<S: ObjectStore>(
    store: S,
    branch: &str,
    requests: &[FixRequest],
) -> RewordResult<RewriteResult> {
    Rewriter::new(store).bulk_fix(branch, requests).await
}

#[cfg(test)]
mod tests;
