// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chain replayer.
//!
//! ```text
//! previous = plan.anchor            (None at a root)
//! for i in deepest_index ..= 0      (oldest -> newest)
//!     new = create(message(i), tree(i), [previous] or [])
//!     previous = new
//! new tip = previous
//! ```
//!
//! Every commit in range is recreated, changed or not, and always with a
//! single parent: any merge inside the range comes out linearized. A
//! failed creation aborts the loop; objects created so far stay orphaned
//! and unreferenced.

use indicatif::ProgressBar;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::messages::MessageMap;
use super::model::{HistoryWindow, NewCommit, RewritePlan, short_hash};
use super::store::ObjectStore;
use crate::error::{RewordError, RewordResult, RewriteError};

/// Recreates commits `plan.deepest_index ..= 0` on top of `plan.anchor`.
///
/// Returns `(original, replacement)` hash pairs, oldest first; the last
/// replacement is the new tip. Creations are strictly sequential since each
/// one needs the previous id.
///
/// # Errors
///
/// - `RemoteError` from the first failing creation.
/// - `RewriteError::Cancelled` if `cancel` fires between creations.
/// - `RewordError::Other` if the plan does not fit the window.
pub async fn replay_chain<S: ObjectStore>(
    store: &S,
    window: &HistoryWindow,
    plan: &RewritePlan,
    messages: &MessageMap,
    cancel: &CancellationToken,
    progress: Option<&ProgressBar>,
) -> RewordResult<Vec<(String, String)>> {
    if plan.deepest_index >= window.len() {
        return Err(RewordError::Other(
            format!(
                "plan starts at index {} but the window holds {} commits",
                plan.deepest_index,
                window.len()
            )
            .into_boxed_str(),
        ));
    }

    let mut previous = plan.anchor.clone();
    let mut rewritten = Vec::with_capacity(plan.replay_len());

    for index in (0..=plan.deepest_index).rev() {
        if cancel.is_cancelled() {
            return Err(RewriteError::Cancelled.into());
        }

        let original = &window.commits()[index];
        let commit = NewCommit {
            message: messages.resolve(original).to_string(),
            tree: original.tree_hash.clone(),
            parents: previous.iter().cloned().collect(),
            author: original.author.clone(),
        };

        trace!(index, parents = ?commit.parents, "creating commit");
        let created = store.create_commit(&commit).await?;
        debug!(
            index,
            from = short_hash(&original.hash),
            to = short_hash(&created),
            changed = messages.changes(original),
            "replayed commit"
        );

        if let Some(bar) = progress {
            bar.inc(1);
        }
        rewritten.push((original.hash.clone(), created.clone()));
        previous = Some(created);
    }

    Ok(rewritten)
}
