// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! History window fetcher.
//!
//! ```text
//! store.list_commits(branch, limit) --> HistoryWindow (tip first, <= limit)
//! ```
//!
//! No pagination: anything older than `limit` is out of range.

use tracing::{debug, warn};

use super::model::{HistoryWindow, short_hash};
use super::store::ObjectStore;
use crate::error::{ConfigError, RewordResult};

/// Default lookback, matching the desktop client.
pub const DEFAULT_WINDOW_SIZE: usize = 50;

/// Fetches the newest `limit` commits of `branch`.
///
/// An empty branch produces an empty window.
///
/// # Errors
///
/// Returns a `ConfigError` if `limit` is zero, or the store's `RemoteError`.
pub async fn fetch_window<S: ObjectStore>(
    store: &S,
    branch: &str,
    limit: usize,
) -> RewordResult<HistoryWindow> {
    if limit == 0 {
        return Err(ConfigError::InvalidValue {
            section: "rewrite".to_string(),
            key: "window_size".to_string(),
            message: "must be at least 1".to_string(),
        }
        .into());
    }

    let commits = store.list_commits(branch, limit).await?;
    let window = HistoryWindow::new(commits, limit);

    for (index, commit) in window.iter().enumerate() {
        if commit.is_merge() {
            warn!(
                branch,
                index,
                hash = short_hash(&commit.hash),
                "merge commit in history window, replay will linearize it"
            );
        }
    }

    debug!(
        branch,
        fetched = window.len(),
        limit,
        tip = window.tip().map(|c| c.short_hash()),
        "fetched history window"
    );

    Ok(window)
}
