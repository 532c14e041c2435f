// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Target resolver.
//!
//! ```text
//! ids --normalize--> lowercase hex (4..=40)
//!     --scan window--> one index per id, or unresolved
//!     --max index--> RewritePlan { deepest_index, anchor, targets }
//! ```
//!
//! A prefix matching two commits, or two ids landing on the same commit,
//! is rejected as ambiguous instead of picking the first hit.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use super::model::{HistoryWindow, RewritePlan, short_hash};
use crate::error::{RewordResult, RewriteError};

fn hex_id_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(r"^[0-9a-f]{4,40}$").ok())
        .as_ref()
}

/// Trims and lowercases a commit id, rejecting anything that is not 4-40 hex digits.
///
/// # Errors
///
/// Returns `RewriteError::InvalidTarget` for malformed ids.
pub fn normalize_target(id: &str) -> Result<String, RewriteError> {
    let normalized = id.trim().to_ascii_lowercase();
    if hex_id_regex().is_some_and(|re| re.is_match(&normalized)) {
        Ok(normalized)
    } else {
        Err(RewriteError::InvalidTarget(id.to_string()))
    }
}

/// Indices of every window entry equal to or prefixed by `id`.
fn matching_indices(window: &HistoryWindow, id: &str) -> Vec<usize> {
    window
        .iter()
        .enumerate()
        .filter(|(_, commit)| commit.hash == id || commit.hash.starts_with(id))
        .map(|(index, _)| index)
        .collect()
}

/// Resolves target ids against the window and plans the replay.
///
/// Each id that resolves must hit exactly one commit. Ids absent from the
/// window are skipped and listed in `RewritePlan::unresolved`, as long as
/// at least one id resolves. The plan starts at the oldest resolved
/// target; its original first parent becomes the anchor.
///
/// # Errors
///
/// - `InvalidTarget` for malformed ids.
/// - `AmbiguousTarget` when an id matches several commits or several ids
///   match the same commit.
/// - `TargetNotFound` listing every id when none of them is in the window.
pub fn resolve_targets<S: AsRef<str>>(
    window: &HistoryWindow,
    ids: &[S],
) -> RewordResult<RewritePlan> {
    // index -> id that claimed it
    let mut claimed: BTreeMap<usize, String> = BTreeMap::new();
    let mut missing = Vec::new();

    for raw in ids {
        let id = normalize_target(raw.as_ref())?;
        let hits = matching_indices(window, &id);

        match hits.as_slice() {
            [] => missing.push(id),
            [index] => {
                if let Some(previous) = claimed.get(index) {
                    if previous == &id {
                        continue;
                    }
                    return Err(RewriteError::AmbiguousTarget {
                        target: id,
                        matches: vec![window.commits()[*index].hash.clone(), previous.clone()],
                    }
                    .into());
                }
                claimed.insert(*index, id);
            }
            several => {
                return Err(RewriteError::AmbiguousTarget {
                    target: id,
                    matches: several
                        .iter()
                        .map(|&i| window.commits()[i].hash.clone())
                        .collect(),
                }
                .into());
            }
        }
    }

    let Some(&deepest_index) = claimed.keys().next_back() else {
        if missing.is_empty() {
            return Err(RewriteError::NoFixes.into());
        }
        return Err(RewriteError::TargetNotFound {
            targets: missing,
            limit: window.limit(),
        }
        .into());
    };
    if !missing.is_empty() {
        warn!(
            targets = %missing.join(", "),
            limit = window.limit(),
            "skipping commit(s) not found in the history window"
        );
    }
    let anchor = window.commits()[deepest_index]
        .first_parent()
        .map(str::to_string);

    debug!(
        deepest_index,
        anchor = anchor.as_deref().map(short_hash),
        targets = claimed.len(),
        "resolved rewrite plan"
    );

    Ok(RewritePlan {
        deepest_index,
        anchor,
        targets: claimed.into_keys().collect(),
        unresolved: missing,
    })
}
