// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Data model shared by the rewrite pipeline.
//!
//! | Type            | Purpose                                       |
//! |-----------------|-----------------------------------------------|
//! | `CommitRecord`  | Immutable snapshot of one remote commit       |
//! | `HistoryWindow` | Bounded, newest-first slice of a branch       |
//! | `FixRequest`    | Target id + replacement message               |
//! | `NewCommit`     | Payload for creating a commit object          |
//! | `RewritePlan`   | Deepest target index + anchor parent          |
//! | `RewriteResult` | Old/new tip and the replayed hash pairs       |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RewriteError;

/// Characters of a hash shown in listings and logs.
pub const SHORT_HASH_LEN: usize = 7;

/// Author identity attached to a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    /// ISO 8601 timestamp as reported by the remote.
    pub date: String,
}

/// One historical commit as reported by the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub tree_hash: String,
    pub parent_hashes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Signature>,
}

impl CommitRecord {
    /// First line of the message.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    #[must_use]
    pub fn short_hash(&self) -> &str {
        short_hash(&self.hash)
    }

    /// First listed parent, `None` for a root commit.
    #[must_use]
    pub fn first_parent(&self) -> Option<&str> {
        self.parent_hashes.first().map(String::as_str)
    }

    #[must_use]
    pub const fn is_merge(&self) -> bool {
        self.parent_hashes.len() > 1
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_hashes.is_empty()
    }
}

/// Truncates a hash for display, leaving shorter ids untouched.
#[must_use]
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}

/// Newest-first commits reachable from a branch tip, capped at `limit`.
///
/// Index 0 is the tip. Commits older than the cap are invisible to the
/// rewrite engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryWindow {
    commits: Vec<CommitRecord>,
    limit: usize,
}

impl HistoryWindow {
    /// Builds a window, dropping anything past `limit`.
    #[must_use]
    pub fn new(mut commits: Vec<CommitRecord>, limit: usize) -> Self {
        commits.truncate(limit);
        Self { commits, limit }
    }

    #[must_use]
    pub fn tip(&self) -> Option<&CommitRecord> {
        self.commits.first()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CommitRecord> {
        self.commits.get(index)
    }

    #[must_use]
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.commits.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Lookback limit the window was fetched with.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommitRecord> {
        self.commits.iter()
    }
}

impl<'a> IntoIterator for &'a HistoryWindow {
    type Item = &'a CommitRecord;
    type IntoIter = std::slice::Iter<'a, CommitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.commits.iter()
    }
}

/// Replacement message for one commit, addressed by full or abbreviated hash.
///
/// Accepts both `{"target", "message"}` and the `{"targetHash", "newMessage"}`
/// shape used by the desktop client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRequest {
    #[serde(alias = "targetHash", alias = "hash")]
    pub target: String,
    #[serde(alias = "newMessage")]
    pub message: String,
}

impl FixRequest {
    #[must_use]
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}

impl FromStr for FixRequest {
    type Err = RewriteError;

    /// Parses `HASH=MESSAGE`. The message may itself contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, message) = s
            .split_once('=')
            .ok_or_else(|| RewriteError::InvalidTarget(s.to_string()))?;
        let target = target.trim();
        if target.is_empty() {
            return Err(RewriteError::InvalidTarget(s.to_string()));
        }
        Ok(Self::new(target, message))
    }
}

/// Payload for one commit-object creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NewCommit {
    pub message: String,
    pub tree: String,
    /// Empty for a root commit, otherwise exactly one parent.
    pub parents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Signature>,
}

/// Where replay starts and what it hangs the new chain from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePlan {
    /// Index of the oldest targeted commit.
    pub deepest_index: usize,
    /// Original first parent of the commit at `deepest_index`; `None` at a root.
    pub anchor: Option<String>,
    /// Resolved target indices, ascending.
    pub targets: Vec<usize>,
    /// Requested ids absent from the window; skipped while others resolved.
    pub unresolved: Vec<String>,
}

impl RewritePlan {
    /// Commits that will be recreated, including unmodified descendants.
    #[must_use]
    pub const fn replay_len(&self) -> usize {
        self.deepest_index + 1
    }
}

/// Outcome of a completed replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub branch: String,
    pub old_tip: String,
    pub new_tip: String,
    /// `(original, replacement)` pairs, oldest first.
    pub rewritten: Vec<(String, String)>,
}
