// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Message resolution map.
//!
//! ```text
//! lookup(commit):
//!   1. exact key == commit.hash
//!   2. key prefixes hash, or hash prefixes key
//!   3. commit.message (unchanged)
//! ```
//!
//! Untouched commits inside the replayed range keep their text but still
//! get a new id, because their parent changes.

use std::collections::HashMap;

use super::model::{CommitRecord, FixRequest, HistoryWindow};
use super::resolve::normalize_target;
use crate::error::{RewordResult, RewriteError};

/// Replacement messages keyed by commit id.
#[derive(Debug, Clone, Default)]
pub struct MessageMap {
    entries: HashMap<String, String>,
}

impl MessageMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map keyed by the full hash each request resolves to.
    ///
    /// Requests whose id is absent from the window are left out.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTarget` for malformed ids and `AmbiguousTarget` when
    /// one commit receives two different messages.
    pub fn from_requests(window: &HistoryWindow, requests: &[FixRequest]) -> RewordResult<Self> {
        let mut map = Self::new();
        for request in requests {
            let id = normalize_target(&request.target)?;
            let Some(key) = window
                .iter()
                .find(|c| c.hash.starts_with(&id))
                .map(|c| c.hash.clone())
            else {
                continue;
            };

            if let Some(existing) = map.entries.get(&key)
                && existing != &request.message
            {
                return Err(RewriteError::AmbiguousTarget {
                    target: request.target.clone(),
                    matches: vec![key],
                }
                .into());
            }
            map.insert(key, request.message.clone());
        }
        Ok(map)
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(key.into(), message.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replacement for `hash`, if any entry matches it exactly or by prefix.
    #[must_use]
    pub fn lookup(&self, hash: &str) -> Option<&str> {
        if let Some(message) = self.entries.get(hash) {
            return Some(message);
        }
        self.entries
            .iter()
            .find(|(key, _)| hash.starts_with(key.as_str()) || key.starts_with(hash))
            .map(|(_, message)| message.as_str())
    }

    /// Message the rewritten commit should carry.
    #[must_use]
    pub fn resolve<'a>(&'a self, commit: &'a CommitRecord) -> &'a str {
        self.lookup(&commit.hash).unwrap_or(&commit.message)
    }

    /// Whether the commit's text changes under this map.
    #[must_use]
    pub fn changes(&self, commit: &CommitRecord) -> bool {
        self.resolve(commit) != commit.message
    }
}
