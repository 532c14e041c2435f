// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process object store.
//!
//! ```text
//! MemoryStore
//!   objects: hash -> CommitRecord
//!   refs:    branch -> hash
//!   fault injection: fail_create_at(n), fail_ref_update()
//! ```
//!
//! Ids are derived from commit content (message, tree, parents, author)
//! plus the store's creation sequence, which stands in for git's committer
//! timestamp: recreating identical content still yields a new object.
//! Used by `--dry` previews, where the fetched window is copied in and
//! replayed offline.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Mutex, MutexGuard};

use super::model::{CommitRecord, HistoryWindow, NewCommit};
use super::store::ObjectStore;
use crate::error::{RemoteError, RewordResult};

#[derive(Debug, Default)]
struct State {
    objects: HashMap<String, CommitRecord>,
    refs: HashMap<String, String>,
    created: usize,
    ref_updates: usize,
    fail_create_at: Option<usize>,
    fail_ref_update: bool,
}

/// Commit graph held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `branch` from newest-first commits; the first one becomes the tip.
    #[must_use]
    pub fn with_branch(self, branch: &str, commits: Vec<CommitRecord>) -> Self {
        {
            let mut state = self.lock();
            if let Some(tip) = commits.first() {
                state.refs.insert(branch.to_string(), tip.hash.clone());
            }
            for commit in commits {
                state.objects.insert(commit.hash.clone(), commit);
            }
        }
        self
    }

    /// Copies a fetched window so it can be replayed offline.
    #[must_use]
    pub fn from_window(branch: &str, window: &HistoryWindow) -> Self {
        Self::new().with_branch(branch, window.commits().to_vec())
    }

    /// Makes the `n`-th commit creation (0-based) fail.
    #[must_use]
    pub fn fail_create_at(self, n: usize) -> Self {
        self.lock().fail_create_at = Some(n);
        self
    }

    /// Makes every ref update fail.
    #[must_use]
    pub fn fail_ref_update(self) -> Self {
        self.lock().fail_ref_update = true;
        self
    }

    /// Current target of `branch`.
    #[must_use]
    pub fn ref_target(&self, branch: &str) -> Option<String> {
        self.lock().refs.get(branch).cloned()
    }

    #[must_use]
    pub fn commit(&self, hash: &str) -> Option<CommitRecord> {
        self.lock().objects.get(hash).cloned()
    }

    /// Number of successful commit creations so far.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.lock().created
    }

    /// Number of successful ref updates so far.
    #[must_use]
    pub fn ref_update_count(&self) -> usize {
        self.lock().ref_updates
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Forty hex characters derived from the commit content and its creation sequence.
fn content_id(commit: &NewCommit, sequence: usize) -> String {
    let digest = |salt: u8| {
        let mut hasher = DefaultHasher::new();
        salt.hash(&mut hasher);
        sequence.hash(&mut hasher);
        commit.hash(&mut hasher);
        hasher.finish()
    };
    format!("{:016x}{:016x}{:08x}", digest(0), digest(1), digest(2) >> 32)
}

impl ObjectStore for MemoryStore {
    async fn list_commits(&self, branch: &str, limit: usize) -> RewordResult<Vec<CommitRecord>> {
        let state = self.lock();
        let mut commits = Vec::new();
        let mut cursor = state.refs.get(branch).cloned();

        while let Some(hash) = cursor {
            if commits.len() >= limit {
                break;
            }
            let Some(commit) = state.objects.get(&hash) else {
                return Err(RemoteError::Decode {
                    url: format!("memory://{branch}"),
                    message: format!("missing object {hash}"),
                }
                .into());
            };
            cursor = commit.first_parent().map(str::to_string);
            commits.push(commit.clone());
        }

        Ok(commits)
    }

    async fn create_commit(&self, commit: &NewCommit) -> RewordResult<String> {
        let mut state = self.lock();
        if state.fail_create_at == Some(state.created) {
            return Err(RemoteError::Http {
                status: 500,
                url: "memory://git/commits".to_string(),
                body: format!("injected failure at creation {}", state.created),
            }
            .into());
        }

        let hash = content_id(commit, state.created);
        state.objects.insert(
            hash.clone(),
            CommitRecord {
                hash: hash.clone(),
                message: commit.message.clone(),
                tree_hash: commit.tree.clone(),
                parent_hashes: commit.parents.clone(),
                author: commit.author.clone(),
            },
        );
        state.created += 1;
        Ok(hash)
    }

    async fn update_ref(&self, branch: &str, hash: &str, force: bool) -> RewordResult<()> {
        let mut state = self.lock();
        let url = format!("memory://git/refs/heads/{branch}");
        if state.fail_ref_update {
            return Err(RemoteError::Http {
                status: 409,
                url,
                body: "injected ref update failure".to_string(),
            }
            .into());
        }
        if !state.objects.contains_key(hash) {
            return Err(RemoteError::Http {
                status: 422,
                url,
                body: format!("object {hash} does not exist"),
            }
            .into());
        }
        if !force {
            let current = state.refs.get(branch).cloned();
            let fast_forward = current.as_deref().is_none_or(|old| {
                let mut cursor = Some(hash.to_string());
                while let Some(h) = cursor {
                    if h == old {
                        return true;
                    }
                    cursor = state
                        .objects
                        .get(&h)
                        .and_then(|c| c.first_parent().map(str::to_string));
                }
                false
            });
            if !fast_forward {
                return Err(RemoteError::Http {
                    status: 422,
                    url,
                    body: "Update is not a fast forward".to_string(),
                }
                .into());
            }
        }
        state.refs.insert(branch.to_string(), hash.to_string());
        state.ref_updates += 1;
        Ok(())
    }
}
