// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared fixtures for history tests.

use std::time::Duration;

use super::memory::MemoryStore;
use super::model::{CommitRecord, NewCommit, Signature};
use super::store::ObjectStore;
use crate::error::RewordResult;

pub(crate) const BRANCH: &str = "main";

/// Forty hex characters: the two-digit pattern `base + i` repeated.
pub(crate) fn id(base: usize, i: usize) -> String {
    format!("{:02x}", base + i).repeat(20)
}

/// Hash of commit `Ci`.
pub(crate) fn commit_id(i: usize) -> String {
    id(0xc0, i)
}

/// Tree of commit `Ci`.
pub(crate) fn tree_id(i: usize) -> String {
    id(0x10, i)
}

/// Linear history `C0 (tip) .. C{len-1} (root)`, newest first.
pub(crate) fn chain(len: usize) -> Vec<CommitRecord> {
    (0..len)
        .map(|i| CommitRecord {
            hash: commit_id(i),
            message: format!("commit {i}\n\nbody of commit {i}"),
            tree_hash: tree_id(i),
            parent_hashes: if i + 1 < len {
                vec![commit_id(i + 1)]
            } else {
                Vec::new()
            },
            author: Some(Signature {
                name: "Test".to_string(),
                email: "test@example.com".to_string(),
                date: format!("2026-01-{:02}T00:00:00Z", 28 - i % 28),
            }),
        })
        .collect()
}

pub(crate) fn store_with_chain(len: usize) -> MemoryStore {
    MemoryStore::new().with_branch(BRANCH, chain(len))
}

/// Follows first parents from `tip` for at most `steps` commits.
pub(crate) fn walk(store: &MemoryStore, tip: &str, steps: usize) -> Vec<CommitRecord> {
    let mut out = Vec::new();
    let mut cursor = Some(tip.to_string());
    while let Some(hash) = cursor {
        if out.len() >= steps {
            break;
        }
        let Some(commit) = store.commit(&hash) else {
            break;
        };
        cursor = commit.first_parent().map(str::to_string);
        out.push(commit);
    }
    out
}

/// Delays every commit creation, for deadline tests.
pub(crate) struct SlowStore {
    pub(crate) inner: MemoryStore,
    pub(crate) delay: Duration,
}

impl ObjectStore for SlowStore {
    async fn list_commits(&self, branch: &str, limit: usize) -> RewordResult<Vec<CommitRecord>> {
        self.inner.list_commits(branch, limit).await
    }

    async fn create_commit(&self, commit: &NewCommit) -> RewordResult<String> {
        tokio::time::sleep(self.delay).await;
        self.inner.create_commit(commit).await
    }

    async fn update_ref(&self, branch: &str, hash: &str, force: bool) -> RewordResult<()> {
        self.inner.update_ref(branch, hash, force).await
    }
}
