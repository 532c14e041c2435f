// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Object store abstraction.
//!
//! ```text
//! ObjectStore --> GitHubClient (REST, remote)
//!             --> MemoryStore  (in-process, previews and tests)
//! ```

use std::future::Future;

use super::model::{CommitRecord, NewCommit};
use crate::error::RewordResult;

/// Remote content-addressed commit graph with named refs.
///
/// Every call is a single atomic request. Implementors never retry.
pub trait ObjectStore {
    /// Up to `limit` commits reachable from `branch`, newest first.
    ///
    /// An unborn or empty branch yields an empty vector rather than an error.
    ///
    /// # Errors
    ///
    /// Returns a `RemoteError` if the remote call fails.
    fn list_commits(
        &self,
        branch: &str,
        limit: usize,
    ) -> impl Future<Output = RewordResult<Vec<CommitRecord>>> + Send;

    /// Creates a commit object and returns its hash.
    ///
    /// # Errors
    ///
    /// Returns a `RemoteError` on any non-success response.
    fn create_commit(
        &self,
        commit: &NewCommit,
    ) -> impl Future<Output = RewordResult<String>> + Send;

    /// Moves `branch` to `hash`. With `force`, no fast-forward check happens.
    ///
    /// # Errors
    ///
    /// Returns a `RemoteError` if the ref cannot be updated.
    fn update_ref(
        &self,
        branch: &str,
        hash: &str,
        force: bool,
    ) -> impl Future<Output = RewordResult<()>> + Send;
}

impl<T: ObjectStore + Sync> ObjectStore for &T {
    fn list_commits(
        &self,
        branch: &str,
        limit: usize,
    ) -> impl Future<Output = RewordResult<Vec<CommitRecord>>> + Send {
        (**self).list_commits(branch, limit)
    }

    fn create_commit(
        &self,
        commit: &NewCommit,
    ) -> impl Future<Output = RewordResult<String>> + Send {
        (**self).create_commit(commit)
    }

    fn update_ref(
        &self,
        branch: &str,
        hash: &str,
        force: bool,
    ) -> impl Future<Output = RewordResult<()>> + Send {
        (**self).update_ref(branch, hash, force)
    }
}
