// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire types for the GitHub REST API.
//!
//! Only the fields the rewrite pipeline reads are modelled; everything else
//! in the responses is ignored by serde.

use serde::{Deserialize, Serialize};

use crate::history::model::{CommitRecord, NewCommit, Signature};

/// `{"sha": "..."}` as used for trees, parents and created objects.
#[derive(Debug, Clone, Deserialize)]
pub struct ShaRef {
    pub sha: String,
}

/// One entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Deserialize)]
pub struct CommitItem {
    pub sha: String,
    pub commit: CommitDetail,
    #[serde(default)]
    pub parents: Vec<ShaRef>,
}

/// The `commit` object nested in a listing entry.
#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub tree: ShaRef,
    #[serde(default)]
    pub author: Option<Signature>,
}

impl From<CommitItem> for CommitRecord {
    fn from(item: CommitItem) -> Self {
        Self {
            hash: item.sha,
            message: item.commit.message,
            tree_hash: item.commit.tree.sha,
            parent_hashes: item.parents.into_iter().map(|p| p.sha).collect(),
            author: item.commit.author,
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/git/commits`.
#[derive(Debug, Serialize)]
pub struct CreateCommitBody<'a> {
    pub message: &'a str,
    pub tree: &'a str,
    pub parents: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'a Signature>,
}

impl<'a> From<&'a NewCommit> for CreateCommitBody<'a> {
    fn from(commit: &'a NewCommit) -> Self {
        Self {
            message: &commit.message,
            tree: &commit.tree,
            parents: &commit.parents,
            author: commit.author.as_ref(),
        }
    }
}

/// Body of `PATCH /repos/{owner}/{repo}/git/refs/heads/{branch}`.
#[derive(Debug, Serialize)]
pub struct UpdateRefBody<'a> {
    pub sha: &'a str,
    pub force: bool,
}

/// Subset of `GET /repos/{owner}/{repo}`.
#[derive(Debug, Deserialize)]
pub struct RepoInfo {
    pub default_branch: String,
}

/// Error payload GitHub attaches to most failures.
#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
