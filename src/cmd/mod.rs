// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   fix, bulk, history, options
//!
//! open_session: RepoArgs + Config --> GitHubClient + branch + RewriteConfig
//! ```

pub mod config;
pub mod fix;
pub mod history;


use anyhow::Context;
use tracing::info;

use crate::cli::rewrite::RepoArgs;
use crate::config::Config;
use crate::config::types::RewriteConfig;
use crate::error::{RewordError, Result};
use crate::github::{GitHubClient, RepoSlug};

/// Everything a rewrite command needs to talk to one repository.
#[derive(Debug, Clone)]
pub struct Session {
    pub client: GitHubClient,
    pub branch: String,
    pub rewrite: RewriteConfig,
}

/// Builds the client for `target.repo` and settles which branch to use.
///
/// Branch precedence: `--branch`, then `[repos."owner/name"].branch` or
/// `[rewrite].branch`, then the repository's default branch.
///
/// # Errors
///
/// Returns an error if the repository slug is malformed or the default
/// branch lookup fails.
pub async fn open_session(target: &RepoArgs, config: &Config) -> Result<Session> {
    let slug: RepoSlug = target.repo.parse().map_err(RewordError::from)?;
    let rewrite = config.rewrite_for(&slug.to_string());

    let mut client = GitHubClient::new(slug).with_api_url(&config.github.api_url);
    if let Some(token) = config.github.token() {
        client = client.with_token(token);
    }
    if let Some(agent) = &config.github.user_agent {
        client = client.with_user_agent(agent);
    }

    let branch = match target.branch.clone().or_else(|| rewrite.branch.clone()) {
        Some(branch) => branch,
        None => client
            .default_branch()
            .await
            .with_context(|| format!("failed to look up the default branch of {}", client.repo()))?,
    };

    info!(repo = %client.repo(), branch = %branch, authenticated = client.has_token(), "session ready");

    Ok(Session {
        client,
        branch,
        rewrite,
    })
}
