// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub REST implementation of the object store.
//!
//! ```text
//! GitHubClient (owner/name, token, api_url)
//!   list_commits  GET   /repos/{o}/{r}/commits?sha={branch}&per_page={n}
//!   create_commit POST  /repos/{o}/{r}/git/commits
//!   update_ref    PATCH /repos/{o}/{r}/git/refs/heads/{branch}
//!   default_branch GET  /repos/{o}/{r}
//!
//! Non-2xx  --> RemoteError::Http { status, url, body }
//! 409 on an empty repository listing --> empty window
//! ```
//!
//! Every call is one request. Nothing is retried here; a failed rewrite is
//! restarted from the top by the caller.

pub mod types;

use std::fmt;
use std::str::FromStr;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::{ConfigError, RemoteError, RewordError, RewordResult};
use crate::history::model::{CommitRecord, NewCommit, short_hash};
use crate::history::store::ObjectStore;
use types::{ApiMessage, CommitItem, CreateCommitBody, RepoInfo, ShaRef, UpdateRefBody};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page the commits endpoint will return.
pub const MAX_PER_PAGE: usize = 100;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// `reword-rs/<version>`.
#[must_use]
pub fn default_user_agent() -> String {
    format!("reword-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// Repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl FromStr for RepoSlug {
    type Err = RemoteError;

    /// Accepts `owner/name`, optionally as a `https://github.com/` URL with a
    /// trailing `.git`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        let trimmed = trimmed
            .strip_prefix("https://github.com/")
            .or_else(|| trimmed.strip_prefix("github.com/"))
            .unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

        match trimmed.split_once('/') {
            Some((owner, name)) if valid_segment(owner) && valid_segment(name) => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(RemoteError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// REST client bound to one repository.
///
/// # Example
/// ```no_run
/// use reword_rs::github::GitHubClient;
///
/// # async fn demo() -> reword_rs::error::RewordResult<()> {
/// let client = GitHubClient::new("octo/hello".parse()?)
///     .with_token("ghp_example");
/// let branch = client.default_branch().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    repo: RepoSlug,
    token: Option<String>,
    user_agent: String,
}

impl GitHubClient {
    #[must_use]
    pub fn new(repo: RepoSlug) -> Self {
        Self {
            http: Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            repo,
            token: None,
            user_agent: default_user_agent(),
        }
    }

    /// Points the client at another API root (GitHub Enterprise, test servers).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bearer token. An empty string leaves the client anonymous.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub const fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn repo_url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}{tail}",
            self.api_url, self.repo.owner, self.repo.name
        )
    }

    /// `.../git/refs/heads/{branch}` with every branch segment percent-encoded,
    /// so `#`, `%` and `?` stay part of the ref name.
    fn ref_url(&self, branch: &str) -> RewordResult<Url> {
        let mut url = self.parse_url(&self.repo_url("/git/refs/heads"))?;
        url.path_segments_mut()
            .map_err(|()| self.invalid_api_url("cannot be a base URL"))?
            .extend(branch.split('/'));
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", &self.user_agent);
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    fn parse_url(&self, url: &str) -> RewordResult<Url> {
        Url::parse(url).map_err(|e| self.invalid_api_url(e))
    }

    fn invalid_api_url(&self, reason: impl fmt::Display) -> RewordError {
        ConfigError::InvalidValue {
            section: "github".to_string(),
            key: "api_url".to_string(),
            message: format!("'{}' does not form a valid URL: {reason}", self.api_url),
        }
        .into()
    }

    async fn send(&self, builder: RequestBuilder, url: &str) -> RewordResult<Response> {
        let response = builder.send().await.map_err(RemoteError::from)?;
        let status = response.status();
        trace!(url, status = status.as_u16(), "github response");
        if status.is_success() {
            return Ok(response);
        }
        Err(http_error(status, url, response).await.into())
    }

    async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> RewordResult<T> {
        let body = response.text().await.map_err(RemoteError::from)?;
        serde_json::from_str(&body).map_err(|e| {
            RemoteError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Name of the repository's default branch.
    ///
    /// # Errors
    ///
    /// Returns a `RemoteError` if the request fails or the repository is not visible.
    pub async fn default_branch(&self) -> RewordResult<String> {
        let url = self.repo_url("");
        debug!(repo = %self.repo, "querying default branch");
        let response = self
            .send(self.request(Method::GET, self.parse_url(&url)?), &url)
            .await?;
        let info: RepoInfo = Self::decode(response, &url).await?;
        Ok(info.default_branch)
    }
}

/// Builds `RemoteError::Http`, preferring GitHub's `message` field over the raw body.
async fn http_error(status: StatusCode, url: &str, response: Response) -> RemoteError {
    let raw = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ApiMessage>(&raw).map_or(raw, |m| m.message);
    RemoteError::Http {
        status: status.as_u16(),
        url: url.to_string(),
        body,
    }
}

impl ObjectStore for GitHubClient {
    async fn list_commits(&self, branch: &str, limit: usize) -> RewordResult<Vec<CommitRecord>> {
        let url = self.repo_url("/commits");
        let per_page = limit.min(MAX_PER_PAGE).to_string();
        let full = Url::parse_with_params(&url, &[("sha", branch), ("per_page", per_page.as_str())])
            .map_err(|e| self.invalid_api_url(e))?;

        debug!(repo = %self.repo, branch, per_page = %per_page, "listing commits");
        let response = self
            .request(Method::GET, full)
            .send()
            .await
            .map_err(RemoteError::from)?;

        // An empty repository answers 409 "Git Repository is empty."
        if response.status() == StatusCode::CONFLICT {
            debug!(repo = %self.repo, branch, "repository is empty");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(http_error(response.status(), &url, response).await.into());
        }

        let items: Vec<CommitItem> = Self::decode(response, &url).await?;
        Ok(items.into_iter().map(CommitRecord::from).collect())
    }

    async fn create_commit(&self, commit: &NewCommit) -> RewordResult<String> {
        let url = self.repo_url("/git/commits");
        let body = CreateCommitBody::from(commit);
        trace!(
            tree = short_hash(&commit.tree),
            parents = commit.parents.len(),
            "creating commit object"
        );
        let response = self
            .send(
                self.request(Method::POST, self.parse_url(&url)?).json(&body),
                &url,
            )
            .await?;
        let created: ShaRef = Self::decode(response, &url).await?;
        Ok(created.sha)
    }

    async fn update_ref(&self, branch: &str, hash: &str, force: bool) -> RewordResult<()> {
        let full = self.ref_url(branch)?;
        let url = full.to_string();
        debug!(
            repo = %self.repo,
            branch,
            hash = short_hash(hash),
            force,
            "updating branch ref"
        );
        self.send(
            self.request(Method::PATCH, full)
                .json(&UpdateRefBody { sha: hash, force }),
            &url,
        )
        .await?;
        Ok(())
    }
}
