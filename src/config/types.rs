// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, GithubConfig, RewriteConfig
//! repos:  "owner/name" -> RepoConfigOverride
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::github::DEFAULT_API_URL;
use crate::history::RewriteOptions;
use crate::history::fetch::DEFAULT_WINDOW_SIZE;
use crate::logging::LogLevel;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Optional log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// GitHub connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// API root, e.g. `https://github.example.com/api/v3` for Enterprise.
    pub api_url: String,
    /// Personal access token with `contents: write` on the target repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Overrides the default `reword-rs/<version>` user agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: None,
        }
    }
}

impl GithubConfig {
    /// Token, treating an empty string as unset.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Rewrite behaviour, overridable per repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfig {
    /// Branch to rewrite; the repository default branch when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Lookback window for target resolution (1-100).
    pub window_size: usize,
    /// Deadline for the replay loop, in seconds.
    pub timeout_secs: u64,
    /// Show a progress bar while replaying.
    pub progress: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            branch: None,
            window_size: DEFAULT_WINDOW_SIZE,
            timeout_secs: 120,
            progress: true,
        }
    }
}

impl RewriteConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Engine options for this section.
    #[must_use]
    pub fn options(&self) -> RewriteOptions {
        RewriteOptions::builder()
            .with_window_size(self.window_size)
            .with_timeout(self.timeout())
            .with_progress(self.progress)
            .build()
    }
}
