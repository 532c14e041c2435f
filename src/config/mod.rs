// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for reword-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. reword.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. REWORD_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REWORD_GITHUB__TOKEN=ghp_x        → github.token = "ghp_x"
//! REWORD_REWRITE__WINDOW_SIZE=20    → rewrite.window_size = 20
//! REWORD_GLOBAL__OUTPUT_LOG_LEVEL=4 → global.output_log_level = 4
//! ```
//!
//! # Repository Overrides
//!
//! ```toml
//! [rewrite]
//! window_size = 50
//!
//! [repos."octo/hello"]
//! branch = "develop"   # override for this repository only
//! ```

pub mod loader;
pub mod merge;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::github::MAX_PER_PAGE;

use loader::ConfigLoader;
use merge::RepoConfigOverride;
use types::{GithubConfig, GlobalConfig, RewriteConfig};

/// Name of the optional config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "reword.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "REWORD";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub github: GithubConfig,
    /// Default rewrite settings.
    pub rewrite: RewriteConfig,
    /// Per-repository overrides keyed by `owner/name`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub repos: BTreeMap<String, RepoConfigOverride>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reword_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("reword.toml")
    ///     .with_env_prefix("REWORD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Rewrite settings for one repository.
    ///
    /// `[repos."owner/name"]` is matched case-insensitively, since GitHub
    /// treats owner and repository names that way.
    #[must_use]
    pub fn rewrite_for(&self, repo: &str) -> RewriteConfig {
        self.repos
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(repo))
            .map_or_else(
                || self.rewrite.clone(),
                |(_, over)| merge::merge_rewrite_config(&self.rewrite, over),
            )
    }

    /// Checks value ranges after all sources are merged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an out-of-range window or timeout,
    /// in `[rewrite]` or any `[repos]` entry.
    pub fn validate(&self) -> Result<()> {
        validate_rewrite("rewrite", &self.rewrite)?;
        for name in self.repos.keys() {
            validate_rewrite(&format!("repos.\"{name}\""), &self.rewrite_for(name))?;
        }
        if self.github.api_url.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "github".to_string(),
                key: "api_url".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Secrets are shown as `[hidden]`. Output is sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_github_options(&mut options);
        format_rewrite_options(&mut options, "rewrite", &self.rewrite);
        for name in self.repos.keys() {
            format_rewrite_options(
                &mut options,
                &format!("repos.\"{name}\""),
                &self.rewrite_for(name),
            );
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_github_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("github.api_url".into(), self.github.api_url.clone());
        if self.github.token().is_some() {
            options.insert("github.token".into(), "[hidden]".into());
        }
        if let Some(agent) = &self.github.user_agent {
            options.insert("github.user_agent".into(), agent.clone());
        }
    }
}

fn validate_rewrite(section: &str, rewrite: &RewriteConfig) -> std::result::Result<(), ConfigError> {
    let invalid = |key: &str, message: String| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message,
    };
    if rewrite.window_size == 0 || rewrite.window_size > MAX_PER_PAGE {
        return Err(invalid(
            "window_size",
            format!("must be 1-{MAX_PER_PAGE}, got {}", rewrite.window_size),
        ));
    }
    if rewrite.timeout_secs == 0 {
        return Err(invalid("timeout_secs", "must be at least 1".to_string()));
    }
    if rewrite.branch.as_deref().is_some_and(|b| b.trim().is_empty()) {
        return Err(invalid("branch", "must not be empty".to_string()));
    }
    Ok(())
}

fn format_rewrite_options(
    options: &mut BTreeMap<String, String>,
    section: &str,
    rewrite: &RewriteConfig,
) {
    if let Some(branch) = &rewrite.branch {
        options.insert(format!("{section}.branch"), branch.clone());
    }
    options.insert(
        format!("{section}.window_size"),
        rewrite.window_size.to_string(),
    );
    options.insert(
        format!("{section}.timeout_secs"),
        rewrite.timeout_secs.to_string(),
    );
    options.insert(format!("{section}.progress"), rewrite.progress.to_string());
}
