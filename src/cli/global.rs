// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-5)
//! --file-log-level  ← File verbosity (falls back to --log-level)
//! --github-token    ← github.token (also GITHUB_TOKEN)
//! --api-url URL     ← github.api_url
//! --set KEY=VAL     ← Direct config override, e.g. rewrite.window_size=20
//!
//! Precedence: CLI flags > --set > REWORD_* env > --config > reword.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Does not load `reword.toml` from the current directory.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// GitHub token with write access to the repository contents.
    #[arg(long = "github-token", value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API root, for GitHub Enterprise.
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Hides the replay progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Sets an option, such as 'rewrite.window_size=20'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    ///
    /// `--set` entries come first so that dedicated flags win over them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a `--set` entry without `=`
    /// or without a `section.key` path.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>, ConfigError> {
        let mut overrides = Vec::new();

        for option in &self.options {
            let parsed = option
                .split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .filter(|(k, _)| k.contains('.') && !k.starts_with('.') && !k.ends_with('.'));
            let Some((key, value)) = parsed else {
                return Err(ConfigError::InvalidValue {
                    section: "cli".to_string(),
                    key: "set".to_string(),
                    message: format!("expected 'section.key=value', got '{option}'"),
                });
            };
            overrides.push((key.to_string(), value.to_string()));
        }

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level".to_string(), level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level".to_string(), level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file".to_string(), path.display().to_string()));
        }

        if let Some(ref token) = self.github_token {
            overrides.push(("github.token".to_string(), token.clone()));
        }

        if let Some(ref url) = self.api_url {
            overrides.push(("github.api_url".to_string(), url.clone()));
        }

        if self.no_progress {
            overrides.push(("rewrite.progress".to_string(), "false".to_string()));
        }

        Ok(overrides)
    }
}
