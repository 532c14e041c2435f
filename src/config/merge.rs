// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-repository rewrite overrides.
//!
//! ```text
//! RewriteConfig + RepoConfigOverride --> field-by-field merge
//! ```
//!
//! Only explicitly set fields (`Some`) in the override replace base values.

use serde::{Deserialize, Serialize};

use super::types::RewriteConfig;

/// `[repos."owner/name"]` section with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfigOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,
}

/// Merge a repository override over the default `[rewrite]` section.
pub(super) fn merge_rewrite_config(
    base: &RewriteConfig,
    override_config: &RepoConfigOverride,
) -> RewriteConfig {
    RewriteConfig {
        branch: override_config
            .branch
            .clone()
            .or_else(|| base.branch.clone()),
        window_size: override_config.window_size.unwrap_or(base.window_size),
        timeout_secs: override_config.timeout_secs.unwrap_or(base.timeout_secs),
        progress: override_config.progress.unwrap_or(base.progress),
    }
}
