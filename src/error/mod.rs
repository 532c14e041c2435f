// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            RewordError (~24 bytes)
//!                     |
//!     +--------+------+------+--------+
//!     |        |      |      |        |
//!     v        v      v      v        v
//!  Remote  Rewrite  Config   Io     Other
//!    Box     Box     Box     Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Remote   Http, Request, Decode, InvalidRepo
//!   Rewrite  TargetNotFound, AmbiguousTarget, InvalidTarget,
//!            NoFixes, EmptyHistory, DeadlineExceeded, Cancelled
//!   Config   ParseError, MissingKey, InvalidValue
//!
//! All variants boxed => RewordError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`RewordError`].
pub type RewordResult<T> = std::result::Result<T, RewordError>;

/// Top-level error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum RewordError {
    /// A call against the remote object store failed.
    #[error("remote error: {0}")]
    Remote(#[from] Box<RemoteError>),

    /// The rewrite could not be planned or carried out.
    #[error("rewrite error: {0}")]
    Rewrite(#[from] Box<RewriteError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl RewordError {
    /// Whether a caller-level retry of the whole invocation may succeed.
    ///
    /// Rewrites never retry internally; this only classifies the failure.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Remote(remote) => remote.is_transient(),
            Self::Rewrite(rewrite) => matches!(
                **rewrite,
                RewriteError::DeadlineExceeded { .. } | RewriteError::Cancelled
            ),
            Self::Config(_) | Self::Io(_) | Self::Other(_) => false,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RewordError {
                fn from(err: $error) -> Self {
                    RewordError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    RemoteError => Remote,
    RewriteError => Rewrite,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Remote Errors ---

/// Errors raised while talking to the remote commit graph.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Non-success HTTP status from the API.
    #[error("http error {status}: {url} - {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    /// Transport-level failure from reqwest.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not have the expected shape.
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Repository slug is not `owner/name`.
    #[error("invalid repository '{0}', expected owner/name")]
    InvalidRepo(String),
}

impl RemoteError {
    /// Rate limits, server errors and transport failures may clear up on retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Decode { .. } | Self::InvalidRepo(_) => false,
        }
    }
}

// --- Rewrite Errors ---

/// Errors from planning or replaying a history rewrite.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// None of the targets are inside the window.
    #[error("commit(s) {} not found in the last {limit} commits", .targets.join(", "))]
    TargetNotFound { targets: Vec<String>, limit: usize },

    /// A target prefix matches several commits, or several targets hit one commit.
    #[error("target '{target}' is ambiguous, matches: {}", .matches.join(", "))]
    AmbiguousTarget {
        target: String,
        matches: Vec<String>,
    },

    /// Target is not a plausible hex commit id.
    #[error("invalid commit id '{0}' (expected 4-40 hex characters)")]
    InvalidTarget(String),

    /// Bulk fix invoked with an empty list.
    #[error("no fixes requested")]
    NoFixes,

    /// The branch has no commits to rewrite.
    #[error("branch '{0}' has no history")]
    EmptyHistory(String),

    /// Replay did not finish before the deadline; the ref was not updated.
    #[error("rewrite did not finish within {secs} seconds, branch left untouched")]
    DeadlineExceeded { secs: u64 },

    /// Replay was cancelled; the ref was not updated.
    #[error("rewrite cancelled, branch left untouched")]
    Cancelled,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
