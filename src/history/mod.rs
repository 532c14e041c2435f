// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! History linearization and replay engine.
//!
//! ```text
//!                  Rewriter::bulk_fix / single_fix
//!                              |
//!                       fetch::fetch_window
//!                        |              |
//!                        v              v
//!          resolve::resolve_targets   messages::MessageMap
//!                        \              /
//!                         v            v
//!                     replay::replay_chain  (oldest -> newest)
//!                              |
//!                              v
//!                  store.update_ref(force)   <- once, last
//!
//!   store::ObjectStore  <- github::GitHubClient | memory::MemoryStore
//! ```
//!
//! The branch ref is the only shared mutable resource and is written once,
//! after every replacement commit exists. Any earlier failure leaves it
//! exactly where it was.

pub mod fetch;
pub mod memory;
pub mod messages;
pub mod model;
pub mod replay;
pub mod resolve;
pub mod rewrite;
pub mod store;

pub use memory::MemoryStore;
pub use model::{CommitRecord, FixRequest, HistoryWindow, NewCommit, RewritePlan, RewriteResult};
pub use rewrite::{PlannedRewrite, PlannedStep, RewriteOptions, Rewriter, bulk_fix, single_fix};
pub use store::ObjectStore;

#[cfg(test)]
pub(crate) mod test_support;
