// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use super::{RewriteOptions, Rewriter, bulk_fix, single_fix};
use crate::error::{RewordError, RewriteError};
use crate::history::memory::MemoryStore;
use crate::history::model::{FixRequest, NewCommit};
use crate::history::store::ObjectStore;
use crate::history::test_support::{
    BRANCH, SlowStore, commit_id, store_with_chain, tree_id, walk,
};

fn rewrite_kind(err: &RewordError) -> Option<&RewriteError> {
    match err {
        RewordError::Rewrite(inner) => Some(&**inner),
        _ => None,
    }
}

#[tokio::test]
async fn test_single_fix_scenario() {
    // [C0 (tip), C1, C2, C3 (root)], fix C2
    let store = store_with_chain(4);

    let result = single_fix(&store, BRANCH, &commit_id(2), "fix: corrected typo")
        .await
        .unwrap();

    assert_eq!(result.old_tip, commit_id(0));
    assert_eq!(store.ref_target(BRANCH), Some(result.new_tip.clone()));
    assert_eq!(store.created_count(), 3);
    assert_eq!(store.ref_update_count(), 1);

    let walked = walk(&store, &result.new_tip, 10);
    let messages: Vec<_> = walked.iter().map(|c| c.summary().to_string()).collect();
    insta::assert_debug_snapshot!(messages, @r#"
    [
        "commit 0",
        "commit 1",
        "fix: corrected typo",
        "commit 3",
    ]
    "#);

    // C2' hangs from the untouched C3
    assert_eq!(walked[2].parent_hashes, vec![commit_id(3)]);
    assert_eq!(walked[3].hash, commit_id(3));
    for (i, commit) in walked.iter().enumerate() {
        assert_eq!(commit.tree_hash, tree_id(i));
    }
}

#[tokio::test]
async fn test_bulk_fix_scenario_with_root() {
    // Fix C1 and the root C3; replay starts at the root with no parents
    let store = store_with_chain(4);
    let requests = vec![
        FixRequest::new(commit_id(1), "feat: new C1"),
        FixRequest::new(&commit_id(3)[..8], "chore: new root"),
    ];

    let result = bulk_fix(&store, BRANCH, &requests).await.unwrap();

    assert_eq!(result.rewritten.len(), 4);
    assert_eq!(store.ref_update_count(), 1, "bulk fix must update the ref once");

    let walked = walk(&store, &result.new_tip, 10);
    assert_eq!(walked.len(), 4);
    let root = &walked[3];
    assert!(root.parent_hashes.is_empty());
    assert_eq!(root.message, "chore: new root");
    assert_eq!(walked[2].message, "commit 2\n\nbody of commit 2");
    assert_eq!(walked[1].message, "feat: new C1");
    assert_eq!(walked[0].summary(), "commit 0");
    for commit in &walked {
        assert!(commit.parent_hashes.len() <= 1);
    }
}

#[tokio::test]
async fn test_root_rule_same_in_single_and_bulk() {
    let single_store = store_with_chain(3);
    let single = single_fix(&single_store, BRANCH, &commit_id(2), "root")
        .await
        .unwrap();

    let bulk_store = store_with_chain(3);
    let bulk = bulk_fix(
        &bulk_store,
        BRANCH,
        &[FixRequest::new(commit_id(2), "root")],
    )
    .await
    .unwrap();

    let single_root = single_store.commit(&single.rewritten[0].1).unwrap();
    let bulk_root = bulk_store.commit(&bulk.rewritten[0].1).unwrap();
    assert!(single_root.parent_hashes.is_empty());
    assert_eq!(single_root.parent_hashes, bulk_root.parent_hashes);
    assert_eq!(single.new_tip, bulk.new_tip);
}

#[tokio::test]
async fn test_atomic_visibility_on_every_failing_step() {
    // deepest index 3 => four creations; fail each one in turn
    for step in 0..4 {
        let store = store_with_chain(5).fail_create_at(step);
        let before = store.ref_target(BRANCH);

        let result = single_fix(&store, BRANCH, &commit_id(3), "reworded").await;

        assert!(result.is_err(), "step {step} should fail");
        assert_eq!(store.ref_target(BRANCH), before, "ref moved at step {step}");
        assert_eq!(store.ref_update_count(), 0);
        assert_eq!(store.created_count(), step);
    }
}

#[tokio::test]
async fn test_ref_update_failure_leaves_branch() {
    let store = store_with_chain(3).fail_ref_update();
    let before = store.ref_target(BRANCH);

    let result = single_fix(&store, BRANCH, &commit_id(1), "reworded").await;

    assert!(matches!(result, Err(RewordError::Remote(_))));
    assert_eq!(store.ref_target(BRANCH), before);
    // objects exist but nothing references them
    assert_eq!(store.created_count(), 2);
}

#[tokio::test]
async fn test_noop_fix_still_produces_new_tip() {
    let store = store_with_chain(4);
    let original = store.commit(&commit_id(2)).unwrap().message;

    let result = single_fix(&store, BRANCH, &commit_id(2), &original)
        .await
        .unwrap();

    assert_ne!(result.new_tip, result.old_tip);
    assert_eq!(result.rewritten.len(), 3);
    for (old, new) in &result.rewritten {
        assert_ne!(old, new);
        assert_eq!(
            store.commit(old).unwrap().message,
            store.commit(new).unwrap().message
        );
    }
}

#[tokio::test]
async fn test_noop_fix_on_store_created_root() {
    let store = MemoryStore::new();
    let root = store
        .create_commit(&NewCommit {
            message: "chore: init".to_string(),
            tree: tree_id(0),
            parents: Vec::new(),
            author: None,
        })
        .await
        .unwrap();
    store.update_ref(BRANCH, &root, true).await.unwrap();

    let result = single_fix(&store, BRANCH, &root, "chore: init")
        .await
        .unwrap();

    assert_eq!(result.old_tip, root);
    assert_ne!(result.new_tip, root);
    assert_eq!(store.ref_target(BRANCH), Some(result.new_tip.clone()));

    let rebuilt = store.commit(&result.new_tip).unwrap();
    assert_eq!(rebuilt.message, "chore: init");
    assert_eq!(rebuilt.tree_hash, tree_id(0));
    assert!(rebuilt.is_root());
}

#[tokio::test]
async fn test_target_outside_window() {
    let store = store_with_chain(10);
    let rewriter = Rewriter::new(&store)
        .with_options(RewriteOptions::builder().with_window_size(5).build());

    let err = rewriter
        .single_fix(BRANCH, &commit_id(7), "too old")
        .await
        .unwrap_err();

    match rewrite_kind(&err) {
        Some(RewriteError::TargetNotFound { targets, limit }) => {
            assert_eq!(targets, &vec![commit_id(7)]);
            assert_eq!(*limit, 5);
        }
        other => panic!("expected TargetNotFound, got {other:?}"),
    }
    assert_eq!(store.created_count(), 0);
}

#[tokio::test]
async fn test_bulk_fix_skips_unknown_ids() {
    let store = store_with_chain(4);
    let requests = vec![
        FixRequest::new(commit_id(1), "fix: resolvable"),
        FixRequest::new("deadbeef", "fix: nowhere"),
    ];

    let result = bulk_fix(&store, BRANCH, &requests).await.unwrap();

    assert_eq!(result.rewritten.len(), 2);
    assert_eq!(store.ref_target(BRANCH), Some(result.new_tip.clone()));
    let walked = walk(&store, &result.new_tip, 4);
    assert_eq!(walked[1].message, "fix: resolvable");
    assert_eq!(walked[1].parent_hashes, vec![commit_id(2)]);
    assert_eq!(store.created_count(), 2);
    assert!(walked.iter().all(|c| c.message != "fix: nowhere"));
}

#[tokio::test]
async fn test_empty_branch_and_no_fixes() {
    let store = crate::history::MemoryStore::new();
    let err = single_fix(&store, BRANCH, "abcd", "msg").await.unwrap_err();
    assert!(matches!(
        rewrite_kind(&err),
        Some(RewriteError::EmptyHistory(_))
    ));

    let store = store_with_chain(2);
    let err = bulk_fix(&store, BRANCH, &[]).await.unwrap_err();
    assert!(matches!(rewrite_kind(&err), Some(RewriteError::NoFixes)));
}

#[tokio::test]
async fn test_conflicting_messages_for_same_commit() {
    let store = store_with_chain(3);
    let requests = vec![
        FixRequest::new(commit_id(1), "one"),
        FixRequest::new(commit_id(1), "two"),
    ];

    let err = bulk_fix(&store, BRANCH, &requests).await.unwrap_err();
    assert!(matches!(
        rewrite_kind(&err),
        Some(RewriteError::AmbiguousTarget { .. })
    ));
    assert_eq!(store.created_count(), 0);
}

#[tokio::test]
async fn test_deadline_leaves_branch_untouched() {
    let store = SlowStore {
        inner: store_with_chain(4),
        delay: Duration::from_millis(200),
    };
    let rewriter = Rewriter::new(&store).with_options(
        RewriteOptions::builder()
            .with_timeout(Duration::from_millis(20))
            .build(),
    );

    let err = rewriter
        .single_fix(BRANCH, &commit_id(3), "slow")
        .await
        .unwrap_err();

    assert!(matches!(
        rewrite_kind(&err),
        Some(RewriteError::DeadlineExceeded { .. })
    ));
    assert!(err.is_transient());
    assert_eq!(store.inner.ref_target(BRANCH), Some(commit_id(0)));
}

#[tokio::test]
async fn test_cancelled_before_apply() {
    let store = store_with_chain(3);
    let rewriter = Rewriter::new(&store);
    let planned = rewriter
        .plan(BRANCH, &[FixRequest::new(commit_id(1), "x")])
        .await
        .unwrap();

    rewriter.cancel_token().cancel();
    let err = rewriter.apply(&planned).await.unwrap_err();

    assert!(matches!(rewrite_kind(&err), Some(RewriteError::Cancelled)));
    assert_eq!(store.ref_target(BRANCH), Some(commit_id(0)));
}

#[tokio::test]
async fn test_preview_does_not_touch_store() {
    let store = store_with_chain(4);
    let rewriter = Rewriter::new(&store);
    let planned = rewriter
        .plan(BRANCH, &[FixRequest::new(commit_id(2), "preview")])
        .await
        .unwrap();

    let preview = rewriter.preview(&planned).await.unwrap();

    assert_eq!(preview.rewritten.len(), 3);
    assert_ne!(preview.new_tip, preview.old_tip);
    assert_eq!(store.created_count(), 0);
    assert_eq!(store.ref_target(BRANCH), Some(commit_id(0)));

    let steps: Vec<_> = planned
        .steps()
        .map(|s| (s.index, s.changed, s.message.lines().next().unwrap_or_default().to_string()))
        .collect();
    insta::assert_debug_snapshot!(steps, @r#"
    [
        (
            2,
            true,
            "preview",
        ),
        (
            1,
            false,
            "commit 1",
        ),
        (
            0,
            false,
            "commit 0",
        ),
    ]
    "#);
}
