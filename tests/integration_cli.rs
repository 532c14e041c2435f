// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use reword_rs::cli::global::GlobalOptions;
use reword_rs::cli::{Cli, Command};
use reword_rs::history::FixRequest;

// =============================================================================
// Version / Options
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["reword", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_options_command() {
    let cli = Cli::try_parse_from(["reword", "options"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Options)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["reword"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Fix Command
// =============================================================================

#[test]
fn cli_fix_command() {
    let cli = Cli::try_parse_from([
        "reword",
        "fix",
        "octo/hello",
        "3f2a91c",
        "fix: correct typo in README",
    ])
    .unwrap();

    let Some(Command::Fix(args)) = cli.command else {
        panic!("Expected Fix command");
    };
    assert_eq!(args.target.repo, "octo/hello");
    assert_eq!(args.target.branch, None);
    assert_eq!(args.hash, "3f2a91c");
    assert_eq!(args.message, "fix: correct typo in README");
    assert!(!args.dry);
}

#[test]
fn cli_fix_with_branch_and_dry() {
    let cli = Cli::try_parse_from([
        "reword",
        "fix",
        "https://github.com/octo/hello",
        "abc1234",
        "multi\n\nline",
        "-b",
        "develop",
        "--dry",
    ])
    .unwrap();

    let Some(Command::Fix(args)) = cli.command else {
        panic!("Expected Fix command");
    };
    assert_eq!(args.target.branch.as_deref(), Some("develop"));
    assert_eq!(args.message, "multi\n\nline");
    assert!(args.dry);
}

#[test]
fn cli_fix_missing_message_rejected() {
    let result = Cli::try_parse_from(["reword", "fix", "octo/hello", "abc1234"]);
    assert!(result.is_err());
}

// =============================================================================
// Bulk Command
// =============================================================================

#[test]
fn cli_bulk_multiple_fixes() {
    let cli = Cli::try_parse_from([
        "reword",
        "bulk",
        "octo/hello",
        "-f",
        "3f2a91c=docs: readme",
        "--fix",
        "9b0e4d1=feat: a=b",
    ])
    .unwrap();

    let Some(Command::Bulk(args)) = cli.command else {
        panic!("Expected Bulk command");
    };
    assert_eq!(
        args.fixes,
        vec![
            FixRequest::new("3f2a91c", "docs: readme"),
            FixRequest::new("9b0e4d1", "feat: a=b"),
        ]
    );
    assert!(args.from.is_none());
}

#[test]
fn cli_bulk_from_file() {
    let cli =
        Cli::try_parse_from(["reword", "bulk", "octo/hello", "--from", "fixes.json", "--dry"])
            .unwrap();

    let Some(Command::Bulk(args)) = cli.command else {
        panic!("Expected Bulk command");
    };
    assert!(args.fixes.is_empty());
    assert_eq!(args.from.as_deref(), Some(std::path::Path::new("fixes.json")));
    assert!(args.dry);
}

#[test]
fn cli_bulk_fix_without_separator_rejected() {
    let result = Cli::try_parse_from(["reword", "bulk", "octo/hello", "-f", "3f2a91c"]);
    assert!(result.is_err());
}

// =============================================================================
// History Command
// =============================================================================

#[test]
fn cli_history_with_limit() {
    let cli = Cli::try_parse_from(["reword", "history", "octo/hello", "-n", "20"]).unwrap();

    let Some(Command::History(args)) = cli.command else {
        panic!("Expected History command");
    };
    assert_eq!(args.limit, Some(20));
}

#[test]
fn cli_history_limit_out_of_range() {
    assert!(Cli::try_parse_from(["reword", "history", "octo/hello", "-n", "0"]).is_err());
    assert!(Cli::try_parse_from(["reword", "history", "octo/hello", "-n", "101"]).is_err());
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_before_command() {
    let cli = Cli::try_parse_from([
        "reword",
        "-c",
        "a.toml",
        "-c",
        "b.toml",
        "--no-default-config",
        "-l",
        "4",
        "--no-progress",
        "history",
        "octo/hello",
    ])
    .unwrap();

    assert_eq!(cli.global.configs.len(), 2);
    assert!(cli.global.no_default_config);
    assert_eq!(cli.global.log_level, Some(4));
    assert!(cli.global.no_progress);
}

#[test]
fn cli_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["reword", "-l", "6", "version"]).is_err());
}

#[test]
fn cli_overrides_from_flags() {
    let opts = GlobalOptions {
        options: vec!["rewrite.window_size=20".to_string()],
        github_token: Some("ghp_secret".to_string()),
        api_url: Some("https://ghe.example.com/api/v3".to_string()),
        file_log_level: Some(2),
        no_progress: true,
        ..Default::default()
    };

    let overrides = opts.to_config_overrides().unwrap();
    insta::assert_debug_snapshot!(overrides, @r#"
    [
        (
            "rewrite.window_size",
            "20",
        ),
        (
            "global.file_log_level",
            "2",
        ),
        (
            "github.token",
            "ghp_secret",
        ),
        (
            "github.api_url",
            "https://ghe.example.com/api/v3",
        ),
        (
            "rewrite.progress",
            "false",
        ),
    ]
    "#);
}

#[test]
fn cli_bad_set_rejected() {
    let opts = GlobalOptions {
        options: vec!["window_size=20".to_string()],
        ..Default::default()
    };
    assert!(opts.to_config_overrides().is_err());
}
