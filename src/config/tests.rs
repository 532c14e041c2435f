// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write as _;
use std::time::Duration;

use super::merge::{RepoConfigOverride, merge_rewrite_config};
use super::types::RewriteConfig;
use super::{Config, ConfigLoader};
use crate::logging::LogLevel;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert!(config.global.log_file.is_none());
    assert_eq!(config.github.api_url, "https://api.github.com");
    assert!(config.github.token().is_none());
    assert_eq!(config.rewrite.window_size, 50);
    assert_eq!(config.rewrite.timeout(), Duration::from_secs(120));
    assert!(config.rewrite.progress);
    assert!(config.repos.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
        [global]
        output_log_level = 4
        log_file = "logs/reword.log"

        [github]
        api_url = "https://ghe.example.com/api/v3"
        token = "ghp_secret"

        [rewrite]
        window_size = 20
        timeout_secs = 30
        progress = false
        "#,
    )
    .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
    assert_eq!(config.github.token(), Some("ghp_secret"));
    assert_eq!(config.rewrite.window_size, 20);
    assert_eq!(config.rewrite.timeout(), Duration::from_secs(30));
    assert!(!config.rewrite.progress);
}

#[test]
fn test_deny_unknown_fields() {
    assert!(Config::parse("[rewrite]\nwindow = 5").is_err());
    assert!(Config::parse("[nonsense]\nkey = 1").is_err());
}

#[test]
fn test_validation_ranges() {
    for toml in [
        "[rewrite]\nwindow_size = 0",
        "[rewrite]\nwindow_size = 101",
        "[rewrite]\ntimeout_secs = 0",
        "[rewrite]\nbranch = \"  \"",
        "[repos.\"octo/hello\"]\nwindow_size = 500",
        "[github]\napi_url = \"\"",
        "[global]\noutput_log_level = 9",
    ] {
        assert!(Config::parse(toml).is_err(), "{toml} should be rejected");
    }
    assert!(Config::parse("[rewrite]\nwindow_size = 100").is_ok());
}

#[test]
fn test_repo_override_merges_fields() {
    let config = Config::parse(
        r#"
        [rewrite]
        window_size = 40

        [repos."Octo/Hello"]
        branch = "develop"
        timeout_secs = 10
        "#,
    )
    .unwrap();

    let repo = config.rewrite_for("octo/hello");
    assert_eq!(repo.branch.as_deref(), Some("develop"));
    assert_eq!(repo.window_size, 40, "unset fields fall back to [rewrite]");
    assert_eq!(repo.timeout_secs, 10);

    let other = config.rewrite_for("octo/other");
    assert_eq!(other, config.rewrite);
}

#[test]
fn test_merge_rewrite_config_partial_override() {
    let base = RewriteConfig {
        branch: Some("main".to_string()),
        ..RewriteConfig::default()
    };

    let unchanged = merge_rewrite_config(&base, &RepoConfigOverride::default());
    assert_eq!(unchanged, base);

    let merged = merge_rewrite_config(
        &base,
        &RepoConfigOverride {
            window_size: Some(5),
            progress: Some(false),
            ..RepoConfigOverride::default()
        },
    );
    assert_eq!(merged.branch.as_deref(), Some("main"));
    assert_eq!(merged.window_size, 5);
    assert!(!merged.progress);
}

#[test]
fn test_rewrite_options_from_config() {
    let rewrite = RewriteConfig {
        window_size: 7,
        timeout_secs: 9,
        progress: false,
        branch: None,
    };
    let options = rewrite.options();
    assert_eq!(options.window_size(), 7);
    assert_eq!(options.timeout(), Duration::from_secs(9));
    assert!(!options.progress());
}

#[test]
fn test_format_options_hides_token() {
    let config = Config::parse(
        r#"
        [github]
        token = "ghp_do_not_print"
        user_agent = "custom-agent"

        [repos."octo/hello"]
        branch = "develop"
        "#,
    )
    .unwrap();

    let lines = config.format_options();
    let joined = lines.join("\n");
    assert!(!joined.contains("ghp_do_not_print"));
    assert!(lines.iter().any(|l| l.starts_with("github.token") && l.ends_with("= [hidden]")));
    assert!(lines.iter().any(|l| l.starts_with("repos.\"octo/hello\".branch") && l.ends_with("= develop")));
    assert!(lines.iter().any(|l| l.ends_with("= custom-agent")));

    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted, "options are listed in key order");
}

#[test]
fn test_format_options_omits_empty_token() {
    let config = Config::parse("[github]\ntoken = \"\"").unwrap();
    assert!(
        !config
            .format_options()
            .iter()
            .any(|l| l.starts_with("github.token"))
    );
}

#[test]
fn test_config_loader_layers() {
    let mut low = tempfile::NamedTempFile::new().unwrap();
    writeln!(low, "[rewrite]\nwindow_size = 10\ntimeout_secs = 60").unwrap();
    let mut high = tempfile::NamedTempFile::new().unwrap();
    writeln!(high, "[rewrite]\nwindow_size = 25").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(low.path())
        .add_toml_file(high.path())
        .set("rewrite.progress", false)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.rewrite.window_size, 25);
    assert_eq!(config.rewrite.timeout_secs, 60);
    assert!(!config.rewrite.progress);
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_file_optional("/nonexistent/reword.toml")
        .add_toml_str("[rewrite]\nwindow_size = 5");

    assert_eq!(loader.loaded_files().len(), 1);
    insta::assert_debug_snapshot!(loader.format_loaded_files(), @r#"
    [
        "1. [string] <string>",
    ]
    "#);
}

#[test]
fn test_missing_required_file_fails() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/reword.toml")
        .build();
    let err = result.unwrap_err();
    assert!(
        err.to_string()
            .starts_with("config error: failed to parse config file '/nonexistent/reword.toml'"),
        "{err}"
    );
}
