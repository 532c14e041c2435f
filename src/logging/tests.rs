// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(5).is_ok());
    let err = LogLevel::new(6).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'log_level' in section '[global]': log level must be 0-5, got 6");
}

#[test]
fn test_log_level_filters() {
    let filters: Vec<_> = (0..=LogLevel::MAX)
        .filter_map(LogLevel::from_u8)
        .map(|level| (level.as_u8(), level.to_filter_string()))
        .collect();
    insta::assert_debug_snapshot!(filters, @r#"
    [
        (
            0,
            "off",
        ),
        (
            1,
            "error",
        ),
        (
            2,
            "warn",
        ),
        (
            3,
            "info",
        ),
        (
            4,
            "warn,reword_rs=debug",
        ),
        (
            5,
            "warn,reword_rs=trace",
        ),
    ]
    "#);
}

#[test]
fn test_log_level_tracing_mapping() {
    assert_eq!(LogLevel::SILENT.to_tracing_level(), None);
    assert_eq!(
        LogLevel::WARN.to_tracing_level(),
        Some(tracing::Level::WARN)
    );
    assert!(LogLevel::TRACE > LogLevel::INFO);
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&level).unwrap(), "4");
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(config.ansi());

    let config = LogConfig::builder()
        .with_console_level(LogLevel::ERROR)
        .with_log_file("logs/reword.log".to_string())
        .with_ansi(false)
        .build();
    assert_eq!(config.console_level(), LogLevel::ERROR);
    assert_eq!(config.log_file(), Some("logs/reword.log"));
    assert!(!config.ansi());
}
