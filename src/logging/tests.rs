// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::new(0).unwrap(), LogLevel::SILENT);
    assert_eq!(LogLevel::new(6).unwrap(), LogLevel::DUMP);
    insta::assert_snapshot!(
        LogLevel::new(7).unwrap_err().to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 7"
    );
    assert_eq!(LogLevel::from_u8(9), None);
}

#[test]
fn test_filter_directives() {
    let directives: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(|level| (level.as_u8(), level.filter_directives()))
        .collect();

    insta::assert_debug_snapshot!(directives, @r#"
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
            "warn,envman=info",
        ),
        (
            4,
            "warn,envman=debug",
        ),
        (
            5,
            "warn,envman=trace",
        ),
        (
            6,
            "trace",
        ),
    ]
    "#);
}

#[test]
fn test_log_level_display() {
    assert_eq!(LogLevel::INFO.to_string(), "3 (info)");
    assert_eq!(LogLevel::DUMP.to_string(), "6 (dump)");
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(ok, LogLevel::DEBUG);
    assert!(serde_json::from_str::<LogLevel>("12").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());

    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_log_file("logs/envman.log".into())
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(
        config.log_file(),
        Some(std::path::Path::new("logs/envman.log"))
    );
}
