// envman: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use super::{ConfigLoader, Settings};
use crate::logging::LogLevel;

fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
    vars.iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    let options = settings.format_options();
    assert_eq!(options.len(), 6);
    assert_eq!(options[0], "export.include_system   = true");
    assert_eq!(options[3], "global.output_log_level = 3");
    assert_eq!(options[5], "notify.timeout_ms       = 5000");
    assert_eq!(settings.log_file(), None);
    assert_eq!(settings.notify_timeout(), Duration::from_millis(5000));
}

#[test]
fn test_empty_builder_yields_defaults() {
    let settings = ConfigLoader::new().build().unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_parse_overrides_defaults() {
    let settings = Settings::parse(
        r#"
[global]
output_log_level = 4
log_file = "logs/envman.log"

[notify]
enabled = false
"#,
    )
    .unwrap();

    assert_eq!(settings.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(settings.global.file_log_level, LogLevel::TRACE);
    assert_eq!(settings.log_file(), Some(Path::new("logs/envman.log")));
    assert!(!settings.notify.enabled);
    assert_eq!(settings.notify.timeout_ms, 5000);
    assert!(settings.export.include_system);
}

#[test]
fn test_unknown_key_rejected() {
    let err = Settings::parse("[notify]\nretries = 3\n").unwrap_err();
    assert!(err.to_string().contains("retries"), "{err}");

    assert!(Settings::parse("[colors]\nenabled = true\n").is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(Settings::parse("[global]\noutput_log_level = 9\n").is_err());
}

#[test]
fn test_zero_timeout_rejected() {
    let err = Settings::parse("[notify]\ntimeout_ms = 0\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'timeout_ms' in section '[notify]': timeout must be greater than zero"
    );
}

#[test]
fn test_file_layers_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let local = dir.path().join("local.toml");
    std::fs::File::create(&base)
        .unwrap()
        .write_all(b"[notify]\ntimeout_ms = 1000\nenabled = false\n")
        .unwrap();
    std::fs::File::create(&local)
        .unwrap()
        .write_all(b"[notify]\ntimeout_ms = 2000\n")
        .unwrap();

    let settings = Settings::builder()
        .add_toml_file(&base)
        .add_toml_file(&local)
        .build()
        .unwrap();

    assert_eq!(settings.notify.timeout_ms, 2000);
    assert!(!settings.notify.enabled);
}

#[test]
fn test_missing_required_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = Settings::builder()
        .add_toml_file(dir.path().join("absent.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn test_missing_optional_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let loader = Settings::builder().add_toml_file_optional(dir.path().join("absent.toml"));
    assert!(loader.loaded_files().is_empty());
    assert_eq!(loader.build().unwrap(), Settings::default());
}

#[test]
fn test_env_overrides_files() {
    let settings = Settings::builder()
        .add_toml_str("[notify]\ntimeout_ms = 1000\n")
        .with_env_prefix("ENVMAN")
        .with_env_source(env(&[
            ("ENVMAN_NOTIFY__TIMEOUT_MS", "2500"),
            ("ENVMAN_EXPORT__INCLUDE_SYSTEM", "false"),
            ("ENVMAN_GLOBAL__OUTPUT_LOG_LEVEL", "1"),
            ("OTHER_NOTIFY__TIMEOUT_MS", "1"),
        ]))
        .build()
        .unwrap();

    assert_eq!(settings.notify.timeout_ms, 2500);
    assert!(!settings.export.include_system);
    assert_eq!(settings.global.output_log_level, LogLevel::ERROR);
}

#[test]
fn test_cli_override_wins() {
    let settings = Settings::builder()
        .add_toml_str("[global]\noutput_log_level = 2\n")
        .with_env_prefix("ENVMAN")
        .with_env_source(env(&[("ENVMAN_GLOBAL__OUTPUT_LOG_LEVEL", "4")]))
        .set("global.output_log_level", 5_i64)
        .build()
        .unwrap();

    assert_eq!(settings.global.output_log_level, LogLevel::TRACE);
}

#[test]
fn test_format_loaded_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("envman.toml");
    std::fs::write(&path, "").unwrap();

    let loader = Settings::builder()
        .add_toml_file_optional(&path)
        .add_toml_str("");
    let lines = loader.format_loaded_files();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("1. [optional] {}", path.display()));
    assert_eq!(lines[1], "2. [string] <string>");
}
