// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::BackendKind;
use super::{Config, ConfigLoader, parse_override};
use crate::error::ConfigError;
use crate::logging::{LogFormat, LogLevel};
use std::path::Path;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = Config::default();
    insta::assert_json_snapshot!(
        serde_json::json!({
            "global.output_log_level": config.global.output_log_level.as_u8(),
            "global.file_log_level": config.global.file_log_level.as_u8(),
            "store.backend": config.store.backend.to_string(),
            "notify.enabled": config.notify.enabled,
            "notify.timeout_ms": config.notify.timeout_ms,
            "backup.pretty": config.backup.pretty,
        }),
        @r#"
    {
      "backup.pretty": true,
      "global.file_log_level": 4,
      "global.output_log_level": 2,
      "notify.enabled": true,
      "notify.timeout_ms": 5000,
      "store.backend": "native"
    }
    "#
    );
}

#[test]
fn test_backend_kind_parse() {
    assert_eq!("memory".parse::<BackendKind>().unwrap(), BackendKind::Memory);
    assert_eq!("FILE".parse::<BackendKind>().unwrap(), BackendKind::File);
    assert_eq!("Native".parse::<BackendKind>().unwrap(), BackendKind::Native);
    assert!(matches!(
        "registry".parse::<BackendKind>(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_backend_kind_uses_files() {
    assert!(BackendKind::File.uses_files());
    assert!(!BackendKind::Memory.uses_files());
    assert_eq!(BackendKind::Native.uses_files(), !cfg!(windows));
}

#[test]
fn test_config_parse_store_section() {
    let toml = r#"
[store]
backend = "file"
user_file = "/tmp/envvar/user.env"
system_file = "/tmp/envvar/system.env"
system_read_only = true
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.store.backend, BackendKind::File);
    assert_eq!(
        config.store.user_file().unwrap(),
        Path::new("/tmp/envvar/user.env")
    );
    assert_eq!(
        config.store.system_file().unwrap(),
        Path::new("/tmp/envvar/system.env")
    );
    assert!(config.store.system_read_only);
    assert!(!config.store.user_read_only);
}

#[test]
fn test_config_parse_notify_and_global() {
    let toml = r#"
[global]
output_log_level = 4
log_format = "json"

[store]
backend = "memory"

[notify]
timeout_ms = 250
command = ["sh", "-c", "true"]
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_format, LogFormat::Json);
    assert_eq!(config.notify.timeout(), Duration::from_millis(250));
    assert_eq!(config.notify.command, ["sh", "-c", "true"]);
}

#[test]
fn test_memory_backend_leaves_paths_unset() {
    let config = Config::parse("[store]\nbackend = \"memory\"").unwrap();
    assert!(config.store.user_file.is_none());
    assert!(config.store.user_file().is_err());
}

#[test]
fn test_zero_timeout_rejected() {
    let err = Config::parse("[store]\nbackend = \"memory\"\n[notify]\ntimeout_ms = 0").unwrap_err();
    insta::assert_snapshot!(
        err,
        @"config error: invalid value for 'timeout_ms' in section '[notify]': must be greater than zero"
    );
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = Config::parse("[global]\noutput_log_level = 9");
    assert!(result.is_err());
}

#[test]
fn test_deny_unknown_fields_top_level() {
    let toml = r#"
[store]
backend = "memory"

[unknown_section]
foo = "bar"
"#;
    let result = Config::parse(toml);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("unknown_section"));
}

#[test]
fn test_deny_unknown_fields_in_section() {
    let result = Config::parse("[store]\nbackend = \"memory\"\nregistry_hive = \"HKCU\"");
    assert!(result.is_err());
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new().add_toml_str("[backup]\n pretty = false");

    let loaded_files = loader.loaded_files();
    let files: Vec<_> = loaded_files
        .iter()
        .map(|(source, path)| (source.as_str(), path.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(files, [("string", "<string>".to_string())]);
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[backup]\n pretty = false")
        .add_toml_str("[store]\n backend = \"memory\"");

    insta::assert_snapshot!(
        loader.format_loaded_files().join("\n"),
        @r"
    1. [string] <string>
    2. [string] <string>
    "
    );
}

#[test]
fn test_config_loader_optional_only_tracks_existing() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/path.toml");

    assert!(loader.loaded_files().is_empty());
}

#[test]
fn test_config_loader_optional_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("envvar.toml");
    std::fs::write(&path, "[store]\nbackend = \"memory\"\n").unwrap();

    let loader = ConfigLoader::new().add_toml_file_optional(&path);
    assert_eq!(loader.loaded_files().len(), 1);
    let config = loader.build().unwrap();
    assert_eq!(config.store.backend, BackendKind::Memory);
}

#[test]
fn test_config_from_file_required_missing() {
    assert!(Config::from_file("/nonexistent/envvar.toml").is_err());
}

#[test]
fn test_later_sources_override_earlier() {
    let config = ConfigLoader::new()
        .add_toml_str("[store]\nbackend = \"file\"\nuser_file = \"a.env\"\nsystem_file = \"b.env\"")
        .add_toml_str("[store]\nbackend = \"memory\"")
        .build()
        .unwrap();
    assert_eq!(config.store.backend, BackendKind::Memory);
    assert_eq!(config.store.user_file.as_deref(), Some(Path::new("a.env")));
}

#[test]
fn test_overrides_applied_last() {
    let config = ConfigLoader::new()
        .add_toml_str("[store]\nbackend = \"memory\"\n[backup]\npretty = true")
        .with_overrides(&[
            "backup/pretty=false",
            "notify.timeout_ms=1500",
            "store/user_read_only=true",
            "notify/command=sh -c true",
        ])
        .unwrap()
        .build()
        .unwrap();
    assert!(!config.backup.pretty);
    assert_eq!(config.notify.timeout_ms, 1500);
    assert!(config.store.user_read_only);
    assert_eq!(config.notify.command, ["sh", "-c", "true"]);
}

#[test]
fn test_parse_override() {
    assert_eq!(
        parse_override("Store/Backend=memory").unwrap(),
        ("store.backend".to_string(), "memory".to_string())
    );
    assert_eq!(
        parse_override("global.log_file = /tmp/a=b.log").unwrap(),
        ("global.log_file".to_string(), "/tmp/a=b.log".to_string())
    );
    assert!(parse_override("backend=memory").is_err());
    assert!(parse_override("store/backend").is_err());
    assert!(parse_override("store/=x").is_err());
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::parse("[store]\nbackend = \"memory\"").unwrap();
    let first = config.format_options();
    let second = config.format_options();
    assert_eq!(first, second);

    let keys: Vec<_> = first
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn test_format_options_memory() {
    let config = Config::parse("[store]\nbackend = \"memory\"").unwrap();
    let lines: Vec<_> = config
        .format_options()
        .iter()
        .map(|line| line.trim_end().to_string())
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    backup.pretty           = true
    global.file_log_level   = 4
    global.log_file         =
    global.log_format       = text
    global.output_log_level = 2
    notify.command          =
    notify.enabled          = true
    notify.timeout_ms       = 5000
    store.backend           = memory
    store.system_file       =
    store.system_read_only  = false
    store.user_file         =
    store.user_read_only    = false
    ");
}
