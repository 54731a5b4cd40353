// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use envvar_rs::config::Config;
use envvar_rs::config::loader::ConfigLoader;
use envvar_rs::config::types::BackendKind;
use envvar_rs::logging::LogLevel;
use std::path::Path;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
output_log_level = 3
file_log_level = 5
log_file = "/var/log/envvar.log"
log_format = "json"

[store]
backend = "file"
user_file = "/home/a/.config/environment.d/50-envvar.conf"
system_file = "/etc/environment"
system_read_only = true

[notify]
enabled = true
timeout_ms = 1000
command = ["systemctl", "--user", "daemon-reload"]

[backup]
pretty = false
"#;
    let config = Config::parse(toml).unwrap();
    insta::assert_json_snapshot!(config, @r#"
    {
      "global": {
        "output_log_level": 3,
        "file_log_level": 5,
        "log_file": "/var/log/envvar.log",
        "log_format": "json"
      },
      "store": {
        "backend": "file",
        "user_file": "/home/a/.config/environment.d/50-envvar.conf",
        "system_file": "/etc/environment",
        "user_read_only": false,
        "system_read_only": true
      },
      "notify": {
        "enabled": true,
        "timeout_ms": 1000,
        "command": [
          "systemctl",
          "--user",
          "daemon-reload"
        ]
      },
      "backup": {
        "pretty": false
      }
    }
    "#);
}

#[test]
fn config_parse_empty_uses_defaults() {
    if envvar_rs::config::paths::default_user_file().is_none() {
        return;
    }
    let config = Config::parse("").unwrap();
    assert_eq!(config.store.backend, BackendKind::Native);
    assert_eq!(config.global.output_log_level, LogLevel::WARN);
    assert!(config.notify.enabled);
    assert!(config.backup.pretty);
    if BackendKind::Native.uses_files() {
        assert!(config.store.user_file.is_some());
        assert_eq!(
            config.store.system_file.as_deref(),
            Some(Path::new("/etc/environment"))
        );
    }
}

#[test]
fn config_rejects_unknown_backend() {
    assert!(Config::parse("[store]\nbackend = \"registry\"").is_err());
}

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_files_layer_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let local = dir.path().join("local.toml");
    std::fs::write(&base, "[store]\nbackend = \"memory\"\n[notify]\ntimeout_ms = 100\n").unwrap();
    std::fs::write(&local, "[notify]\ntimeout_ms = 200\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file_optional(&local)
        .add_toml_file_optional(dir.path().join("absent.toml"));
    let formatted = loader.format_loaded_files();
    assert_eq!(formatted.len(), 2);
    assert!(formatted[0].starts_with("1. [file] "));
    assert!(formatted[1].starts_with("2. [optional] "));

    let config = loader.build().unwrap();
    assert_eq!(config.store.backend, BackendKind::Memory);
    assert_eq!(config.notify.timeout_ms, 200);
}

#[test]
fn config_from_file_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[store\nbackend = ").unwrap();
    assert!(Config::from_file(&path).is_err());
}

#[test]
fn config_overrides_beat_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("envvar.toml");
    std::fs::write(&path, "[store]\nbackend = \"memory\"\nuser_read_only = false\n").unwrap();

    let config = ConfigLoader::new()
        .add_toml_file(&path)
        .with_overrides(&["store/user_read_only=true", "global/output_log_level=0"])
        .unwrap()
        .build()
        .unwrap();
    assert!(config.store.user_read_only);
    assert_eq!(config.global.output_log_level, LogLevel::SILENT);
}

#[test]
fn config_bad_override_rejected() {
    let result = ConfigLoader::new().with_overrides(&["no-equals-sign"]);
    assert!(result.is_err());
}
