// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{BackupError, ConfigError, EnvError, EnvResult, ErrorKind, StoreError};
use crate::store::Scope;

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "store".to_string(),
        key: "user_file".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'user_file' in section '[store]'");
}

#[test]
fn test_store_unavailable_display() {
    let err: EnvError = StoreError::unavailable(Scope::System, "access is denied").into();
    insta::assert_snapshot!(err.to_string(), @"cannot open system environment for writing: access is denied");
}

#[test]
fn test_error_kinds() {
    let cases: Vec<(EnvError, ErrorKind)> = vec![
        (StoreError::EmptyName.into(), ErrorKind::InvalidArgument),
        (
            StoreError::InvalidName {
                name: "A=B".to_string(),
                reason: "contains '='",
            }
            .into(),
            ErrorKind::InvalidArgument,
        ),
        (
            StoreError::unavailable(Scope::User, "read-only").into(),
            ErrorKind::StoreUnavailable,
        ),
        (
            BackupError::NotFound {
                path: "missing.json".to_string(),
            }
            .into(),
            ErrorKind::FileNotFound,
        ),
        (
            BackupError::Malformed {
                message: "eof".to_string(),
            }
            .into(),
            ErrorKind::MalformedBackup,
        ),
        (
            std::io::Error::other("boom").into(),
            ErrorKind::Io,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.kind(), expected, "wrong kind for {err}");
    }
}

#[test]
fn test_env_error_size() {
    // Every variant holds a single Box, so the enum is discriminant + pointer.
    let size = std::mem::size_of::<EnvError>();
    assert!(size <= 16, "EnvError is {size} bytes, expected <= 16");
}

#[test]
fn test_env_result_size() {
    let size = std::mem::size_of::<EnvResult<()>>();
    assert!(size <= 16, "EnvResult<()> is {size} bytes, expected <= 16");
}

#[test]
fn test_error_chain_prints_each_message_once() {
    let store = anyhow::Error::from(EnvError::from(StoreError::EmptyName));
    insta::assert_snapshot!(format!("{store:#}"), @"variable name must not be empty");

    let backup = anyhow::Error::from(EnvError::from(BackupError::NotFound {
        path: "missing.json".to_string(),
    }));
    insta::assert_snapshot!(format!("{backup:#}"), @"backup file not found: missing.json");

    let config = anyhow::Error::from(EnvError::from(ConfigError::MissingKey {
        section: "store".to_string(),
        key: "user_file".to_string(),
    }));
    insta::assert_snapshot!(
        format!("{config:#}"),
        @"config error: missing required config key 'user_file' in section '[store]'"
    );
}
