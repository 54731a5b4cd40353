// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON backup files.
//!
//! # Format
//!
//! ```text
//! {
//!   "CreatedAt": "2026-10-19T14:03:07.1234567+02:00",
//!   "UserVariables":   [ { "Name": "EDITOR", "Value": "vim" }, ... ],
//!   "SystemVariables": [ { "Name": "Path",   "Value": "..."  }, ... ]
//! }
//! ```
//!
//! - Missing variable lists read as empty; `CreatedAt` is required
//! - Unknown fields are rejected
//! - Writes go through a temp file in the target directory, then rename


use std::path::Path;

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BackupError, EnvResult};
use crate::store::file::write_atomic;
use crate::store::{EnvVarEntry, Scope};

/// A point-in-time copy of both scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct EnvBackup {
    /// When the snapshot was taken, with the local offset.
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub user_variables: Vec<EnvVarEntry>,
    #[serde(default)]
    pub system_variables: Vec<EnvVarEntry>,
}

impl EnvBackup {
    /// Creates a backup stamped with the current local time.
    #[must_use]
    pub fn new(user_variables: Vec<EnvVarEntry>, system_variables: Vec<EnvVarEntry>) -> Self {
        Self::at(Local::now().fixed_offset(), user_variables, system_variables)
    }

    #[must_use]
    pub const fn at(
        created_at: DateTime<FixedOffset>,
        user_variables: Vec<EnvVarEntry>,
        system_variables: Vec<EnvVarEntry>,
    ) -> Self {
        Self {
            created_at,
            user_variables,
            system_variables,
        }
    }

    /// Entries recorded for `scope`.
    #[must_use]
    pub fn entries(&self, scope: Scope) -> &[EnvVarEntry] {
        match scope {
            Scope::User => &self.user_variables,
            Scope::System => &self.system_variables,
        }
    }

    /// Total number of entries in both scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.user_variables.len() + self.system_variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Encodes `user` and `system` as a backup stamped now.
///
/// # Errors
///
/// Returns a `BackupError::Malformed` if encoding fails.
pub fn serialize(user: Vec<EnvVarEntry>, system: Vec<EnvVarEntry>) -> EnvResult<Vec<u8>> {
    encode(&EnvBackup::new(user, system), true)
}

/// Encodes `backup` as JSON, indented when `pretty`.
///
/// # Errors
///
/// Returns a `BackupError::Malformed` if encoding fails.
pub fn encode(backup: &EnvBackup, pretty: bool) -> EnvResult<Vec<u8>> {
    let result = if pretty {
        serde_json::to_vec_pretty(backup)
    } else {
        serde_json::to_vec(backup)
    };
    Ok(result.map_err(|e| BackupError::Malformed {
        message: e.to_string(),
    })?)
}

/// Decodes a backup document.
///
/// # Errors
///
/// Returns a `BackupError::Malformed` if `bytes` is not valid JSON, has an
/// unknown field, or lacks `CreatedAt`.
pub fn deserialize(bytes: &[u8]) -> EnvResult<EnvBackup> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    Ok(
        serde_json::from_slice(bytes).map_err(|e| BackupError::Malformed {
            message: e.to_string(),
        })?,
    )
}

/// Writes `backup` to `path`, creating parent directories.
///
/// An existing file is replaced atomically.
///
/// # Errors
///
/// Returns a `BackupError::WriteFailed` if the file cannot be written.
pub fn write_backup(path: &Path, backup: &EnvBackup, pretty: bool) -> EnvResult<()> {
    let bytes = encode(backup, pretty)?;
    write_atomic(path, &bytes).map_err(|source| BackupError::WriteFailed {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), entries = backup.len(), "backup written");
    Ok(())
}

/// Reads a backup from `path`.
///
/// # Errors
///
/// Returns `BackupError::NotFound` if `path` does not exist,
/// `BackupError::ReadFailed` if it cannot be read, or
/// `BackupError::Malformed` if its contents do not decode.
pub fn read_backup(path: &Path) -> EnvResult<EnvBackup> {
    if !path.exists() {
        return Err(BackupError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let bytes = std::fs::read(path).map_err(|source| BackupError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    let backup = deserialize(&bytes)?;
    debug!(path = %path.display(), entries = backup.len(), "backup read");
    Ok(backup)
}

/// Suggested file name for a backup taken at `now`.
///
/// ```
/// use chrono::TimeZone;
/// let now = chrono::Local.with_ymd_and_hms(2026, 3, 9, 7, 5, 1).unwrap();
/// assert_eq!(
///     envvar_rs::backup::default_file_name(&now),
///     "env_backup_20260309_070501.json"
/// );
/// ```
#[must_use]
pub fn default_file_name(now: &DateTime<Local>) -> String {
    format!("env_backup_{}.json", now.format("%Y%m%d_%H%M%S"))
}
