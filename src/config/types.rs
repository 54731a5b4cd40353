// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for envvar-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, StoreConfig, NotifyConfig, BackupConfig
//! ```
//!
//! # Backend Kind
//!
//! ```text
//! BackendKind: Native (default) | File | Memory
//! Native = registry on Windows, file elsewhere
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::{LogFormat, LogLevel};

/// Storage backend selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The platform's own store.
    #[default]
    Native,
    /// `KEY=VALUE` files.
    File,
    /// In-process only; nothing persists.
    Memory,
}

impl BackendKind {
    /// Whether this backend reads and writes environment files.
    #[must_use]
    pub const fn uses_files(self) -> bool {
        match self {
            Self::File => true,
            Self::Native => !cfg!(windows),
            Self::Memory => false,
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::InvalidValue {
                section: "store".to_string(),
                key: "backend".to_string(),
                message: format!("expected 'native', 'file', or 'memory', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// File log line format.
    pub log_format: LogFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

/// Variable store options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Which backend holds the variables.
    pub backend: BackendKind,
    /// User scope file (file backend).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<PathBuf>,
    /// System scope file (file backend).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_file: Option<PathBuf>,
    /// Refuse writes to the user scope.
    pub user_read_only: bool,
    /// Refuse writes to the system scope.
    pub system_read_only: bool,
}

/// Change notification options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    /// Send a notification after every change.
    pub enabled: bool,
    /// Upper bound on how long a notification may block, in milliseconds.
    pub timeout_ms: u64,
    /// Hook command (argv) run instead of the platform broadcast.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 5000,
            command: Vec::new(),
        }
    }
}

impl NotifyConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Backup file options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackupConfig {
    /// Indent backup JSON.
    pub pretty: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}
