// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            EnvError (16 bytes)
//!                   |
//!     +--------+----+----+--------+
//!     v        v         v        v
//!   Store    Backup    Config     Io
//!    Box      Box       Box      Box
//!
//! Sub-errors (unboxed internally):
//!   Store   EmptyName, InvalidName, Unavailable, Io
//!   Backup  NotFound, Malformed, ReadFailed, WriteFailed
//!   Config  MissingKey, InvalidValue
//!
//! ErrorKind (what callers branch on):
//!   InvalidArgument | StoreUnavailable | FileNotFound
//!   MalformedBackup | Io | Config
//! ```

use std::fmt;

use thiserror::Error;

use crate::store::Scope;

/// Convenience alias for `anyhow::Result`, used at the application boundary.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvError`], used by the store, codec and service.
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// Top-level library error type.
///
/// Every variant is boxed so the enum stays two words wide.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Variable store operation failed.
    #[error(transparent)]
    Store(#[from] Box<StoreError>),

    /// Backup file could not be read, written or parsed.
    #[error(transparent)]
    Backup(#[from] Box<BackupError>),

    /// Configuration error.
    ///
    /// The inner error is rendered in the message, not exposed as `source`.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Coarse classification of an [`EnvError`].
///
/// This is the set of failure kinds a front end is expected to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty or otherwise invalid variable name.
    InvalidArgument,
    /// The scope location cannot be opened with the requested access.
    StoreUnavailable,
    /// The backup file to restore from does not exist.
    FileNotFound,
    /// The backup file is not valid JSON of the expected shape.
    MalformedBackup,
    /// Any other I/O failure.
    Io,
    /// Invalid configuration.
    Config,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid argument",
            Self::StoreUnavailable => "store unavailable",
            Self::FileNotFound => "file not found",
            Self::MalformedBackup => "malformed backup",
            Self::Io => "io",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EnvError {
    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(err) => match **err {
                StoreError::EmptyName | StoreError::InvalidName { .. } => {
                    ErrorKind::InvalidArgument
                }
                StoreError::Unavailable { .. } => ErrorKind::StoreUnavailable,
                StoreError::Io { .. } => ErrorKind::Io,
            },
            Self::Backup(err) => match **err {
                BackupError::NotFound { .. } => ErrorKind::FileNotFound,
                BackupError::Malformed { .. } => ErrorKind::MalformedBackup,
                BackupError::ReadFailed { .. } | BackupError::WriteFailed { .. } => ErrorKind::Io,
            },
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvError {
                fn from(err: $error) -> Self {
                    EnvError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    StoreError => Store,
    BackupError => Backup,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Store Errors ---

/// Variable store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Variable name is empty or whitespace only.
    #[error("variable name must not be empty")]
    EmptyName,

    /// Variable name contains a character the store cannot hold.
    #[error("invalid variable name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Scope location cannot be opened with the requested access.
    #[error("cannot open {scope} environment for writing: {reason}")]
    Unavailable { scope: Scope, reason: String },

    /// Reading or writing the scope location failed.
    #[error("failed to access {scope} environment at '{location}': {source}")]
    Io {
        scope: Scope,
        location: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Builds an [`StoreError::Unavailable`] for `scope`.
    pub fn unavailable(scope: Scope, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            scope,
            reason: reason.into(),
        }
    }
}

// --- Backup Errors ---

/// Backup file errors.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Backup file does not exist.
    #[error("backup file not found: {path}")]
    NotFound { path: String },

    /// Backup content is not a valid backup document.
    #[error("backup file is malformed: {message}")]
    Malformed { message: String },

    /// Backup file exists but could not be read.
    #[error("failed to read backup file '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Backup file could not be written.
    #[error("failed to write backup file '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

#[cfg(test)]
mod tests;
