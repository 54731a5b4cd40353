// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment change notification.
//!
//! ```text
//! VariableStore mutation
//!        |
//!        v
//! Notifier::environment_changed(scopes)   best effort, bounded
//!    BroadcastNotifier  WM_SETTINGCHANGE "Environment" (Windows)
//!    CommandNotifier    [notify] command, ENVVAR_CHANGED_SCOPES
//!    NoopNotifier
//!        |
//!        v
//! Err(NotifyError) --> warn!, never returned to the caller
//! ```

pub mod command;

#[cfg(windows)]
pub mod broadcast;


use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::config::types::NotifyConfig;
use crate::store::Scope;

pub use command::CommandNotifier;

#[cfg(windows)]
pub use broadcast::BroadcastNotifier;

/// Default bound on how long a notification may block.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a notification did not complete.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The hook command line is empty.
    #[error("notification command is empty")]
    EmptyCommand,

    /// The hook program could not be found.
    #[error("notification command not found: '{program}'")]
    NotFound { program: String },

    /// The hook could not be started or awaited.
    #[error("failed to run notification command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The hook exited unsuccessfully.
    #[error("notification command '{command}' exited with {status}")]
    Failed { command: String, status: String },

    /// The notification did not finish in time.
    #[error("notification timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    /// The system broadcast failed.
    #[error("environment broadcast failed: {0}")]
    Broadcast(#[source] std::io::Error),
}

/// Tells other processes that persistent variables changed.
pub trait Notifier {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Announces a change to `scopes`.
    ///
    /// # Errors
    ///
    /// Returns a `NotifyError` when the announcement fails or times out.
    /// Callers log it and carry on.
    fn environment_changed(&self, scopes: &[Scope]) -> Result<(), NotifyError>;
}

/// Does nothing; used where no broadcast primitive exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn name(&self) -> &'static str {
        "none"
    }

    fn environment_changed(&self, scopes: &[Scope]) -> Result<(), NotifyError> {
        debug!(?scopes, "no change notifier configured");
        Ok(())
    }
}

/// Picks the notifier described by `config`.
///
/// A configured command wins over the platform broadcast.
///
/// # Errors
///
/// Returns [`NotifyError::EmptyCommand`] if `command` is set but blank.
pub fn from_config(config: &NotifyConfig) -> Result<Box<dyn Notifier>, NotifyError> {
    if !config.enabled {
        return Ok(Box::new(NoopNotifier));
    }

    let timeout = config.timeout();
    if !config.command.is_empty() {
        return Ok(Box::new(CommandNotifier::new(&config.command, timeout)?));
    }

    #[cfg(windows)]
    {
        Ok(Box::new(BroadcastNotifier::new(timeout)))
    }

    #[cfg(not(windows))]
    {
        Ok(Box::new(NoopNotifier))
    }
}
