// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Front door for any presentation layer.
//!
//! ```text
//! list_variables(scope)              --> store.list
//! add_or_edit_variable(n, v, scope)  --> store.set
//! delete_variable(n, scope)          --> store.delete
//! backup(path)                       --> store.snapshot --> write_backup
//! restore(path)                      --> read_backup --> store.restore
//! ```
//!
//! Every error's `Display` is ready to show to a user as is.

#[cfg(test)]
mod tests;

use std::path::Path;

use tracing::info;

use crate::backup::{self, EnvBackup};
use crate::config::Config;
use crate::error::{ConfigError, EnvResult};
use crate::notify;
use crate::store::{self, EnvVarEntry, Scope, VariableStore};

/// Variable operations over one configured store.
#[derive(Debug)]
pub struct EnvService {
    store: VariableStore,
    pretty: bool,
}

impl EnvService {
    #[must_use]
    pub const fn new(store: VariableStore) -> Self {
        Self {
            store,
            pretty: true,
        }
    }

    /// Builds the backend and notifier described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a store path is missing or the notification
    /// command is unusable.
    pub fn from_config(config: &Config) -> EnvResult<Self> {
        let backend = store::open_backend(&config.store)?;
        let notifier = notify::from_config(&config.notify).map_err(|e| ConfigError::InvalidValue {
            section: "notify".to_string(),
            key: "command".to_string(),
            message: e.to_string(),
        })?;

        let store = VariableStore::from_parts(backend, notifier);
        info!(
            backend = store.backend_name(),
            notifier = store.notifier_name(),
            "variable store ready"
        );
        Ok(Self::new(store).with_pretty(config.backup.pretty))
    }

    /// Indent backup files (default) or write them compact.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &VariableStore {
        &self.store
    }

    /// Entries of `scope`, sorted by name case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the scope exists but cannot be read.
    pub fn list_variables(&self, scope: Scope) -> EnvResult<Vec<EnvVarEntry>> {
        self.store.list(scope)
    }

    /// Looks up one variable.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the scope exists but cannot be read.
    pub fn get_variable(&self, name: &str, scope: Scope) -> EnvResult<Option<EnvVarEntry>> {
        self.store.get(name, scope)
    }

    /// Creates `name` or replaces its value.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error for an unusable name and
    /// `StoreUnavailable` if the scope cannot be written.
    pub fn add_or_edit_variable(&self, name: &str, value: &str, scope: Scope) -> EnvResult<()> {
        self.store.set(name, value, scope)
    }

    /// Deletes `name`; a blank or absent name does nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the scope cannot be written.
    pub fn delete_variable(&self, name: &str, scope: Scope) -> EnvResult<()> {
        self.store.delete(name, scope)
    }

    /// Writes both scopes to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if a scope cannot be listed or a
    /// `BackupError::WriteFailed` if the file cannot be written.
    pub fn backup(&self, path: &Path) -> EnvResult<EnvBackup> {
        let snapshot = self.store.snapshot()?;
        backup::write_backup(path, &snapshot, self.pretty)?;
        info!(
            path = %path.display(),
            user = snapshot.user_variables.len(),
            system = snapshot.system_variables.len(),
            "backup created"
        );
        Ok(snapshot)
    }

    /// Replaces both scopes with the backup at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if `path` is missing, `MalformedBackup` if it
    /// does not decode, and `StoreUnavailable` if a scope cannot be written.
    pub fn restore(&self, path: &Path) -> EnvResult<EnvBackup> {
        let backup = backup::read_backup(path)?;
        self.store.restore(&backup)?;
        info!(path = %path.display(), created_at = %backup.created_at, "backup restored");
        Ok(backup)
    }
}
