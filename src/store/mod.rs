// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent variable store.
//!
//! # Architecture
//!
//! ```text
//! VariableStore
//!   backend:  Box<dyn EnvBackend>   (registry | file | memory)
//!   notifier: Box<dyn Notifier>     (broadcast | command | none)
//!
//! list(scope)           open(Read)  --> entries, sorted A..z
//! set(name, value, s)   validate --> open(Write) --> set --> flush --> notify
//! delete(name, s)       blank name = no-op --> open(Write) --> remove --> notify
//! restore(backup)       validate all --> user: clear+write --> system: clear+write
//!                       no rollback if system fails after user
//! ```
//!
//! - **Case-insensitive names**: `Path` and `PATH` are the same variable
//! - **One handle per operation**: released on drop, on every exit path
//! - **Last writer wins**: no locking against other processes

pub mod backend;
pub mod entry;
pub mod envfile;
pub mod file;
pub mod memory;
#[cfg(windows)]
pub mod registry;
pub mod scope;


use tracing::{debug, info, warn};

use crate::backup::EnvBackup;
use crate::config::types::{BackendKind, StoreConfig};
use crate::error::{EnvResult, StoreError};
use crate::notify::{NoopNotifier, Notifier};

pub use backend::{Access, EnvBackend, ScopeKey};
pub use entry::{EnvVarEntry, compare_names, sort_entries, validate_name};
pub use file::FileBackend;
pub use memory::MemoryBackend;
#[cfg(windows)]
pub use registry::RegistryBackend;
pub use scope::Scope;

/// Builds the backend selected by `config`.
///
/// `config` must already be resolved so file paths are set.
///
/// # Errors
///
/// Returns a `ConfigError::MissingKey` if a file backend is selected and a
/// scope path is missing.
pub fn open_backend(config: &StoreConfig) -> EnvResult<Box<dyn EnvBackend>> {
    match config.backend {
        #[cfg(windows)]
        BackendKind::Native => Ok(Box::new(RegistryBackend)),
        #[cfg(not(windows))]
        BackendKind::Native => file_backend(config),
        BackendKind::File => file_backend(config),
        BackendKind::Memory => {
            let mut backend = MemoryBackend::new();
            if config.user_read_only {
                backend = backend.with_read_only(Scope::User);
            }
            if config.system_read_only {
                backend = backend.with_read_only(Scope::System);
            }
            Ok(Box::new(backend))
        }
    }
}

fn file_backend(config: &StoreConfig) -> EnvResult<Box<dyn EnvBackend>> {
    let user = config.user_file()?;
    let system = config.system_file()?;
    Ok(Box::new(
        FileBackend::new(user, system)
            .with_read_only(Scope::User, config.user_read_only)
            .with_read_only(Scope::System, config.system_read_only),
    ))
}

/// Lists, edits and restores variables over a backend.
pub struct VariableStore {
    backend: Box<dyn EnvBackend>,
    notifier: Box<dyn Notifier>,
}

impl std::fmt::Debug for VariableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableStore")
            .field("backend", &self.backend.name())
            .field("notifier", &self.notifier.name())
            .finish()
    }
}

impl VariableStore {
    /// Creates a store that does not notify.
    pub fn new(backend: impl EnvBackend + 'static) -> Self {
        Self::from_parts(Box::new(backend), Box::new(NoopNotifier))
    }

    /// Creates a store from boxed parts.
    #[must_use]
    pub fn from_parts(backend: Box<dyn EnvBackend>, notifier: Box<dyn Notifier>) -> Self {
        Self { backend, notifier }
    }

    /// Replaces the change notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Name of the active backend.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Name of the active notifier.
    #[must_use]
    pub fn notifier_name(&self) -> &'static str {
        self.notifier.name()
    }

    /// Lists `scope`, sorted by name case-insensitively.
    ///
    /// An absent scope location yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the location exists but cannot be read.
    pub fn list(&self, scope: Scope) -> EnvResult<Vec<EnvVarEntry>> {
        let Some(key) = self.backend.open(scope, Access::Read)? else {
            debug!(scope = %scope, "scope location absent");
            return Ok(Vec::new());
        };

        let mut entries = key.entries()?;
        sort_entries(&mut entries);
        debug!(scope = %scope, count = entries.len(), location = %key.location(), "listed");
        Ok(entries)
    }

    /// Looks up `name` in `scope`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the location exists but cannot be read.
    pub fn get(&self, name: &str, scope: Scope) -> EnvResult<Option<EnvVarEntry>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        Ok(self
            .list(scope)?
            .into_iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name)))
    }

    /// Creates or overwrites `name` in `scope`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyName`/`InvalidName` before touching storage
    /// if the name is unusable, `StoreError::Unavailable` if the scope cannot
    /// be opened for writing, or `StoreError::Io` if the write fails.
    pub fn set(&self, name: &str, value: &str, scope: Scope) -> EnvResult<()> {
        let name = validate_name(name)?;
        self.backend.check_name(name)?;

        {
            let mut key = self.open_writable(scope)?;
            key.set(name, value)?;
            key.flush()?;
        }

        info!(scope = %scope, name, "variable set");
        self.notify(&[scope]);
        Ok(())
    }

    /// Removes `name` from `scope`.
    ///
    /// A blank or absent name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the scope cannot be opened for
    /// writing, or `StoreError::Io` if the removal fails.
    pub fn delete(&self, name: &str, scope: Scope) -> EnvResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }

        let removed = {
            let mut key = self.open_writable(scope)?;
            let removed = key.remove(name)?;
            key.flush()?;
            removed
        };

        if removed {
            info!(scope = %scope, name, "variable deleted");
            self.notify(&[scope]);
        } else {
            debug!(scope = %scope, name, "variable not present, nothing deleted");
        }
        Ok(())
    }

    /// Replaces both scopes with the contents of `backup`, user first.
    ///
    /// Entry names are validated before anything is written. If the system
    /// scope fails after the user scope was replaced, the user scope is not
    /// rolled back.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyName`/`InvalidName` if the backup holds an
    /// unusable name, `StoreError::Unavailable` if a scope cannot be opened
    /// for writing, or `StoreError::Io` if a write fails.
    pub fn restore(&self, backup: &EnvBackup) -> EnvResult<()> {
        for scope in Scope::ALL {
            for entry in backup.entries(scope) {
                let name = validate_name(&entry.name)?;
                self.backend.check_name(name)?;
            }
        }

        let mut replaced = Vec::with_capacity(Scope::ALL.len());
        for scope in Scope::ALL {
            if let Err(e) = self.replace_scope(scope, backup.entries(scope)) {
                if !replaced.is_empty() {
                    warn!(
                        failed = %scope,
                        replaced = ?replaced,
                        "restore stopped part way, earlier scopes keep the restored contents"
                    );
                    self.notify(&replaced);
                }
                return Err(e);
            }
            replaced.push(scope);
        }

        info!(
            user = backup.user_variables.len(),
            system = backup.system_variables.len(),
            "restored both scopes"
        );
        self.notify(&replaced);
        Ok(())
    }

    /// Captures both scopes into a new backup stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if either scope cannot be listed.
    pub fn snapshot(&self) -> EnvResult<EnvBackup> {
        Ok(EnvBackup::new(
            self.list(Scope::User)?,
            self.list(Scope::System)?,
        ))
    }

    fn replace_scope(&self, scope: Scope, entries: &[EnvVarEntry]) -> EnvResult<()> {
        let mut key = self.open_writable(scope)?;
        key.clear()?;
        for entry in entries {
            key.set(entry.name.trim(), &entry.value)?;
        }
        key.flush()?;
        debug!(scope = %scope, count = entries.len(), location = %key.location(), "scope replaced");
        Ok(())
    }

    fn open_writable(&self, scope: Scope) -> EnvResult<Box<dyn ScopeKey + '_>> {
        self.backend
            .open(scope, Access::Write)?
            .ok_or_else(|| StoreError::unavailable(scope, "location does not exist").into())
    }

    fn notify(&self, scopes: &[Scope]) {
        if let Err(e) = self.notifier.environment_changed(scopes) {
            warn!(notifier = self.notifier.name(), error = %e, "environment change notification failed");
        }
    }
}
