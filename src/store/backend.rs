// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scope key resolution.
//!
//! ```text
//! EnvBackend::open(scope, access) --> Option<Box<dyn ScopeKey>>
//!    RegistryBackend  HKCU / HKLM (Windows)
//!    FileBackend      KEY=VALUE files
//!    MemoryBackend    in-process maps
//!
//! EnvBackend::check_name(name): names the format cannot hold
//! ScopeKey: names / entries / set / remove / clear / flush
//!           released on drop
//! ```

use crate::error::EnvResult;

use super::{EnvVarEntry, Scope};

/// Requested access when opening a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

/// Maps a [`Scope`] to an open storage handle.
pub trait EnvBackend {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Opens the location behind `scope`.
    ///
    /// Returns `Ok(None)` when the location does not exist. Opening never
    /// modifies the location.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError::Unavailable` when the location exists but
    /// cannot be opened with `access`, or a `StoreError::Io` on other
    /// failures.
    fn open(&self, scope: Scope, access: Access) -> EnvResult<Option<Box<dyn ScopeKey + '_>>>;

    /// Rejects names this backend cannot store and read back unchanged.
    ///
    /// Called after [`validate_name`](super::validate_name) and before the
    /// scope is opened.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError::InvalidName` for an unrepresentable name.
    fn check_name(&self, name: &str) -> EnvResult<()> {
        let _ = name;
        Ok(())
    }
}

/// An open scope location.
///
/// The handle is held for one logical operation and released when dropped.
pub trait ScopeKey {
    /// Human-readable location (registry path or file path).
    fn location(&self) -> String;

    /// Every stored name, including values [`entries`](Self::entries)
    /// skips.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError::Io` if the location cannot be enumerated.
    fn names(&self) -> EnvResult<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|entry| entry.name).collect())
    }

    /// All entries in storage order.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError::Io` if the location cannot be enumerated.
    fn entries(&self) -> EnvResult<Vec<EnvVarEntry>>;

    /// Creates or overwrites `name`.
    ///
    /// An existing entry whose name differs only in case keeps its stored
    /// spelling.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the value cannot be written.
    fn set(&mut self, name: &str, value: &str) -> EnvResult<()>;

    /// Removes `name`, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the value exists but cannot be removed.
    fn remove(&mut self, name: &str) -> EnvResult<bool>;

    /// Removes every name returned by [`names`](Self::names).
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if any entry cannot be removed.
    fn clear(&mut self) -> EnvResult<()> {
        for name in self.names()? {
            self.remove(&name)?;
        }
        Ok(())
    }

    /// Persists buffered changes. Backends that write through do nothing.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the changes cannot be persisted.
    fn flush(&mut self) -> EnvResult<()> {
        Ok(())
    }
}
