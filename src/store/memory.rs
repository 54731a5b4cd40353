// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process backend.
//!
//! Nothing is persisted. Used by tests and by front ends that want to stage
//! changes. An open key holds the backend lock until it is dropped.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{EnvResult, StoreError};

use super::backend::{Access, EnvBackend, ScopeKey};
use super::entry::EnvKey;
use super::{EnvVarEntry, Scope};

#[derive(Debug, Default)]
struct ScopeState {
    vars: Option<BTreeMap<EnvKey, String>>,
    read_only: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    user: ScopeState,
    system: ScopeState,
    opens: usize,
}

impl MemoryState {
    const fn scope_mut(&mut self, scope: Scope) -> &mut ScopeState {
        match scope {
            Scope::User => &mut self.user,
            Scope::System => &mut self.system,
        }
    }
}

/// Keeps both scopes in memory.
#[derive(Debug)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Both scopes present and empty.
    #[must_use]
    pub fn new() -> Self {
        let mut state = MemoryState::default();
        state.user.vars = Some(BTreeMap::new());
        state.system.vars = Some(BTreeMap::new());
        Self {
            state: Mutex::new(state),
        }
    }

    /// Seeds `scope` with variables.
    #[must_use]
    pub fn with_vars<I, K, V>(self, scope: Scope, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        {
            let mut state = self.lock();
            let map = state.scope_mut(scope).vars.get_or_insert_with(BTreeMap::new);
            for (name, value) in vars {
                map.insert(EnvKey::new(name), value.into());
            }
        }
        self
    }

    /// Refuses write access to `scope`.
    #[must_use]
    pub fn with_read_only(self, scope: Scope) -> Self {
        self.lock().scope_mut(scope).read_only = true;
        self
    }

    /// Makes `scope` absent, as if its location did not exist.
    #[must_use]
    pub fn without_scope(self, scope: Scope) -> Self {
        self.lock().scope_mut(scope).vars = None;
        self
    }

    /// How many times a scope has been opened.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.lock().opens
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EnvBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn open(&self, scope: Scope, access: Access) -> EnvResult<Option<Box<dyn ScopeKey + '_>>> {
        let mut guard = self.lock();
        guard.opens += 1;

        let state = guard.scope_mut(scope);
        if access.is_write() && state.read_only {
            return Err(StoreError::unavailable(scope, "scope is read-only").into());
        }
        if state.vars.is_none() {
            if !access.is_write() {
                return Ok(None);
            }
            state.vars = Some(BTreeMap::new());
        }

        Ok(Some(Box::new(MemoryKey { guard, scope })))
    }
}

struct MemoryKey<'a> {
    guard: MutexGuard<'a, MemoryState>,
    scope: Scope,
}

impl MemoryKey<'_> {
    fn vars(&self) -> &BTreeMap<EnvKey, String> {
        let state = match self.scope {
            Scope::User => &self.guard.user,
            Scope::System => &self.guard.system,
        };
        state.vars.as_ref().unwrap_or(&EMPTY)
    }

    fn vars_mut(&mut self) -> &mut BTreeMap<EnvKey, String> {
        self.guard
            .scope_mut(self.scope)
            .vars
            .get_or_insert_with(BTreeMap::new)
    }
}

static EMPTY: BTreeMap<EnvKey, String> = BTreeMap::new();

impl ScopeKey for MemoryKey<'_> {
    fn location(&self) -> String {
        format!("memory:{}", self.scope)
    }

    fn entries(&self) -> EnvResult<Vec<EnvVarEntry>> {
        Ok(self
            .vars()
            .iter()
            .map(|(name, value)| EnvVarEntry::new(name.as_str(), value.clone()))
            .collect())
    }

    fn set(&mut self, name: &str, value: &str) -> EnvResult<()> {
        self.vars_mut().insert(EnvKey::new(name), value.to_string());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> EnvResult<bool> {
        Ok(self.vars_mut().remove(&EnvKey::new(name)).is_some())
    }

    fn clear(&mut self) -> EnvResult<()> {
        self.vars_mut().clear();
        Ok(())
    }
}
