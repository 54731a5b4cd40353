// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Variable entries and name handling.
//!
//! ```text
//! EnvVarEntry { Name, Value }      serialized PascalCase (backup format)
//! EnvKey: case-insensitive (PATH == Path == path)
//! validate_name(): trim, reject empty / '=' / NUL / line breaks
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{EnvResult, StoreError};

/// A single name/value pair within a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvVarEntry {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl EnvVarEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Compares two variable names case-insensitively.
///
/// Letters fold to upper case, so `_` sorts after them.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_uppercase())
        .cmp(b.bytes().map(|c| c.to_ascii_uppercase()))
}

/// Sorts entries by name, case-insensitive ascending.
pub fn sort_entries(entries: &mut [EnvVarEntry]) {
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
}

/// Trims `name` and checks that a store can hold it.
///
/// # Errors
///
/// Returns [`StoreError::EmptyName`] for empty or whitespace-only names and
/// [`StoreError::InvalidName`] for names containing `=`, NUL or a line
/// break.
pub fn validate_name(name: &str) -> EnvResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyName.into());
    }
    if trimmed.contains('=') {
        return Err(StoreError::InvalidName {
            name: trimmed.to_string(),
            reason: "contains '='",
        }
        .into());
    }
    if trimmed.contains('\0') {
        return Err(StoreError::InvalidName {
            name: trimmed.to_string(),
            reason: "contains a NUL character",
        }
        .into());
    }
    if trimmed.contains(['\n', '\r']) {
        return Err(StoreError::InvalidName {
            name: trimmed.escape_debug().to_string(),
            reason: "contains a line break",
        }
        .into());
    }
    Ok(trimmed)
}

/// A case-insensitive variable name key.
#[derive(Debug, Clone, Eq)]
pub(crate) struct EnvKey(String);

impl EnvKey {
    pub(crate) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_names(&self.0, &other.0)
    }
}
