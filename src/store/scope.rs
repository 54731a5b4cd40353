// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Storage scopes.
//!
//! ```text
//! Scope::User   --> per-user location   (HKCU\Environment, environment.d)
//! Scope::System --> machine location    (HKLM\...\Environment, /etc/environment)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One of the two independent environment-variable namespaces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Variables of the current user.
    #[default]
    User,
    /// Machine-wide variables; writing usually needs elevation.
    #[value(alias = "machine")]
    System,
}

impl Scope {
    /// Both scopes, in restore order.
    pub const ALL: [Self; 2] = [Self::User, Self::System];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scope {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "system" | "machine" => Ok(Self::System),
            _ => Err(ConfigError::InvalidValue {
                section: "store".to_string(),
                key: "scope".to_string(),
                message: format!("expected 'user' or 'system', got '{s}'"),
            }),
        }
    }
}
