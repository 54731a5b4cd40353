// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envvar-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. user envvar.toml (config dir)
//! 3. local envvar.toml (cwd)
//! 4. --config
//! 5. ENVVAR_* env vars
//! 6. --set and CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVVAR_STORE__BACKEND=memory        → store.backend = "memory"
//! ENVVAR_GLOBAL__OUTPUT_LOG_LEVEL=4   → global.output_log_level = 4
//! ENVVAR_NOTIFY__COMMAND="sh hook.sh" → notify.command = ["sh", "hook.sh"]
//! ```
//!
//! # Example
//!
//! ```toml
//! [store]
//! backend = "file"
//! user_file = "~/.config/environment.d/50-envvar.conf"
//!
//! [notify]
//! command = ["systemctl", "--user", "import-environment"]
//! timeout_ms = 2000
//! ```

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, EnvError, EnvResult, Result};

use loader::ConfigLoader;
use types::{BackupConfig, GlobalConfig, NotifyConfig, StoreConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Variable store options.
    pub store: StoreConfig,
    /// Change notification options.
    pub notify: NotifyConfig,
    /// Backup file options.
    pub backup: BackupConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envvar_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("envvar.toml")
    ///     .with_env_prefix("ENVVAR")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Fill in default store paths and validate values.
    ///
    /// # Errors
    ///
    /// Returns an error if a store path has no default on this platform or
    /// the notification timeout is zero.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.store.backend.uses_files() {
            self.store.resolve()?;
        }
        if self.notify.timeout_ms == 0 {
            return Err(EnvError::from(ConfigError::InvalidValue {
                section: "notify".to_string(),
                key: "timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            })
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_store_options(&mut options);
        self.format_notify_options(&mut options);
        options.insert("backup.pretty".into(), self.backup.pretty.to_string());

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(self.global.log_file.as_ref()));
        options.insert(
            "global.log_format".into(),
            self.global.log_format.to_string(),
        );
    }

    fn format_store_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("store.backend".into(), self.store.backend.to_string());
        options.insert("store.user_file".into(), fmt_path(self.store.user_file.as_ref()));
        options.insert(
            "store.system_file".into(),
            fmt_path(self.store.system_file.as_ref()),
        );
        options.insert(
            "store.user_read_only".into(),
            self.store.user_read_only.to_string(),
        );
        options.insert(
            "store.system_read_only".into(),
            self.store.system_read_only.to_string(),
        );
    }

    fn format_notify_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("notify.enabled".into(), self.notify.enabled.to_string());
        options.insert(
            "notify.timeout_ms".into(),
            self.notify.timeout_ms.to_string(),
        );
        options.insert("notify.command".into(), self.notify.command.join(" "));
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}

/// Splits a `section/key=value` override into a dotted key and its value.
///
/// `section.key=value` is accepted as well.
///
/// # Errors
///
/// Returns a `ConfigError::InvalidValue` if there is no `=`, or the key has
/// no section or an empty part.
pub fn parse_override(raw: &str) -> EnvResult<(String, String)> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        section: "set".to_string(),
        key: raw.to_string(),
        message: message.to_string(),
    };

    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| invalid("expected section/key=value"))?;
    let key = key.trim().replace('/', ".");
    let mut parts = key.split('.');
    let section = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();
    if section.is_empty() || rest.is_empty() || rest.iter().any(|p| p.is_empty()) {
        return Err(invalid("expected section/key=value").into());
    }

    Ok((key.to_lowercase(), value.trim().to_string()))
}
