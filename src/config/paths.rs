// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Default file locations.
//!
//! ```text
//!              Linux / macOS                         Windows
//! config       $XDG_CONFIG_HOME/envvar/envvar.toml   %APPDATA%\envvar\envvar.toml
//! user scope   $XDG_CONFIG_HOME/environment.d/       %APPDATA%\envvar\user.env
//!                50-envvar.conf
//! system scope /etc/environment                      %ProgramData%\envvar\system.env
//! ```
//!
//! Store paths are only filled in when a file backend is selected, and
//! relative paths are taken as relative to the working directory.

use std::path::{Path, PathBuf};

use super::types::StoreConfig;
use crate::error::{ConfigError, EnvResult};

/// Name of the configuration file looked up in the config dir and the cwd.
pub const CONFIG_FILE_NAME: &str = "envvar.toml";

/// Per-user configuration file, if the platform has a config dir.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("envvar").join(CONFIG_FILE_NAME))
}

/// Default user scope file.
#[must_use]
pub fn default_user_file() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    if cfg!(windows) {
        Some(config_dir.join("envvar").join("user.env"))
    } else {
        Some(config_dir.join("environment.d").join("50-envvar.conf"))
    }
}

/// Default system scope file.
#[must_use]
pub fn default_system_file() -> Option<PathBuf> {
    if cfg!(windows) {
        std::env::var_os("ProgramData")
            .map(|dir| Path::new(&dir).join("envvar").join("system.env"))
    } else {
        Some(PathBuf::from("/etc/environment"))
    }
}

fn missing(key: &str) -> ConfigError {
    ConfigError::MissingKey {
        section: "store".to_string(),
        key: key.to_string(),
    }
}

impl StoreConfig {
    /// Fills unset scope files with platform defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if a path is unset and the
    /// platform has no default for it.
    pub fn resolve(&mut self) -> EnvResult<()> {
        if self.user_file.is_none() {
            self.user_file = Some(default_user_file().ok_or_else(|| missing("user_file"))?);
        }
        if self.system_file.is_none() {
            self.system_file = Some(default_system_file().ok_or_else(|| missing("system_file"))?);
        }
        Ok(())
    }

    /// User scope file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the path is not set.
    pub fn user_file(&self) -> EnvResult<&Path> {
        Ok(self.user_file.as_deref().ok_or_else(|| missing("user_file"))?)
    }

    /// System scope file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the path is not set.
    pub fn system_file(&self) -> EnvResult<&Path> {
        Ok(self
            .system_file
            .as_deref()
            .ok_or_else(|| missing("system_file"))?)
    }
}
