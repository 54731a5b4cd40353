// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity
//! --log-file FILE   ← global.log_file override
//! --backend KIND    ← store.backend override
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: CLI flags > --set > ENVVAR_* > --config > envvar.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::config::paths::{CONFIG_FILE_NAME, default_config_file};
use crate::config::types::BackendKind;
use crate::error::Result;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ENVVAR";

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Storage backend for both scopes.
    #[arg(long = "backend", value_name = "KIND", value_enum)]
    pub backend: Option<BackendKind>,

    /// Sets an option, such as 'store/user_read_only=true'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables auto loading of envvar.toml files, only uses --config.
    #[arg(long = "no-default-configs")]
    pub no_default_configs: bool,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    ///
    /// Explicit flags come after `--set` so they win.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global/output_log_level={level}"));
        }

        if let Some(level) = self.file_log_level {
            overrides.push(format!("global/file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global/log_file={}", path.display()));
        }

        if let Some(backend) = self.backend {
            overrides.push(format!("store/backend={backend}"));
        }

        overrides
    }

    /// Builds a loader over every configuration source, lowest priority first.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is not of the form `section/key=value`.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new();
        if !self.no_default_configs {
            if let Some(user_config) = default_config_file() {
                loader = loader.add_toml_file_optional(user_config);
            }
            loader = loader.add_toml_file_optional(CONFIG_FILE_NAME);
        }
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        loader
            .with_env_prefix(ENV_PREFIX)
            .with_overrides(&self.to_config_overrides())
    }
}
