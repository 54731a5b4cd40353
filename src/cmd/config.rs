// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for envvar-rs.

use std::io::Write;

use crate::config::Config;
use crate::error::Result;

/// Display current configuration options.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn run_options_command<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    for line in config.format_options() {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

/// Display loaded configuration files.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn run_configs_command<W: Write>(config_files: &[String], out: &mut W) -> Result<()> {
    if config_files.is_empty() {
        writeln!(out, "No configuration files loaded")?;
    } else {
        for line in config_files {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}
