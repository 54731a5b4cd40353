// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backup and restore commands for envvar-rs.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Local};
use tracing::debug;

use crate::backup::default_file_name;
use crate::cli::backup::{BackupArgs, RestoreArgs};
use crate::error::Result;
use crate::service::EnvService;

/// Writes both scopes to the given path, or a timestamped file in the cwd.
///
/// # Errors
///
/// Returns an error if a scope cannot be read or the file cannot be written.
pub fn run_backup_command<W: Write>(
    args: &BackupArgs,
    service: &EnvService,
    out: &mut W,
    now: &DateTime<Local>,
) -> Result<()> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_file_name(now)));

    let backup = service.backup(&path)?;
    writeln!(
        out,
        "Backed up {} user and {} system variables to {}",
        backup.user_variables.len(),
        backup.system_variables.len(),
        path.display()
    )?;
    Ok(())
}

/// Replaces both scopes from a backup file after confirmation.
///
/// # Errors
///
/// Returns an error if the prompt fails, the file is missing or malformed,
/// or a scope is not writable.
pub fn run_restore_command<W, F>(
    args: &RestoreArgs,
    service: &EnvService,
    out: &mut W,
    confirm: F,
) -> Result<()>
where
    W: Write,
    F: FnOnce(&str) -> io::Result<bool>,
{
    if !args.yes {
        let question = format!(
            "Replace all user and system variables with {}?",
            args.path.display()
        );
        if !confirm(&question).context("failed to read confirmation")? {
            debug!(path = %args.path.display(), "restore cancelled");
            writeln!(out, "Cancelled")?;
            return Ok(());
        }
    }

    let backup = service.restore(&args.path)?;
    writeln!(
        out,
        "Restored {} user and {} system variables from {} (created {})",
        backup.user_variables.len(),
        backup.system_variables.len(),
        args.path.display(),
        backup.created_at.to_rfc3339()
    )?;
    Ok(())
}
