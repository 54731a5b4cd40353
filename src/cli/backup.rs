// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backup commands.
//!
//! ```text
//! backup  [PATH]       default: ./env_backup_YYYYMMDD_HHMMSS.json
//! restore PATH [-y]
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `backup` command.
#[derive(Debug, Clone, Args)]
pub struct BackupArgs {
    /// Destination file; replaced if it exists.
    pub path: Option<PathBuf>,
}

/// Arguments for the `restore` command.
#[derive(Debug, Clone, Args)]
pub struct RestoreArgs {
    /// Backup file to restore from.
    pub path: PathBuf,

    /// Skips the confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}
