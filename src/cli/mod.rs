// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envvar-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envvar [global options] <command>
//! list [-S scope] [--all]
//! get NAME
//! set NAME VALUE
//! unset NAME [-y]
//! backup [PATH]
//! restore PATH [-y]
//! options
//! configs
//! version
//! ```

pub mod backup;
pub mod global;
pub mod vars;


use crate::cli::backup::{BackupArgs, RestoreArgs};
use crate::cli::global::GlobalOptions;
use crate::cli::vars::{GetArgs, ListArgs, SetArgs, UnsetArgs};
use clap::{Parser, Subcommand};

/// Persistent Environment Variable Manager
///
/// Views and edits per-user and system-wide persistent environment
/// variables, and backs them up to JSON.
#[derive(Debug, Parser)]
#[command(
    name = "envvar",
    author,
    version,
    about = "Persistent Environment Variable Manager",
    long_about = "envvar-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Views and edits the persistent environment variables of the\n\
                  current user (`-S user`, the default) and of the machine\n\
                  (`-S system`). Changes are picked up by processes started\n\
                  afterwards. `envvar backup` saves both scopes to a JSON file\n\
                  that `envvar restore` puts back exactly.",
    after_help = "CONFIG FILES:\n\n\
                  envvar reads `envvar/envvar.toml` from the user config directory,\n\
                  then `envvar.toml` from the current directory; the second\n\
                  overrides the first. Files given with --config are loaded after\n\
                  those, then ENVVAR_SECTION__KEY environment variables, then\n\
                  --set and the other flags. Use --no-default-configs to only\n\
                  use --config."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the config files used by envvar.
    Configs,

    /// Prints the variables of a scope as NAME=VALUE lines.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Prints the value of one variable.
    Get(GetArgs),

    /// Creates a variable or changes its value.
    Set(SetArgs),

    /// Deletes a variable.
    #[command(visible_alias = "rm")]
    Unset(UnsetArgs),

    /// Saves both scopes to a JSON file.
    Backup(BackupArgs),

    /// Replaces both scopes with the contents of a backup file.
    Restore(RestoreArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
