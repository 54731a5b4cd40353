// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Variable commands.
//!
//! ```text
//! list  [-S user|system] [--all]
//! get   NAME  [-S scope]
//! set   NAME VALUE [-S scope]
//! unset NAME  [-S scope] [-y]
//! ```

use clap::Args;

use crate::store::Scope;

/// Arguments for the `list` command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Scope to list.
    #[arg(short = 'S', long, value_enum, default_value_t = Scope::User, conflicts_with = "all")]
    pub scope: Scope,

    /// Lists both scopes, each under a `[scope]` header.
    #[arg(short = 'a', long)]
    pub all: bool,
}

impl ListArgs {
    /// Scopes to print, in order.
    #[must_use]
    pub fn scopes(&self) -> Vec<Scope> {
        if self.all {
            Scope::ALL.to_vec()
        } else {
            vec![self.scope]
        }
    }
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Variable name (case-insensitive).
    pub name: String,

    /// Scope to read.
    #[arg(short = 'S', long, value_enum, default_value_t = Scope::User)]
    pub scope: Scope,
}

/// Arguments for the `set` command.
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    /// Variable name.
    pub name: String,

    /// New value; may be empty.
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Scope to write.
    #[arg(short = 'S', long, value_enum, default_value_t = Scope::User)]
    pub scope: Scope,
}

/// Arguments for the `unset` command.
#[derive(Debug, Clone, Args)]
pub struct UnsetArgs {
    /// Variable name.
    pub name: String,

    /// Scope to delete from.
    #[arg(short = 'S', long, value_enum, default_value_t = Scope::User)]
    pub scope: Scope,

    /// Skips the confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}
