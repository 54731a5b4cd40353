// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Variable commands for envvar-rs.

use std::io::{self, Write};

use anyhow::{Context, bail};
use tracing::debug;

use crate::cli::vars::{GetArgs, ListArgs, SetArgs, UnsetArgs};
use crate::error::Result;
use crate::service::EnvService;

/// Prints `NAME=VALUE` lines for the selected scopes.
///
/// # Errors
///
/// Returns an error if a scope cannot be read or output fails.
pub fn run_list_command<W: Write>(args: &ListArgs, service: &EnvService, out: &mut W) -> Result<()> {
    let scopes = args.scopes();
    let headers = scopes.len() > 1;

    for (i, scope) in scopes.into_iter().enumerate() {
        let entries = service
            .list_variables(scope)
            .with_context(|| format!("failed to list {scope} variables"))?;
        if headers {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "[{scope}]")?;
        }
        for entry in entries {
            writeln!(out, "{}={}", entry.name, entry.value)?;
        }
    }
    Ok(())
}

/// Prints the value of one variable.
///
/// # Errors
///
/// Returns an error if the variable does not exist in the scope.
pub fn run_get_command<W: Write>(args: &GetArgs, service: &EnvService, out: &mut W) -> Result<()> {
    match service.get_variable(&args.name, args.scope)? {
        Some(entry) => {
            writeln!(out, "{}", entry.value)?;
            Ok(())
        }
        None => bail!("{} is not set in the {} scope", args.name.trim(), args.scope),
    }
}

/// Creates or overwrites a variable.
///
/// # Errors
///
/// Returns an error if the name is invalid or the scope is not writable.
pub fn run_set_command<W: Write>(args: &SetArgs, service: &EnvService, out: &mut W) -> Result<()> {
    service.add_or_edit_variable(&args.name, &args.value, args.scope)?;
    writeln!(out, "Set {} in the {} scope", args.name.trim(), args.scope)?;
    Ok(())
}

/// Deletes a variable after confirmation.
///
/// # Errors
///
/// Returns an error if the prompt fails or the scope is not writable.
pub fn run_unset_command<W, F>(
    args: &UnsetArgs,
    service: &EnvService,
    out: &mut W,
    confirm: F,
) -> Result<()>
where
    W: Write,
    F: FnOnce(&str) -> io::Result<bool>,
{
    let name = args.name.trim();
    if service.get_variable(name, args.scope)?.is_none() {
        writeln!(out, "{name} is not set in the {} scope", args.scope)?;
        return Ok(());
    }

    if !args.yes {
        let question = format!("Delete {name} from the {} scope?", args.scope);
        if !confirm(&question).context("failed to read confirmation")? {
            debug!(name, scope = %args.scope, "delete cancelled");
            writeln!(out, "Cancelled")?;
            return Ok(());
        }
    }

    service.delete_variable(name, args.scope)?;
    writeln!(out, "Deleted {name} from the {} scope", args.scope)?;
    Ok(())
}
