// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hook command notifier.
//!
//! ```text
//! which(program) --> spawn (stdio null, ENVVAR_CHANGED_SCOPES=user,system)
//!                --> timeout(wait) --> kill on expiry
//! ```
//!
//! Runs on a throwaway current-thread runtime so the store stays synchronous.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, trace};

use super::{NotifyError, Notifier};
use crate::store::Scope;

/// Environment variable that carries the changed scopes to the hook.
pub const CHANGED_SCOPES_VAR: &str = "ENVVAR_CHANGED_SCOPES";

/// Runs a user-configured command after every change.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandNotifier {
    /// Creates a notifier from an argv list.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::EmptyCommand`] if `argv` is empty or its first
    /// element is blank.
    pub fn new(argv: &[String], timeout: Duration) -> Result<Self, NotifyError> {
        let (program, args) = argv.split_first().ok_or(NotifyError::EmptyCommand)?;
        if program.trim().is_empty() {
            return Err(NotifyError::EmptyCommand);
        }
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn resolve_program(&self) -> Result<PathBuf, NotifyError> {
        which::which(&self.program).map_err(|_| NotifyError::NotFound {
            program: self.program.clone(),
        })
    }

    async fn run(&self, program: PathBuf, scopes: String) -> Result<(), NotifyError> {
        let command_line = self.command_line();
        let spawn_error = |source| NotifyError::Spawn {
            command: command_line.clone(),
            source,
        };

        let mut child = Command::new(&program)
            .args(&self.args)
            .env(CHANGED_SCOPES_VAR, scopes)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;
        trace!(command = %command_line, pid = ?child.id(), "notification hook spawned");

        match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(NotifyError::Failed {
                command: command_line.clone(),
                status: status.to_string(),
            }),
            Ok(Err(source)) => Err(spawn_error(source)),
            Err(_) => {
                let _ = child.kill().await;
                Err(NotifyError::Timeout {
                    timeout: self.timeout,
                })
            }
        }
    }
}

impl Notifier for CommandNotifier {
    fn name(&self) -> &'static str {
        "command"
    }

    fn environment_changed(&self, scopes: &[Scope]) -> Result<(), NotifyError> {
        let program = self.resolve_program()?;
        let scopes = scopes
            .iter()
            .map(Scope::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| NotifyError::Spawn {
                command: self.command_line(),
                source,
            })?;

        debug!(command = %self.command_line(), %scopes, "running notification hook");
        runtime.block_on(self.run(program, scopes))
    }
}
