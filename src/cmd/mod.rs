// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> EnvService
//!   vars (list, get, set, unset), backup (backup, restore), config
//! ```
//!
//! Handlers write to the `out` they are given; prompts go through the
//! `confirm` callback so tests can answer them.

pub mod backup;
pub mod config;
pub mod prompt;
pub mod vars;
