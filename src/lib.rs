// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          vars / backup / config
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          service          |
//!              |   list, edit, backup...   |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               store       backup   notify
//!             scopes,       JSON     broadcast /
//!             backends      codec    hook command
//!                 |
//!        +--------+--------+
//!        v        v        v
//!    registry    file    memory
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, config    |
//!   +-----------------------------------------+
//! ```

pub mod backup;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod service;
pub mod store;
