// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> EnvService --> Command Dispatch
//!   List | Get | Set | Unset | Backup | Restore | Options | Configs
//! ```

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use envvar_rs::cli::{self, Command};
use envvar_rs::cmd::backup::{run_backup_command, run_restore_command};
use envvar_rs::cmd::config::{run_configs_command, run_options_command};
use envvar_rs::cmd::prompt::confirm;
use envvar_rs::cmd::vars::{run_get_command, run_list_command, run_set_command, run_unset_command};
use envvar_rs::config::Config;
use envvar_rs::config::types::GlobalConfig;
use envvar_rs::logging::{LogConfig, init_logging};
use envvar_rs::service::EnvService;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        }
        Some(_) => {}
    }

    let (config, config_files) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, &config, &config_files) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_file_format(global.log_format)
        .build()
}

fn dispatch_command(
    cli: &cli::Cli,
    config: &Config,
    config_files: &[String],
) -> envvar_rs::error::Result<()> {
    let mut out = io::stdout().lock();

    match &cli.command {
        Some(Command::Options) => run_options_command(config, &mut out),
        Some(Command::Configs) => run_configs_command(config_files, &mut out),
        Some(Command::List(args)) => run_list_command(args, &open_service(config)?, &mut out),
        Some(Command::Get(args)) => run_get_command(args, &open_service(config)?, &mut out),
        Some(Command::Set(args)) => run_set_command(args, &open_service(config)?, &mut out),
        Some(Command::Unset(args)) => {
            run_unset_command(args, &open_service(config)?, &mut out, confirm)
        }
        Some(Command::Backup(args)) => run_backup_command(
            args,
            &open_service(config)?,
            &mut out,
            &chrono::Local::now(),
        ),
        Some(Command::Restore(args)) => {
            run_restore_command(args, &open_service(config)?, &mut out, confirm)
        }
        Some(Command::Version) | None => Ok(()),
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn open_service(config: &Config) -> envvar_rs::error::Result<EnvService> {
    EnvService::from_config(config).context("failed to open the variable store")
}

fn load_config(cli: &cli::Cli) -> envvar_rs::error::Result<(Config, Vec<String>)> {
    let loader = cli.global.config_loader()?;
    let files = loader.format_loaded_files();
    let config = loader.build()?;
    Ok((config, files))
}
