// reword-rs: GitHub history rewrite tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   Fix | Bulk | History | Options | Version
//! ```

use std::process::ExitCode;

use reword_rs::cli::global::GlobalOptions;
use reword_rs::cli::{self, Command};
use reword_rs::cmd::config::run_options_command;
use reword_rs::cmd::fix::{run_bulk_command, run_fix_command};
use reword_rs::cmd::history::run_history_command;
use reword_rs::config::loader::ConfigLoader;
use reword_rs::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use reword_rs::error::Result;
use reword_rs::logging::init_logging;
use reword_rs::logging::{LogConfig, LogLevel};
use tracing::debug;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::Fix(args)) => match load_config(&cli.global) {
            Ok(config) => run_fix_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Bulk(args)) => match load_config(&cli.global) {
            Ok(config) => run_bulk_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::History(args)) => match load_config(&cli.global) {
            Ok(config) => run_history_command(args, &config).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(LOCAL_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides()? {
        loader = loader.set(&key, value)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    let loader = build_config_loader(global)?;
    for line in loader.format_loaded_files() {
        debug!(source = %line, "config source");
    }
    loader.build()
}
