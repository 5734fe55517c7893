// repodash: Git Working-Copy Status Dashboard
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Scan | Fetch | Pull | Options | Version
//! ```

use std::process::ExitCode;

use repodash::cli::global::GlobalOptions;
use repodash::cli::{self, Command};
use repodash::cmd::options::run_options_command;
use repodash::cmd::repo::{run_fetch_command, run_pull_command};
use repodash::cmd::scan::run_scan_command;
use repodash::config::Config;
use repodash::config::loader::ConfigLoader;
use repodash::logging::{LogConfig, LogLevel, init_logging};

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
            eprintln!("Failed to initialize logging: {e}");
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
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Options) => load_config(&cli.global).map(|config| run_options_command(&config)),
        Some(Command::Scan(args)) => match load_config(&cli.global) {
            Ok(config) => run_scan_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Fetch(args)) => match load_config(&cli.global) {
            Ok(config) => run_fetch_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Pull(args)) => match load_config(&cli.global) {
            Ok(config) => run_pull_command(args, &config).await,
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

fn build_config_loader(global: &GlobalOptions) -> repodash::error::Result<ConfigLoader> {
    let mut loader = Config::builder().add_toml_file_optional("repodash.toml");
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix("REPODASH");
    if let Some(root) = &global.root {
        loader = loader.set("scan.root", root.display().to_string())?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> repodash::error::Result<Config> {
    build_config_loader(global)?.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
