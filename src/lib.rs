//! hrflow library root.
//! Exposes the portal client, the CLI parser, the high-level run() function
//! and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod portal;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(&cli.command, config_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, config_path),
        command => {
            // everything else talks to the portal and needs credentials
            let cfg = Config::load(config_path)?;
            match command {
                Commands::Calendar { .. } => cli::commands::calendar::handle(command, &cfg),
                Commands::Absences { .. } => cli::commands::absences::handle(command, &cfg),
                Commands::Hours { .. } => cli::commands::hours::handle(command, &cfg),
                Commands::Balance { .. } => cli::commands::balance::handle(command, &cfg),
                Commands::Report { .. } => cli::commands::report::handle(command, &cfg),
                Commands::Init { .. } | Commands::Config { .. } => Ok(()),
            }
        }
    }
}

/// Diagnostic logs go to stderr; user-facing output goes through `ui::messages`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("HRFLOW_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // a subscriber may already be set when embedded; keep that one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = Config::resolve_path(cli.config.as_deref());
    dispatch(&cli, &config_path)
}
