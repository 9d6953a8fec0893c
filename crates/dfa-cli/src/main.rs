//! # dfa CLI entry point
//!
//! Parses command-line arguments, loads configuration and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dfa_cli::config::CliConfig;
use dfa_cli::simulate::{run_simulate, SimulateArgs};
use dfa_cli::store::{run_store, StoreArgs};
use dfa_cli::validate::{run_validate, ValidateArgs};

/// Deterministic finite automaton toolkit.
///
/// Validates DFA definitions, simulates inputs against them and manages a
/// per-user store of saved definitions.
#[derive(Parser, Debug)]
#[command(name = "dfa", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report structural problems in one or more definitions.
    Validate(ValidateArgs),

    /// Run an input sequence through a definition.
    Simulate(SimulateArgs),

    /// Save, print, list and delete stored definitions.
    Store(StoreArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "dfa CLI starting");

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!(store_dir = %config.store_dir.display(), "configuration loaded");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Simulate(args) => run_simulate(&args, &config),
        Commands::Store(args) => run_store(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
