//! Binary entry point for cluedo-setup.
//!
//! This binary prepares a Cluedo game on the reasoning service and then
//! idles until interrupted.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use cluedo_setup::config::SetupConfig;
use cluedo_setup::models::Catalogs;
use cluedo_setup::services::{catalog_parameters, wait_for_interrupt};
use cluedo_setup::{
    FileParameterStore, GameSetup, HttpReasoningService, HypothesisGenerator, observability,
};
use std::process::ExitCode;
use std::sync::Arc;

/// Cluedo setup - loads the game ontology and publishes candidate hypotheses.
#[derive(Parser)]
#[command(name = "cluedo-setup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "CLUEDO_CONFIG_PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Set up the game, then idle until interrupted (default).
    Run {
        /// Exit right after publishing the hypotheses.
        #[arg(long)]
        no_idle: bool,
    },

    /// Print a freshly generated set of hypotheses without contacting any service.
    Hypotheses {
        /// Sampling seed.
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the catalogs and hypothesis identifiers.
    Catalogs,
}

/// Main entry point.
fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config.with_env_overrides(),
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Setup failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(
    command: Option<Commands>,
    config: SetupConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match command.unwrap_or(Commands::Run { no_idle: false }) {
        Commands::Run { no_idle } => cmd_run(&config, no_idle),
        Commands::Hypotheses { seed } => {
            let config = match seed {
                Some(seed) => config.with_seed(seed),
                None => config,
            };
            cmd_hypotheses(&config)
        },
        Commands::Catalogs => cmd_catalogs(),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<SetupConfig, Box<dyn std::error::Error>> {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(config_path) => SetupConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into),
        None => SetupConfig::load_default().map_err(std::convert::Into::into),
    }
}

/// Run command.
fn cmd_run(config: &SetupConfig, no_idle: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        client = %config.client_name,
        endpoint = %config.service.endpoint,
        params_file = %config.params_file.display(),
        "Starting game setup"
    );

    let service = Arc::new(HttpReasoningService::from_config(&config.service));
    let store = Arc::new(FileParameterStore::new(&config.params_file)?);
    let hypotheses = GameSetup::new(config, service, store).run()?;

    for hypothesis in &hypotheses {
        tracing::info!(hypothesis = %hypothesis, "Hypothesis available");
    }

    if !no_idle {
        wait_for_interrupt()?;
    }
    Ok(())
}

/// Hypotheses command.
fn cmd_hypotheses(config: &SetupConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", hypotheses_json(config.seed)?);
    Ok(())
}

/// Catalogs command.
fn cmd_catalogs() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", catalogs_json()?);
    Ok(())
}

/// Renders a freshly generated set of hypotheses.
fn hypotheses_json(seed: Option<u64>) -> Result<String, Box<dyn std::error::Error>> {
    let hypotheses = HypothesisGenerator::new(Catalogs::default(), seed).generate()?;
    Ok(serde_json::to_string_pretty(&hypotheses)?)
}

/// Renders the parameters published before the game starts.
fn catalogs_json() -> Result<String, Box<dyn std::error::Error>> {
    let document: serde_json::Map<String, serde_json::Value> =
        catalog_parameters(&Catalogs::default())?
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
    Ok(serde_json::to_string_pretty(&document)?)
}
