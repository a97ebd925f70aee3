//! Track:GO command-line client.
//!
//! Composition root: reads configuration, sets up logging, opens the file
//! store and loads the tracker aggregate, then runs one command against it.
//!
//! # Examples
//!
//! ```bash
//! trackgo add-player ace
//! trackgo add-roster teamA ace bolt
//! trackgo record teamA 13 7 mapX --mvp ace
//! trackgo rosters
//! ```

mod commands;
mod config;
mod logging;
mod report;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use stats_runtime::{FileStore, Tracker};

use commands::Command;
use config::ClientConfig;

/// Track competitive-game statistics for players, rosters and matches
#[derive(Parser)]
#[command(name = "trackgo")]
#[command(about = "Track competitive-game statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Store document path (overrides TRACKGO_STORE_PATH)
    #[arg(short, long, global = true, value_name = "PATH")]
    store: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    // Held until exit so the reported error still reaches the log file.
    let _guard = match logging::setup_logging(&config) {
        Ok(guard) => guard,
        Err(err) => return report::report(&err, None),
    };

    match run(&config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report::report(&err, config.log_file().as_deref()),
    }
}

fn run(config: &ClientConfig, command: Command) -> Result<()> {
    tracing::info!("Store: {}", config.store_path.display());

    let mut tracker = Tracker::new(FileStore::new(&config.store_path));
    tracker.load_or_default().with_context(|| {
        format!(
            "An error occurred while loading data from {}",
            config.store_path.display()
        )
    })?;

    command.execute(&mut tracker)
}
