//! # CHLA - CLI Entry Point
//!
//! Command-line interface for the contextual hypergraph learner.
//!
//! Commands:
//! - `run`         - Initialize, evolve and summarize the relations
//! - `init-config` - Generate a default configuration file

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use chla::learner::{self, UniformRewards};
use chla::{ChlaConfig, ChlaError, ChlaResult};

/// CHLA - reward-driven learning over pairwise context relations.
#[derive(Parser, Debug)]
#[command(name = "chla")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "chla.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the learner and print progress and the best relation.
    Run {
        /// Number of epochs (overrides the config file).
        #[arg(short, long)]
        epochs: Option<u64>,

        /// Learning rate (overrides the config file).
        #[arg(short, long)]
        learning_rate: Option<f64>,

        /// Seed for reproducible runs (overrides the config file).
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print a JSON run summary after the best relation line.
        #[arg(long)]
        json: bool,
    },

    /// Generate a default configuration file.
    InitConfig,
}

fn main() -> ChlaResult<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            epochs,
            learning_rate,
            seed,
            json,
        } => cmd_run(&cli.config, epochs, learning_rate, seed, json),
        Commands::InitConfig => cmd_init_config(&cli.config),
    }
}

/// Load configuration, apply CLI overrides and run the learner.
fn cmd_run(
    config_path: &Path,
    epochs: Option<u64>,
    learning_rate: Option<f64>,
    seed: Option<u64>,
    json: bool,
) -> ChlaResult<()> {
    let mut config = if config_path.exists() {
        info!("Loading configuration from: {}", config_path.display());
        ChlaConfig::from_file(config_path)?
    } else {
        info!("No config file found, using defaults. Run 'init-config' to generate one.");
        ChlaConfig::default()
    };

    if let Some(epochs) = epochs {
        config.learning.epochs = epochs;
    }
    if let Some(rate) = learning_rate {
        config.learning.learning_rate = rate;
    }
    if seed.is_some() {
        config.general.seed = seed;
    }

    let mut source = match config.general.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            UniformRewards::seeded(seed)
        }
        None => {
            warn!("No seed configured; this run is not reproducible");
            UniformRewards::from_entropy()
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = learner::run(&config, &mut source, &mut out)?;

    if json {
        let rendered = serde_json::to_string_pretty(&summary)?;
        writeln!(out, "{}", rendered)?;
    }

    info!(
        "Run finished: {} updates over {} epochs, best {} = {}",
        summary.evolution.updates_applied,
        summary.evolution.epochs,
        summary.best_pair,
        summary.best_relation,
    );

    Ok(())
}

/// Generate a default configuration file.
fn cmd_init_config(config_path: &Path) -> ChlaResult<()> {
    if config_path.exists() {
        return Err(ChlaError::Config(format!(
            "Configuration file already exists: {}. Remove it first or use a different path.",
            config_path.display()
        )));
    }

    ChlaConfig::write_default(config_path)?;
    println!("Default configuration written to: {}", config_path.display());
    println!("Edit this file to change the contexts, learning rate and epoch count.");
    println!();
    println!("Key settings:");
    println!("  [general]  - contexts (at least 2, distinct), optional seed");
    println!("  [learning] - learning_rate (default 0.01), epochs (default 10)");

    Ok(())
}
