//! Shootout CLI
//!
//! Play penalty shootouts against the CPU from the terminal, inspect the
//! saved history and calibrate the engine's probabilities.

mod commands;
mod logger;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use shootout_core::{Difficulty, ShootoutEngine};

use commands::Controls;

#[derive(Parser)]
#[command(name = "shootout", version = shootout_core::VERSION)]
#[command(about = "Penalty shootouts against a CPU keeper and striker", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one shootout
    Play {
        /// easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// Engine seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// History file (defaults to ./saves/shootouts.dat)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Engine config JSON (falls back to SHOOTOUT_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Let the CLI pick aim and dive instead of prompting
        #[arg(long, default_value = "false")]
        auto: bool,
    },

    /// Show aggregate statistics and per-zone success rates
    Stats {
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// List recent completed shootouts, newest first
    History {
        #[arg(long)]
        history: Option<PathBuf>,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Delete every saved shootout and reset statistics
    Reset {
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Measure kick outcome rates and simulate a batch of shootouts
    Calibrate {
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        #[arg(long, default_value = "100000")]
        trials: u32,

        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match cli.command {
        Commands::Play { difficulty, seed, history, config, auto } => {
            let config = commands::load_config(config.as_deref())?;
            let store = commands::open_history(history)?;
            let seed = seed.unwrap_or_else(rand::random);
            tracing::debug!("engine seed {}", seed);

            let mut engine = ShootoutEngine::new(config, ChaCha8Rng::seed_from_u64(seed), store)?;
            let stdin = std::io::stdin();
            let mut controls = if auto {
                Controls::Auto(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)))
            } else {
                Controls::Prompt(Box::new(stdin.lock()))
            };

            commands::play(&mut engine, difficulty, &mut controls)?;
        }

        Commands::Stats { history } => {
            let history = commands::open_history(history)?;
            commands::print_stats(&history);
        }

        Commands::History { history, limit } => {
            let history = commands::open_history(history)?;
            commands::print_history(&history, limit);
        }

        Commands::Reset { history } => match commands::reset(history)? {
            Some(removed) => println!("🗑  Removed {} shootouts", removed),
            None => println!("🗑  Removed unreadable shootout history"),
        },

        Commands::Calibrate { difficulty, trials, seed, config } => {
            let config = commands::load_config(config.as_deref())?;
            commands::calibrate(&config, difficulty, trials, seed)?;
        }
    }

    Ok(())
}
