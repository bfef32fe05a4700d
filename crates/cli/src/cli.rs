//! Command-line arguments for the `stock-sim` binary.
//!
//! Every invocation is one round: restore the user, move prices once, run a
//! single command, save if anything changed.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stock_sim_core::errors::CoreError;
use stock_sim_core::models::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "stock-sim")]
#[command(about = "Stock Simulator: trade a random-walk market from the command line.")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Path to a JSON settings file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the saved user state (overrides the settings file)
    #[arg(short, long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Seed for the price walk, for reproducible rounds
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List every stock with its current price
    Market,

    /// Buy shares at the current price
    Buy {
        symbol: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },

    /// Sell shares at the current price
    Sell {
        symbol: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },

    /// Show balance, portfolio value and net worth
    Value,

    /// List held symbols and quantities
    Holdings,

    /// Print the transaction log
    History {
        /// Only show trades in this symbol
        #[arg(long)]
        symbol: Option<String>,
    },

    /// Discard saved state and start over with a fresh user
    Reset,
}

impl Cli {
    /// Build the effective settings: file (or defaults), then flag overrides.
    pub fn settings(&self) -> Result<Settings, CoreError> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_json_file(path)?,
            None => Settings::default(),
        };
        if let Some(state) = &self.state {
            settings.state_path = state.display().to_string();
        }
        Ok(settings)
    }
}
