//! CLI entry point for the stock simulator.

use std::process;

use clap::Parser;
use log::{error, info};

use stock_sim_core::errors::CoreError;
use stock_sim_core::models::transaction::Transaction;
use stock_sim_core::StockSimulator;

mod cli;

use cli::{Cli, Command};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            process::exit(1);
        }
    };

    let mut sim = match StockSimulator::load_or_default(settings, cli.seed) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error starting simulator: {e}");
            process::exit(1);
        }
    };
    info!("session started: {sim:?}");

    process::exit(execute(&mut sim, &cli.command));
}

/// Run one round and one command, then save if anything changed.
/// Returns the process exit status.
fn execute(sim: &mut StockSimulator, command: &Command) -> i32 {
    sim.next_round();

    if let Err(e) = run(sim, command) {
        error!("{e}");
        eprintln!("Error: {e}");
        return 1;
    }

    if sim.has_unsaved_changes() {
        if let Err(e) = sim.save() {
            error!("save failed: {e}");
            eprintln!("Warning: could not save state to {}: {e}", sim.settings().state_path);
            return 1;
        }
    }
    0
}

fn run(sim: &mut StockSimulator, command: &Command) -> Result<(), CoreError> {
    match command {
        Command::Market => print_market(sim),
        Command::Buy { symbol, quantity } => {
            println!("{}", sim.buy(symbol, *quantity)?);
            println!("Balance: ${:.2}", sim.balance());
        }
        Command::Sell { symbol, quantity } => {
            println!("{}", sim.sell(symbol, *quantity)?);
            println!("Balance: ${:.2}", sim.balance());
        }
        Command::Value => {
            println!("Balance:         ${:.2}", sim.balance());
            println!("Portfolio Value: ${:.2}", sim.portfolio_value()?);
            println!("Net Worth:       ${:.2}", sim.net_worth()?);
        }
        Command::Holdings => {
            let held: Vec<_> = sim.holdings().iter().filter(|(_, q)| **q > 0).collect();
            if held.is_empty() {
                println!("No holdings.");
            }
            for (symbol, quantity) in held {
                println!("{symbol}: {quantity}");
            }
        }
        Command::History { symbol } => {
            let trades: Vec<&Transaction> = match symbol {
                Some(s) => sim
                    .user()
                    .portfolio()
                    .transactions_for(&s.trim().to_uppercase()),
                None => sim.transactions().iter().collect(),
            };
            if trades.is_empty() {
                println!("No transactions.");
            }
            for t in trades {
                println!("{t}");
            }
        }
        Command::Reset => {
            sim.reset_user();
            println!("Reset {} to ${:.2}.", sim.user().name(), sim.balance());
        }
    }
    Ok(())
}

fn print_market(sim: &StockSimulator) {
    println!("--- Market Data (round {}) ---", sim.round());
    for stock in sim.market().stocks() {
        println!("{stock}");
    }
}
