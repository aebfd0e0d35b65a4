//! Advisor CLI - Bond screening and yield analysis from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Screen bonds against inflation
//! advisor screen --snapshot market.json --as-of 2024-06-03
//!
//! # Sample the zero-coupon yield curve
//! advisor curve --snapshot market.json --points 40
//!
//! # Aggregate the ledger
//! advisor portfolio --snapshot market.json
//!
//! # Classic yields of a coupon bond bought at 94%
//! advisor bond --price 94 --coupon 78 --days 365
//!
//! # Deposit growth
//! advisor deposit --amount 130000 --rate 0.10 --years 1 --payments 12
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod snapshot;

use advisor_config::AdvisorConfig;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with JSON or CSV output
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => AdvisorConfig::load(path)?,
        None => AdvisorConfig::default(),
    };
    let format = cli.format;

    match cli.command {
        Commands::Screen(args) => commands::screen::execute(args, &config, format)?,
        Commands::Curve(args) => commands::curve::execute(args, &config, format)?,
        Commands::Portfolio(args) => commands::portfolio::execute(args, format)?,
        Commands::Bond(args) => commands::bond::execute(args, &config, format)?,
        Commands::Deposit(args) => commands::deposit::execute(args, format)?,
    }

    Ok(())
}
