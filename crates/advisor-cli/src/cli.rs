//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{BondArgs, CurveArgs, DepositArgs, PortfolioArgs, ScreenArgs};

/// Advisor - Bond screening and yield analysis for retail investors
#[derive(Parser)]
#[command(name = "advisor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true, env = "ADVISOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Screen bonds and rank them by inflation-adjusted yield
    Screen(ScreenArgs),

    /// Sample the zero-coupon yield curve
    Curve(CurveArgs),

    /// Aggregate the buy/sell ledger into positions
    Portfolio(PortfolioArgs),

    /// Classic yields of a coupon bond
    Bond(BondArgs),

    /// Simple and compound growth of a deposit
    Deposit(DepositArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
