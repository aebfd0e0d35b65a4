//! Portfolio command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use advisor_portfolio::{PortfolioPosition, PortfolioSummary};

use crate::cli::OutputFormat;
use crate::output::{print_csv, print_header, print_info, print_json_value, print_output};
use crate::snapshot::Snapshot;

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// Snapshot file (JSON) with a `ledger` section
    #[arg(long)]
    pub snapshot: PathBuf,
}

/// One position for display.
#[derive(Debug, Serialize, Tabled)]
pub struct PositionRow {
    #[tabled(rename = "Asset type")]
    pub asset_type: String,
    #[tabled(rename = "Asset code")]
    pub code: String,
    #[tabled(rename = "Asset name")]
    pub name: String,
    #[tabled(rename = "Average purchase price")]
    pub average_price: String,
    #[tabled(rename = "Quantity")]
    pub quantity: i64,
    #[tabled(rename = "Total")]
    pub total: String,
}

impl From<&PortfolioPosition> for PositionRow {
    fn from(p: &PortfolioPosition) -> Self {
        Self {
            asset_type: p.asset_type.to_string(),
            code: p.code.clone(),
            name: p.name.clone(),
            average_price: p.average_price.map(|v| v.to_string()).unwrap_or_default(),
            quantity: p.quantity,
            total: p.total.map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

/// Execute the portfolio command.
pub fn execute(args: PortfolioArgs, format: OutputFormat) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    if snapshot.ledger.is_empty() {
        return Err(snapshot.missing("ledger").into());
    }

    let summary = PortfolioSummary::from_events(&snapshot.ledger)?;

    match format {
        OutputFormat::Json => print_json_value(&summary)?,
        OutputFormat::Csv => print_csv(&summary.positions)?,
        OutputFormat::Table => {
            print_header("Portfolio");
            let rows: Vec<PositionRow> = summary.positions.iter().map(PositionRow::from).collect();
            print_output(&rows, format)?;
            print_info(&format!("Total cost: {}", summary.total_cost));
        }
    }

    Ok(())
}
