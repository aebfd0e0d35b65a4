//! Screen command implementation.
//!
//! Filters the snapshot's bond table down to buyable candidates and ranks
//! them by annualized after-tax yield net of inflation. Unreadable bond rows
//! are listed with the exclusions.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use advisor_analytics::{ScreenedBond, Screener};
use advisor_config::AdvisorConfig;

use crate::cli::OutputFormat;
use crate::commands::parse_as_of;
use crate::output::{print_columns, print_header, print_info, print_json_value, print_warning};
use crate::snapshot::Snapshot;

/// Arguments for the screen command.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Snapshot file (JSON)
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Skip inflation adjustment; only drop amortizing bonds
    #[arg(long)]
    pub nominal: bool,

    /// Government bonds only
    #[arg(long)]
    pub government: bool,

    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// Execute the screen command.
pub fn execute(args: ScreenArgs, config: &AdvisorConfig, format: OutputFormat) -> Result<()> {
    let as_of = parse_as_of(args.as_of.as_deref())?;
    let snapshot = Snapshot::load(&args.snapshot)?;

    let mut filter = config.filter.clone();
    if args.government {
        filter.government_only = true;
    }
    filter.check()?;
    let candidates = filter.apply(&snapshot.bonds, as_of);

    let screener = Screener::new(&snapshot.schedules, config.assumptions, as_of)?
        .with_config(config.screening);
    let mut report = if args.nominal {
        screener.screen_nominal(&candidates)
    } else {
        if snapshot.inflation.is_empty() {
            return Err(snapshot.missing("inflation").into());
        }
        let horizons = snapshot.inflation.horizons(as_of)?;
        if format == OutputFormat::Table {
            print_info(&format!(
                "Inflation: {:.2}% (5y median), {:.2}% (10y median)",
                horizons.five_year * 100.0,
                horizons.ten_year * 100.0
            ));
        }
        screener.screen(&candidates, horizons)
    };
    report.excluded.extend(snapshot.rejected.iter().cloned());

    match format {
        OutputFormat::Json => print_json_value(&report)?,
        OutputFormat::Table | OutputFormat::Csv => {
            if format == OutputFormat::Table {
                print_header(&format!("Bonds as of {as_of}"));
            }
            let rows: Vec<Vec<String>> = report
                .bonds
                .iter()
                .map(|b| b.cells(report.inflation_adjusted))
                .collect();
            print_columns(&ScreenedBond::labels(report.inflation_adjusted), &rows, format)?;
        }
    }

    if format == OutputFormat::Table && !report.excluded.is_empty() {
        print_warning(&format!(
            "{} of {} candidates excluded ({} amortizing)",
            report.excluded.len(),
            candidates.len() + snapshot.rejected.len(),
            report.amortizing_count()
        ));
    }

    Ok(())
}
