//! Curve command implementation.
//!
//! Samples the latest fitted zero-coupon curve and lists the yields of the
//! nominal government bonds that pass the configured candidate filter.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use advisor_analytics::CandidateFilter;
use advisor_config::AdvisorConfig;
use advisor_core::Date;
use advisor_curves::{observed_yields, sample_curve, CurvePoint, ParametricZeroCurve, YieldCurveParameters};

use crate::cli::OutputFormat;
use crate::commands::parse_as_of;
use crate::output::{print_csv, print_header, print_json_value, print_output};
use crate::snapshot::Snapshot;

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Snapshot file (JSON)
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Number of sampled maturities (overrides the configured grid)
    #[arg(long)]
    pub points: Option<usize>,

    /// Valuation date for observed yields (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// One sampled maturity for display.
#[derive(Debug, Serialize, Tabled)]
pub struct CurveRow {
    #[tabled(rename = "Maturity, years")]
    pub maturity: String,
    #[tabled(rename = "Spot, %")]
    pub spot: String,
    #[tabled(rename = "Forward, %")]
    pub forward: String,
}

impl From<&CurvePoint> for CurveRow {
    fn from(p: &CurvePoint) -> Self {
        Self {
            maturity: format!("{:.2}", p.maturity),
            spot: format!("{:.4}", p.spot_percent),
            forward: format!("{:.4}", p.forward_percent),
        }
    }
}

/// One government bond yield for display.
#[derive(Debug, Serialize, Tabled)]
pub struct ObservedRow {
    #[tabled(rename = "Maturity, years")]
    pub maturity: String,
    #[tabled(rename = "Yield, %")]
    pub yield_percent: String,
}

#[derive(Serialize)]
struct CurveOutput<'a> {
    trade_date: Date,
    points: &'a [CurvePoint],
    observed: &'a [(f64, f64)],
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, config: &AdvisorConfig, format: OutputFormat) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    if snapshot.curves.is_empty() {
        return Err(snapshot.missing("curves").into());
    }
    let as_of = parse_as_of(args.as_of.as_deref())?;

    let params = YieldCurveParameters::latest(&snapshot.curves)?;
    let curve = ParametricZeroCurve::new(params)?;

    let mut grid = config.curve_grid;
    if let Some(points) = args.points {
        grid.points = points;
    }
    let points = sample_curve(&curve, &grid)?;
    let government = CandidateFilter {
        government_only: true,
        inflation_linked: false,
        ..config.filter.clone()
    };
    let candidates = government.apply(&snapshot.bonds, as_of);
    let observed = observed_yields(&candidates, as_of, &config.assumptions);

    match format {
        OutputFormat::Json => print_json_value(&CurveOutput {
            trade_date: params.trade_date,
            points: &points,
            observed: &observed,
        })?,
        OutputFormat::Csv => print_csv(&points)?,
        OutputFormat::Table => {
            print_header(&format!("Zero-coupon curve, {}", params.trade_date));
            let rows: Vec<CurveRow> = points.iter().map(CurveRow::from).collect();
            print_output(&rows, format)?;

            if !observed.is_empty() {
                print_header("Government bond yields");
                let rows: Vec<ObservedRow> = observed
                    .iter()
                    .map(|(maturity, y)| ObservedRow {
                        maturity: format!("{maturity:.2}"),
                        yield_percent: format!("{y:.2}"),
                    })
                    .collect();
                print_output(&rows, format)?;
            }
        }
    }

    Ok(())
}
