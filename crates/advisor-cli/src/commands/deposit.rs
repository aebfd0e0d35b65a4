//! Deposit command implementation.

use anyhow::Result;
use clap::Args;

use advisor_bonds::{CapitalizationFrequency, Deposit};

use crate::cli::OutputFormat;
use crate::output::{print_metrics, KeyValue};

/// Arguments for the deposit command.
#[derive(Args, Debug)]
pub struct DepositArgs {
    /// Initial amount
    #[arg(long)]
    pub amount: f64,

    /// Annual interest rate as a fraction (0.10 for 10%)
    #[arg(long)]
    pub rate: f64,

    /// Whole years
    #[arg(long)]
    pub years: u32,

    /// Extra months
    #[arg(long, default_value = "0")]
    pub months: u32,

    /// Capitalizations per year
    #[arg(long, default_value = "1")]
    pub payments: u32,

    /// Also report the effective rate for day, month, or year capitalization
    #[arg(long)]
    pub capitalization: Option<CapitalizationFrequency>,
}

/// Execute the deposit command.
pub fn execute(args: DepositArgs, format: OutputFormat) -> Result<()> {
    let deposit = Deposit::new(args.amount, args.rate, args.years)
        .with_months(args.months)
        .with_payments_per_year(args.payments);

    let mut results = vec![
        KeyValue::from_f64("Amount", deposit.amount, 2),
        KeyValue::from_f64("Simple interest", deposit.simple_interest()?, 2),
        KeyValue::from_f64("Compound interest", deposit.compound_interest()?, 2),
        KeyValue::from_percent("Compounding gain", deposit.real_interest_rate()?),
    ];

    if let Some(frequency) = args.capitalization {
        let years = f64::from(args.years) + f64::from(args.months) / 12.0;
        let effective = frequency.effective_rate_percent(args.amount, args.rate * 100.0, years)?;
        results.push(KeyValue::from_percent(
            format!("Effective rate ({frequency} capitalization)"),
            effective,
        ));
    }

    print_metrics("Deposit", &results, format)
}
