//! Bond command implementation.
//!
//! Classic yields of a plain coupon bond from its purchase price.

use anyhow::Result;
use clap::Args;

use advisor_bonds::ClassicBond;
use advisor_config::AdvisorConfig;

use crate::cli::OutputFormat;
use crate::commands::validate_price;
use crate::output::{print_metrics, KeyValue};

/// Arguments for the bond command.
#[derive(Args, Debug)]
pub struct BondArgs {
    /// Purchase price in percent of face value
    #[arg(long)]
    pub price: f64,

    /// Annual coupon in currency units
    #[arg(long)]
    pub coupon: f64,

    /// Days held (or to redemption)
    #[arg(long, default_value = "365")]
    pub days: u32,

    /// Face value
    #[arg(long, default_value = "1000")]
    pub face: f64,
}

/// Execute the bond command.
pub fn execute(args: BondArgs, config: &AdvisorConfig, format: OutputFormat) -> Result<()> {
    let price = validate_price(args.price)?;
    let bond = ClassicBond::with_face_value(price, args.coupon, args.face, &config.assumptions)?;
    let y = bond.summary(args.days)?;

    let results = vec![
        KeyValue::from_f64("Buy price", y.buy_price, 2),
        KeyValue::new("Days", args.days.to_string()),
        KeyValue::from_percent("Noncoupon yield", y.noncoupon_yield),
        KeyValue::from_percent("Pure noncoupon yield", y.pure_noncoupon_yield),
        KeyValue::from_percent("Current coupon yield", y.current_coupon_yield),
        KeyValue::from_percent("Modified current yield", y.modified_current_yield),
        KeyValue::from_percent("Redemption yield", y.redemption_yield),
        KeyValue::from_percent("Effective yield", y.effective_yield),
        KeyValue::from_percent("Real yield", y.real_yield),
    ];

    print_metrics("Classic bond yields", &results, format)
}
