//! CLI command implementations.

pub mod bond;
pub mod curve;
pub mod deposit;
pub mod portfolio;
pub mod screen;

// Re-export submodules for convenience
pub use bond::BondArgs;
pub use curve::CurveArgs;
pub use deposit::DepositArgs;
pub use portfolio::PortfolioArgs;
pub use screen::ScreenArgs;

use advisor_core::Date;

use crate::error::{CliError, CliResult};

/// Parses an optional YYYY-MM-DD string, defaulting to today.
pub fn parse_as_of(s: Option<&str>) -> CliResult<Date> {
    match s {
        Some(s) => Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string())),
        None => Ok(Date::today()),
    }
}

/// Validates a price value.
pub fn validate_price(price: f64) -> CliResult<f64> {
    if price.is_nan() || price <= 0.0 {
        return Err(CliError::InvalidPrice(price));
    }
    Ok(price)
}
