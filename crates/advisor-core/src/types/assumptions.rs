//! Market assumptions threaded through every time- or fee-dependent formula.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorResult, InputIssue};

/// Year length used by the bond profitability formulas.
pub const BOND_YEAR_DAYS: u32 = 364;

/// Year length used by accrued-interest-by-date formulas.
pub const CALENDAR_YEAR_DAYS: u32 = 365;

/// Fee, tax, and calendar assumptions for a single analysis run.
///
/// Rates are fractions: `tax_rate = 0.13` means 13%.
///
/// # Example
///
/// ```rust
/// use advisor_core::MarketAssumptions;
///
/// let assumptions = MarketAssumptions::default().with_tax_rate(0.15);
/// assert_eq!(assumptions.year_days, 364);
/// assert_eq!(assumptions.tax_rate, 0.15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    /// Days in a year for horizon calculations.
    #[serde(default = "default_year_days")]
    pub year_days: u32,

    /// Exchange commission per trade.
    #[serde(default = "default_exchange_fee")]
    pub exchange_fee: f64,

    /// Broker commission per trade.
    #[serde(default = "default_broker_fee")]
    pub broker_fee: f64,

    /// Personal income tax on coupons and capital gains.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

fn default_year_days() -> u32 {
    BOND_YEAR_DAYS
}

fn default_exchange_fee() -> f64 {
    0.000_03
}

fn default_broker_fee() -> f64 {
    0.000_3
}

fn default_tax_rate() -> f64 {
    0.13
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            year_days: default_year_days(),
            exchange_fee: default_exchange_fee(),
            broker_fee: default_broker_fee(),
            tax_rate: default_tax_rate(),
        }
    }
}

impl MarketAssumptions {
    /// Sets the year length in days.
    #[must_use]
    pub fn with_year_days(mut self, year_days: u32) -> Self {
        self.year_days = year_days;
        self
    }

    /// Sets the exchange fee rate.
    #[must_use]
    pub fn with_exchange_fee(mut self, rate: f64) -> Self {
        self.exchange_fee = rate;
        self
    }

    /// Sets the broker fee rate.
    #[must_use]
    pub fn with_broker_fee(mut self, rate: f64) -> Self {
        self.broker_fee = rate;
        self
    }

    /// Sets the tax rate.
    #[must_use]
    pub fn with_tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Year length as a float, for fractional-year arithmetic.
    #[must_use]
    pub fn year_days_f64(&self) -> f64 {
        f64::from(self.year_days)
    }

    /// Converts a day count into years under these assumptions.
    #[must_use]
    pub fn years(&self, days: i64) -> f64 {
        days as f64 / self.year_days_f64()
    }

    /// Lists every rule these assumptions break.
    #[must_use]
    pub fn issues(&self) -> Vec<InputIssue> {
        let mut issues = Vec::new();
        if self.year_days == 0 {
            issues.push(InputIssue::new("year_days", "Year length must be positive", "positive"));
        }
        for (field, rate) in [
            ("exchange_fee", self.exchange_fee),
            ("broker_fee", self.broker_fee),
            ("tax_rate", self.tax_rate),
        ] {
            if !(0.0..1.0).contains(&rate) {
                issues.push(InputIssue::new(
                    field,
                    format!("Rate must be in [0, 1), got {rate}"),
                    "range",
                ));
            }
        }
        issues
    }

    /// Checks that the assumptions can be used by the formulas.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero-day year or a rate outside `[0, 1)`.
    pub fn check(&self) -> AdvisorResult<()> {
        InputIssue::first_as_error(self.issues())
    }
}
