//! Bank deposit growth, used as the baseline bonds are compared against.

use std::fmt;
use std::str::FromStr;

use advisor_core::rounding::round2;
use advisor_core::{AdvisorError, AdvisorResult};
use serde::{Deserialize, Serialize};

/// Final balance with compound interest, rounded to two decimals.
///
/// ```text
/// B = B0 * (1 + rate / p)^(p * (years + months / p))
/// ```
///
/// `rate` is annual and fractional (0.10 for 10%); `p` is the number of
/// capitalizations per year.
///
/// # Errors
///
/// Returns `InvalidInput` if `payments_per_year` is zero.
pub fn compound_growth(
    principal: f64,
    rate: f64,
    payments_per_year: u32,
    years: u32,
    months: u32,
) -> AdvisorResult<f64> {
    let p = periods(payments_per_year)?;
    let time = f64::from(years) + f64::from(months) / p;
    Ok(round2(principal * (1.0 + rate / p).powf(p * time)))
}

/// Final balance with simple interest over whole years.
///
/// ```text
/// B = B0 * (1 + p * years * rate / p)
/// ```
///
/// # Errors
///
/// Returns `InvalidInput` if `payments_per_year` is zero.
pub fn simple_growth(
    principal: f64,
    rate: f64,
    payments_per_year: u32,
    years: u32,
) -> AdvisorResult<f64> {
    let p = periods(payments_per_year)?;
    Ok(principal * (1.0 + p * f64::from(years) * (rate / p)))
}

fn periods(payments_per_year: u32) -> AdvisorResult<f64> {
    if payments_per_year == 0 {
        return Err(AdvisorError::invalid_input(
            "capitalizations per year must be positive",
        ));
    }
    Ok(f64::from(payments_per_year))
}

/// A term deposit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    /// Initial amount.
    pub amount: f64,
    /// Annual rate as a fraction.
    pub interest_rate: f64,
    /// Whole years.
    pub years: u32,
    /// Extra months.
    #[serde(default)]
    pub months: u32,
    /// Capitalizations per year.
    #[serde(default = "default_payments")]
    pub payments_per_year: u32,
}

fn default_payments() -> u32 {
    1
}

impl Default for Deposit {
    fn default() -> Self {
        Self {
            amount: 10_000.0,
            interest_rate: 0.06,
            years: 0,
            months: 0,
            payments_per_year: default_payments(),
        }
    }
}

impl Deposit {
    /// Creates a deposit capitalized once a year.
    #[must_use]
    pub fn new(amount: f64, interest_rate: f64, years: u32) -> Self {
        Self {
            amount,
            interest_rate,
            years,
            ..Self::default()
        }
    }

    /// Sets the extra months.
    #[must_use]
    pub fn with_months(mut self, months: u32) -> Self {
        self.months = months;
        self
    }

    /// Sets the capitalizations per year.
    #[must_use]
    pub fn with_payments_per_year(mut self, payments: u32) -> Self {
        self.payments_per_year = payments;
        self
    }

    /// Balance with simple interest.
    pub fn simple_interest(&self) -> AdvisorResult<f64> {
        simple_growth(self.amount, self.interest_rate, self.payments_per_year, self.years)
    }

    /// Balance with compound interest.
    pub fn compound_interest(&self) -> AdvisorResult<f64> {
        compound_growth(
            self.amount,
            self.interest_rate,
            self.payments_per_year,
            self.years,
            self.months,
        )
    }

    /// Percent by which compounding beats simple interest.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for zero capitalizations and `MathError` when
    /// the simple balance is zero.
    pub fn real_interest_rate(&self) -> AdvisorResult<f64> {
        let simple = self.simple_interest()?;
        if simple == 0.0 {
            return Err(AdvisorError::math_error("simple balance is zero"));
        }
        Ok((self.compound_interest()? / simple - 1.0) * 100.0)
    }
}

/// How often a percent-rate deposit is capitalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalizationFrequency {
    /// 360 times a year.
    #[serde(alias = "day")]
    Daily,
    /// 12 times a year.
    #[default]
    #[serde(alias = "month")]
    Monthly,
    /// Once a year.
    #[serde(alias = "year")]
    Yearly,
}

impl CapitalizationFrequency {
    /// Capitalizations per year.
    #[must_use]
    pub const fn periods(self) -> u32 {
        match self {
            Self::Daily => 360,
            Self::Monthly => 12,
            Self::Yearly => 1,
        }
    }

    /// Balance after `years` at `rate_percent` (10.0 for 10%).
    #[must_use]
    pub fn compound_interest(self, cash: f64, rate_percent: f64, years: f64) -> f64 {
        let n = f64::from(self.periods());
        cash * (1.0 + rate_percent / (n * 100.0)).powf(n * years)
    }

    /// Total growth over `years` in percent, rounded to two decimals.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `cash` is zero.
    pub fn effective_rate_percent(self, cash: f64, rate_percent: f64, years: f64) -> AdvisorResult<f64> {
        if cash == 0.0 {
            return Err(AdvisorError::invalid_input("deposit amount must be non-zero"));
        }
        let grown = self.compound_interest(cash, rate_percent, years);
        Ok(round2((grown / cash - 1.0) * 100.0))
    }
}

impl fmt::Display for CapitalizationFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CapitalizationFrequency {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Daily),
            "month" | "monthly" => Ok(Self::Monthly),
            "year" | "yearly" => Ok(Self::Yearly),
            other => Err(AdvisorError::invalid_input(format!(
                "unknown capitalization frequency: {other}"
            ))),
        }
    }
}
