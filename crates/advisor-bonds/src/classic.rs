//! Textbook yield measures for a plain coupon bond.
//!
//! These formulas do not use the inflation model. Accrued interest here is
//! computed from a 365-day year, unlike the 364-day bond year used by the
//! profitability formulas.

use advisor_core::rounding::round2;
use advisor_core::types::CALENDAR_YEAR_DAYS;
use advisor_core::{AdvisorError, AdvisorResult, MarketAssumptions};
use serde::{Deserialize, Serialize};

/// Face value used when none is given.
pub const DEFAULT_FACE_VALUE: f64 = 1000.0;

/// A coupon bond bought at a percentage of face value.
///
/// # Example
///
/// ```rust
/// use advisor_bonds::ClassicBond;
/// use advisor_core::MarketAssumptions;
///
/// let bond = ClassicBond::new(94.0, 78.0, &MarketAssumptions::default()).unwrap();
/// assert_eq!(bond.buy_price(), 940.0);
/// assert!((bond.noncoupon_yield() - 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicBond {
    buy_price: f64,
    coupon: f64,
    redemption_price: f64,
    broker_fee: f64,
    exchange_fee: f64,
    tax_rate: f64,
}

/// All classic yields of a bond, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassicYields {
    /// Purchase price in currency units.
    pub buy_price: f64,
    /// Discount yield ignoring coupons.
    pub noncoupon_yield: f64,
    /// Discount yield net of tax and fees.
    pub pure_noncoupon_yield: f64,
    /// Coupon over face value.
    pub current_coupon_yield: f64,
    /// Coupon over price plus accrued interest.
    pub modified_current_yield: f64,
    /// Simple yield to redemption.
    pub redemption_yield: f64,
    /// Yield to redemption net of broker fee and coupon tax.
    pub effective_yield: f64,
    /// Yield net of tax, both fees, and accrued interest.
    pub real_yield: f64,
}

impl ClassicBond {
    /// Creates a bond with the default face value of 1000.
    ///
    /// `coupon` is the annual coupon in currency units.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the price percent is not positive.
    pub fn new(price_percent: f64, coupon: f64, assumptions: &MarketAssumptions) -> AdvisorResult<Self> {
        Self::with_face_value(price_percent, coupon, DEFAULT_FACE_VALUE, assumptions)
    }

    /// Creates a bond with an explicit face (redemption) value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the face value or price percent is not positive.
    pub fn with_face_value(
        price_percent: f64,
        coupon: f64,
        face_value: f64,
        assumptions: &MarketAssumptions,
    ) -> AdvisorResult<Self> {
        if face_value.is_nan() || face_value <= 0.0 {
            return Err(AdvisorError::invalid_input(format!(
                "face value must be positive, got {face_value}"
            )));
        }
        if price_percent.is_nan() || price_percent <= 0.0 {
            return Err(AdvisorError::invalid_input(format!(
                "price must be positive, got {price_percent}%"
            )));
        }

        let buy_price = face_value * (price_percent / 100.0);
        Ok(Self {
            buy_price,
            coupon,
            redemption_price: face_value,
            broker_fee: buy_price * assumptions.broker_fee,
            exchange_fee: buy_price * assumptions.exchange_fee,
            tax_rate: assumptions.tax_rate,
        })
    }

    /// Purchase price in currency units.
    pub fn buy_price(&self) -> f64 {
        self.buy_price
    }

    /// Face value paid at redemption.
    pub fn redemption_price(&self) -> f64 {
        self.redemption_price
    }

    /// Yield of a discount bond: `(N - P) / N * 100`.
    pub fn noncoupon_yield(&self) -> f64 {
        (self.redemption_price - self.buy_price) / self.redemption_price * 100.0
    }

    /// Discount yield after tax on the discount and both fees.
    pub fn pure_noncoupon_yield(&self) -> f64 {
        let discount = self.redemption_price - self.buy_price;
        let tax = discount * self.tax_rate;
        let net = discount - tax - self.broker_fee - self.exchange_fee;
        net / self.redemption_price * 100.0
    }

    /// Current coupon yield: `C / N * 100`.
    pub fn current_coupon_yield(&self) -> f64 {
        self.coupon / self.redemption_price * 100.0
    }

    /// Accrued interest after `days` of the coupon period: `C / 365 * days`.
    pub fn accrued_coupon_income(&self, days: u32) -> f64 {
        self.coupon / f64::from(CALENDAR_YEAR_DAYS) * f64::from(days)
    }

    /// Modified current yield: `C / (P + ACI) * 100`.
    pub fn modified_current_yield(&self, days: u32) -> f64 {
        self.coupon / (self.buy_price + self.accrued_coupon_income(days)) * 100.0
    }

    /// Simple yield to redemption over `days_to_maturity`.
    ///
    /// ```text
    /// ((N - P) + C) / P * 365 / t * 100
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero horizon.
    pub fn redemption_yield(&self, days_to_maturity: u32) -> AdvisorResult<f64> {
        let t = horizon(days_to_maturity)?;
        let gain = self.redemption_price - self.buy_price + self.coupon;
        Ok(gain / self.buy_price * f64::from(CALENDAR_YEAR_DAYS) / t * 100.0)
    }

    /// Yield to redemption with the broker fee in the cost and coupon tax deducted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero horizon.
    pub fn effective_yield(&self, days_to_maturity: u32) -> AdvisorResult<f64> {
        let t = horizon(days_to_maturity)?;
        let costs = self.buy_price + self.broker_fee;
        let tax = self.coupon * self.tax_rate;
        let gain = self.redemption_price - costs + self.coupon - tax;
        Ok(gain / costs * f64::from(CALENDAR_YEAR_DAYS) / t * 100.0)
    }

    /// Real yield to redemption net of tax, both fees, and accrued interest.
    ///
    /// `days` is the number of days since the last coupon payment.
    ///
    /// ```text
    /// (N - (P + ACI + fees) + (C - ACI) - C * tax) / N * 100
    /// ```
    pub fn real_yield(&self, days: u32) -> f64 {
        let accrued = self.accrued_coupon_income(days);
        let costs = self.buy_price + self.broker_fee + self.exchange_fee + accrued;
        let remaining_coupon = self.coupon - accrued;
        let tax = self.coupon * self.tax_rate;
        let net = self.redemption_price - costs + remaining_coupon - tax;
        net / self.redemption_price * 100.0
    }

    /// Computes every measure, rounded to two decimals.
    ///
    /// `days` serves both as days since the last coupon and as the horizon.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero `days`.
    pub fn summary(&self, days: u32) -> AdvisorResult<ClassicYields> {
        Ok(ClassicYields {
            buy_price: round2(self.buy_price),
            noncoupon_yield: round2(self.noncoupon_yield()),
            pure_noncoupon_yield: round2(self.pure_noncoupon_yield()),
            current_coupon_yield: round2(self.current_coupon_yield()),
            modified_current_yield: round2(self.modified_current_yield(days)),
            redemption_yield: round2(self.redemption_yield(days)?),
            effective_yield: round2(self.effective_yield(days)?),
            real_yield: round2(self.real_yield(days)),
        })
    }
}

fn horizon(days: u32) -> AdvisorResult<f64> {
    if days == 0 {
        return Err(AdvisorError::invalid_input("days to maturity must be positive"));
    }
    Ok(f64::from(days))
}
