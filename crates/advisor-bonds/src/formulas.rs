//! Stateless profitability formulas.
//!
//! All functions are pure: the valuation date (`as_of`) and the
//! [`MarketAssumptions`] are explicit arguments. Results that are shown to
//! the investor are rounded to two decimals; discounting keeps full precision.
//!
//! The inflation model discounts each future cash flow by the assumed
//! inflation rate over the (fractional) number of years until it is paid:
//!
//! ```text
//! adjusted = amount * (1 + inflation)^-(days_to_event / year_days)
//! ```

use advisor_core::rounding::round2;
use advisor_core::{AdvisorError, AdvisorResult, CashFlowSchedule, Date, MarketAssumptions};
use serde::{Deserialize, Serialize};

/// Minimum years to maturity for the capital-gains tax cliff.
pub const CAPITAL_GAINS_HOLDING_YEARS: f64 = 3.0;

/// Converts a price quoted in percent of face value to currency units.
///
/// ```text
/// price = round(face_value / 100 * price_percent, 2)
/// ```
///
/// # Errors
///
/// Returns `InvalidInput` if `face_value` is not positive.
pub fn normalize_price(price_percent: f64, face_value: f64) -> AdvisorResult<f64> {
    if face_value.is_nan() || face_value <= 0.0 {
        return Err(AdvisorError::invalid_input(format!(
            "face value must be positive, got {face_value}"
        )));
    }
    Ok(round2(face_value / 100.0 * price_percent))
}

/// Discounts (or compounds) `amount` at `rate` over `power` periods.
///
/// A negative `power` gives a present value: `amount * (1 + rate)^power`.
#[must_use]
pub fn discount(amount: f64, rate: f64, power: f64) -> f64 {
    amount * (1.0 + rate).powf(power)
}

/// Fractional years from `as_of` to `maturity` under `assumptions.year_days`.
#[must_use]
pub fn years_to_maturity(as_of: Date, maturity: Date, assumptions: &MarketAssumptions) -> f64 {
    assumptions.years(as_of.days_between(&maturity))
}

/// Exponent that discounts a cash flow paid on `event` back to `as_of`.
fn discount_power(as_of: Date, event: Date, assumptions: &MarketAssumptions) -> f64 {
    -years_to_maturity(as_of, event, assumptions)
}

/// Inflation-adjusts every cash amount in `schedule`, preserving order.
///
/// An empty schedule yields an empty vector.
#[must_use]
pub fn inflation_adjust_cash_flows(
    schedule: &CashFlowSchedule,
    inflation_rate: f64,
    as_of: Date,
    assumptions: &MarketAssumptions,
) -> Vec<f64> {
    schedule
        .entries()
        .iter()
        .map(|e| discount(e.value, inflation_rate, discount_power(as_of, e.date, assumptions)))
        .collect()
}

/// Inflation-adjusts the face value of the last schedule entry.
///
/// The last coupon's face value approximates the face value at maturity.
///
/// # Errors
///
/// Returns `MissingData` if the schedule is empty.
pub fn inflation_adjust_face_value(
    schedule: &CashFlowSchedule,
    inflation_rate: f64,
    as_of: Date,
    assumptions: &MarketAssumptions,
) -> AdvisorResult<f64> {
    let last = schedule.last().ok_or_else(|| {
        AdvisorError::missing_data(format!("no future {} to adjust", schedule.kind()))
    })?;
    Ok(discount(
        last.face_value,
        inflation_rate,
        discount_power(as_of, last.date, assumptions),
    ))
}

/// Which costs [`bond_profit`] deducts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitOptions {
    /// Apply the exchange fee to the purchase price.
    pub exchange_fee: bool,
    /// Apply the broker fee to the purchase price.
    pub broker_fee: bool,
    /// Tax coupons and, past the holding threshold, the discount.
    pub tax: bool,
}

impl ProfitOptions {
    /// No fees, no tax.
    #[must_use]
    pub fn gross() -> Self {
        Self::default()
    }

    /// Tax only; the setting used by the screening pipeline.
    #[must_use]
    pub fn taxed() -> Self {
        Self {
            tax: true,
            ..Self::default()
        }
    }

    /// Fees and tax.
    #[must_use]
    pub fn all() -> Self {
        Self {
            exchange_fee: true,
            broker_fee: true,
            tax: true,
        }
    }
}

/// Amounts that enter a hold-to-maturity profit computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitInputs {
    /// Sum of remaining coupons (possibly inflation-adjusted).
    pub coupon_sum: f64,
    /// Accrued interest paid to the seller.
    pub accrued_interest: f64,
    /// Face value received at maturity (possibly inflation-adjusted).
    pub face_value: f64,
    /// Purchase price in currency units.
    pub price: f64,
    /// Maturity date.
    pub maturity: Date,
}

/// Profit from buying at `price` and holding until maturity.
///
/// ```text
/// profit = (face_value - price * fee_adj) * gain_tax_adj
///        + coupon_sum * coupon_tax_adj
///        - accrued_interest
/// ```
///
/// Each enabled fee scales the price by `(1 - fee_rate)`. With `tax`,
/// coupons are always taxed, while the discount `face_value - price` is
/// taxed only when maturity is at least [`CAPITAL_GAINS_HOLDING_YEARS`]
/// away. The result is rounded to two decimals.
#[must_use]
pub fn bond_profit(
    inputs: &ProfitInputs,
    as_of: Date,
    options: ProfitOptions,
    assumptions: &MarketAssumptions,
) -> f64 {
    let mut price = inputs.price;
    if options.exchange_fee {
        price *= 1.0 - assumptions.exchange_fee;
    }
    if options.broker_fee {
        price *= 1.0 - assumptions.broker_fee;
    }

    let mut gain = inputs.face_value - price;
    let mut coupon_sum = inputs.coupon_sum;
    if options.tax {
        coupon_sum *= 1.0 - assumptions.tax_rate;
        if years_to_maturity(as_of, inputs.maturity, assumptions) >= CAPITAL_GAINS_HOLDING_YEARS {
            gain *= 1.0 - assumptions.tax_rate;
        }
    }

    round2(gain + coupon_sum - inputs.accrued_interest)
}

/// Profit as a percentage of the purchase price, rounded to two decimals.
#[must_use]
pub fn profit_percent(profit: f64, price: f64) -> f64 {
    round2(profit / price * 100.0)
}

/// Spreads a holding-period percentage evenly over the years to maturity.
///
/// # Errors
///
/// Returns `InvalidInput` if maturity is not after `as_of`.
pub fn annualized_percent(
    percent: f64,
    maturity: Date,
    as_of: Date,
    assumptions: &MarketAssumptions,
) -> AdvisorResult<f64> {
    let days = as_of.days_between(&maturity);
    if days <= 0 {
        return Err(AdvisorError::invalid_input(format!(
            "maturity {maturity} is not after valuation date {as_of}"
        )));
    }
    Ok(round2(percent / assumptions.years(days)))
}

/// Coupon sum as a percentage of face value, ignoring amortization.
///
/// # Errors
///
/// Returns `InvalidInput` if `face_value` is not positive.
pub fn nominal_coupon_yield(coupon_sum: f64, face_value: f64) -> AdvisorResult<f64> {
    if face_value.is_nan() || face_value <= 0.0 {
        return Err(AdvisorError::invalid_input(format!(
            "face value must be positive, got {face_value}"
        )));
    }
    Ok(coupon_sum / face_value * 100.0)
}

/// Coupons, face value, and price after reinvesting at the coupon rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Reinvested {
    /// Face value grown alongside the coupons.
    pub face_value: f64,
    /// Each coupon grown to the end of its reinvestment horizon.
    pub coupons: Vec<f64>,
    /// Price grown alongside the coupons.
    pub price: f64,
}

/// Grows coupons, face value, and price by per-period coupon reinvestment.
///
/// `coupons` holds `(amount, rate_percent)` pairs in payment order. The
/// n-th coupon is grown by `(1 + rate / frequency / 100)^n`, and face value
/// and price are compounded by the same factor at each step. Values are
/// expected to be inflation-adjusted already.
///
/// # Errors
///
/// Returns `InvalidInput` for a zero `frequency` and `MissingData` when
/// fewer than two coupons remain.
pub fn reinvest_coupons(
    price: f64,
    face_value: f64,
    coupons: &[(f64, f64)],
    frequency: u32,
) -> AdvisorResult<Reinvested> {
    if frequency == 0 {
        return Err(AdvisorError::invalid_input("coupon frequency must be positive"));
    }
    if coupons.len() < 2 {
        return Err(AdvisorError::missing_data(
            "reinvestment needs at least two remaining coupons",
        ));
    }

    let mut face_value = face_value;
    let mut price = price;
    let mut grown = Vec::with_capacity(coupons.len());
    for (n, &(amount, rate_percent)) in coupons.iter().enumerate() {
        let rate = rate_percent / f64::from(frequency) / 100.0;
        let factor = (1.0 + rate).powi(n as i32 + 1);
        grown.push(amount * factor);
        face_value *= factor;
        price *= factor;
    }

    Ok(Reinvested {
        face_value,
        coupons: grown,
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{ErrorKind, ScheduleEntry, ScheduleKind};
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn coupons() -> CashFlowSchedule {
        CashFlowSchedule::new(
            ScheduleKind::Coupon,
            vec![
                ScheduleEntry::new(date(2024, 12, 30), 1000.0, 40.0, 8.0),
                ScheduleEntry::new(date(2025, 12, 29), 1000.0, 40.0, 8.0),
            ],
        )
    }

    #[test]
    fn test_normalize_price() {
        assert_eq!(normalize_price(90.21, 1000.0).unwrap(), 902.1);
        assert_eq!(normalize_price(101.5, 500.0).unwrap(), 507.5);
    }

    #[test]
    fn test_normalize_price_rejects_bad_face() {
        for face in [0.0, -1000.0, f64::NAN] {
            let err = normalize_price(95.0, face).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn test_discount_default_power() {
        assert_relative_eq!(discount(110.0, 0.1, -1.0), 100.0, epsilon = 1e-12);
        assert_relative_eq!(discount(100.0, 0.1, 2.0), 121.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inflation_adjust_cash_flows() {
        let as_of = date(2024, 1, 1);
        let a = MarketAssumptions::default();
        // 364 and 728 days out: exactly one and two bond years
        let adjusted = inflation_adjust_cash_flows(&coupons(), 0.08, as_of, &a);
        assert_eq!(adjusted.len(), 2);
        assert_relative_eq!(adjusted[0], 40.0 / 1.08, epsilon = 1e-9);
        assert_relative_eq!(adjusted[1], 40.0 / 1.08 / 1.08, epsilon = 1e-9);
    }

    #[test]
    fn test_inflation_adjust_face_value_uses_last_entry() {
        let as_of = date(2024, 1, 1);
        let a = MarketAssumptions::default();
        let face = inflation_adjust_face_value(&coupons(), 0.08, as_of, &a).unwrap();
        assert_relative_eq!(face, 1000.0 / 1.08 / 1.08, epsilon = 1e-9);
    }

    #[test]
    fn test_inflation_adjust_face_value_empty_is_missing_data() {
        let empty = CashFlowSchedule::empty(ScheduleKind::Coupon);
        let err = inflation_adjust_face_value(&empty, 0.08, date(2024, 1, 1), &MarketAssumptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);
        assert!(inflation_adjust_cash_flows(&empty, 0.08, date(2024, 1, 1), &MarketAssumptions::default()).is_empty());
    }

    #[test]
    fn test_bond_profit_gross() {
        let inputs = ProfitInputs {
            coupon_sum: 80.0,
            accrued_interest: 5.0,
            face_value: 1000.0,
            price: 950.0,
            maturity: date(2026, 1, 1),
        };
        let profit = bond_profit(&inputs, date(2024, 1, 1), ProfitOptions::gross(), &MarketAssumptions::default());
        assert_eq!(profit, 125.0);
    }

    #[test]
    fn test_bond_profit_short_holding_taxes_coupons_only() {
        let inputs = ProfitInputs {
            coupon_sum: 100.0,
            accrued_interest: 0.0,
            face_value: 1000.0,
            price: 900.0,
            maturity: date(2025, 1, 1),
        };
        let profit = bond_profit(&inputs, date(2024, 1, 1), ProfitOptions::taxed(), &MarketAssumptions::default());
        // 100 discount untaxed + 87 net coupons
        assert_eq!(profit, 187.0);
    }

    #[test]
    fn test_bond_profit_long_holding_taxes_discount() {
        let as_of = date(2024, 1, 1);
        let inputs = ProfitInputs {
            coupon_sum: 100.0,
            accrued_interest: 0.0,
            face_value: 1000.0,
            price: 900.0,
            maturity: as_of.add_days(3 * 364),
        };
        let profit = bond_profit(&inputs, as_of, ProfitOptions::taxed(), &MarketAssumptions::default());
        assert_eq!(profit, 174.0);
    }

    #[test]
    fn test_bond_profit_fees_shrink_price() {
        let a = MarketAssumptions::default()
            .with_exchange_fee(0.01)
            .with_broker_fee(0.01);
        let inputs = ProfitInputs {
            coupon_sum: 0.0,
            accrued_interest: 0.0,
            face_value: 1000.0,
            price: 1000.0,
            maturity: date(2025, 1, 1),
        };
        let profit = bond_profit(
            &inputs,
            date(2024, 1, 1),
            ProfitOptions {
                exchange_fee: true,
                broker_fee: true,
                tax: false,
            },
            &a,
        );
        // 1000 - 1000 * 0.99 * 0.99
        assert_eq!(profit, 19.9);
    }

    #[test]
    fn test_profit_percent() {
        assert_eq!(profit_percent(45.0, 900.0), 5.0);
        assert_eq!(profit_percent(-10.0, 300.0), -3.33);
    }

    #[test]
    fn test_annualized_percent() {
        let as_of = date(2024, 1, 1);
        let a = MarketAssumptions::default();
        assert_eq!(annualized_percent(20.0, as_of.add_days(728), as_of, &a).unwrap(), 10.0);
    }

    #[test]
    fn test_annualized_percent_rejects_past_or_today() {
        let as_of = date(2024, 1, 1);
        let a = MarketAssumptions::default();
        assert!(annualized_percent(20.0, as_of, as_of, &a).is_err());
        assert!(annualized_percent(20.0, as_of.add_days(-1), as_of, &a).is_err());
    }

    #[test]
    fn test_nominal_coupon_yield() {
        assert_relative_eq!(nominal_coupon_yield(77.28, 1000.0).unwrap(), 7.728, epsilon = 1e-12);
        assert!(nominal_coupon_yield(1.0, 0.0).is_err());
    }

    #[test]
    fn test_reinvest_coupons() {
        let r = reinvest_coupons(950.0, 1000.0, &[(40.0, 8.0), (40.0, 8.0)], 2).unwrap();
        assert_relative_eq!(r.coupons[0], 40.0 * 1.04, epsilon = 1e-9);
        assert_relative_eq!(r.coupons[1], 40.0 * 1.04 * 1.04, epsilon = 1e-9);
        assert_relative_eq!(r.face_value, 1000.0 * 1.04 * 1.04 * 1.04, epsilon = 1e-9);
        assert_relative_eq!(r.price / r.face_value, 0.95, epsilon = 1e-12);
    }

    #[test]
    fn test_reinvest_coupons_needs_two_coupons() {
        let err = reinvest_coupons(950.0, 1000.0, &[(40.0, 8.0)], 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);
        assert!(reinvest_coupons(950.0, 1000.0, &[(40.0, 8.0), (40.0, 8.0)], 0).is_err());
    }
}
