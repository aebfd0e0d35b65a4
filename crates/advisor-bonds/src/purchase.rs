//! Funded purchase of a single bond held to maturity.

use advisor_core::{AdvisorError, AdvisorResult, Date, MarketAssumptions};
use serde::{Deserialize, Serialize};

use crate::record::BondRecord;

/// Funds assumed when none are given.
pub const DEFAULT_FUNDS: f64 = 30_000.0;

/// Coupon period assumed when none is given, in days.
pub const DEFAULT_COUPON_PERIOD: u32 = 182;

/// A plan to spend `funds` on one bond and hold it to maturity.
///
/// Fees are absolute amounts per bond, computed from the purchase price and
/// the rates in [`MarketAssumptions`].
///
/// # Example
///
/// ```rust
/// use advisor_bonds::BondPurchase;
/// use advisor_core::{Date, MarketAssumptions};
///
/// let plan = BondPurchase::builder()
///     .price_percent(90.21)
///     .coupon(38.64)
///     .accrued_interest(0.2)
///     .maturity(Date::from_ymd(2026, 9, 16).unwrap())
///     .funds(30_000.0)
///     .build(&MarketAssumptions::default())
///     .unwrap();
///
/// assert_eq!(plan.quantity(), 33);
/// assert_eq!(plan.payments_per_year(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondPurchase {
    price: f64,
    face_value: f64,
    coupon: f64,
    accrued_interest: f64,
    coupon_period: u32,
    currency: String,
    next_coupon: Option<Date>,
    maturity: Date,
    offer_date: Option<Date>,
    funds: f64,
    year_days: u32,
    broker_fee: f64,
    exchange_fee: f64,
    tax_rate: f64,
}

impl BondPurchase {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> BondPurchaseBuilder {
        BondPurchaseBuilder::new()
    }

    /// Builds a plan from an exchange record.
    ///
    /// # Errors
    ///
    /// Returns `MissingData` if the record has no previous price, and the
    /// builder's errors otherwise.
    pub fn from_record(
        record: &BondRecord,
        funds: f64,
        assumptions: &MarketAssumptions,
    ) -> AdvisorResult<Self> {
        let price_percent = record.previous_price.ok_or_else(|| {
            AdvisorError::missing_data(format!("{} has no previous price", record.secid))
        })?;

        let mut builder = Self::builder()
            .price_percent(price_percent)
            .face_value(record.face_value)
            .coupon(record.coupon_value)
            .accrued_interest(record.accrued_interest)
            .currency(record.currency.clone())
            .maturity(record.maturity)
            .funds(funds);
        if record.coupon_period > 0 {
            builder = builder.coupon_period(record.coupon_period);
        }
        if let Some(next) = record.next_coupon {
            builder = builder.next_coupon(next);
        }
        if let Some(offer) = record.offer_date {
            builder = builder.offer_date(offer);
        }
        builder.build(assumptions)
    }

    /// Purchase price per bond in currency units.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Face value per bond.
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Face value currency.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Next coupon date.
    pub fn next_coupon(&self) -> Option<Date> {
        self.next_coupon
    }

    /// Maturity date.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Offer date.
    pub fn offer_date(&self) -> Option<Date> {
        self.offer_date
    }

    /// Coupons per year: `round(year_days / coupon_period)`.
    pub fn payments_per_year(&self) -> u32 {
        (f64::from(self.year_days) / f64::from(self.coupon_period)).round() as u32
    }

    /// Broker fee per bond.
    pub fn broker_fee(&self) -> f64 {
        self.broker_fee
    }

    /// Exchange fee per bond.
    pub fn exchange_fee(&self) -> f64 {
        self.exchange_fee
    }

    /// Tax on the discount, charged only when bought below face.
    pub fn tax_on_discount(&self) -> f64 {
        if self.price < self.face_value {
            (self.face_value - self.price) * self.tax_rate
        } else {
            0.0
        }
    }

    /// Tax on one coupon.
    pub fn tax_on_coupon(&self) -> f64 {
        self.coupon * self.tax_rate
    }

    /// Coupon income to maturity less the accrued interest paid on purchase.
    ///
    /// Counts whole bond years to maturity, then adds the next coupon:
    ///
    /// ```text
    /// floor(days / year_days) * payments_per_year * coupon + coupon - aci
    /// ```
    pub fn coupon_without_aci(&self, as_of: Date) -> f64 {
        let days = as_of.days_between(&self.maturity).max(0);
        let whole_years = days / i64::from(self.year_days);
        let full_year_coupons = f64::from(self.payments_per_year()) * self.coupon;
        whole_years as f64 * full_year_coupons + self.coupon - self.accrued_interest
    }

    /// Coupon income net of accrued interest and coupon tax.
    pub fn coupon_without_fee(&self, as_of: Date) -> f64 {
        self.coupon_without_aci(as_of) - self.tax_on_coupon()
    }

    /// Whole bonds affordable at `price + aci + broker_fee` each.
    pub fn quantity(&self) -> u64 {
        let unit_cost = self.price + self.accrued_interest + self.broker_fee;
        if unit_cost <= 0.0 {
            return 0;
        }
        (self.funds / unit_cost).floor().max(0.0) as u64
    }

    /// Price of all bonds bought.
    pub fn purchase_amount(&self) -> f64 {
        self.price * self.quantity() as f64
    }

    /// Income from holding all bonds to maturity.
    pub fn income(&self, as_of: Date) -> f64 {
        let per_bond = self.face_value - self.price - self.tax_on_discount()
            + self.coupon_without_fee(as_of);
        per_bond * self.quantity() as f64
    }

    /// Holding-period return as a fraction of the purchase amount.
    ///
    /// # Errors
    ///
    /// Returns `MissingData` when the funds do not cover a single bond.
    pub fn profitability(&self, as_of: Date) -> AdvisorResult<f64> {
        if self.quantity() == 0 {
            return Err(AdvisorError::missing_data(format!(
                "funds {} do not cover one bond",
                self.funds
            )));
        }
        Ok(self.income(as_of) / self.purchase_amount())
    }
}

/// Builder for [`BondPurchase`].
#[derive(Debug, Clone, Default)]
pub struct BondPurchaseBuilder {
    price_percent: Option<f64>,
    face_value: Option<f64>,
    coupon: Option<f64>,
    accrued_interest: Option<f64>,
    coupon_period: Option<u32>,
    currency: Option<String>,
    next_coupon: Option<Date>,
    maturity: Option<Date>,
    offer_date: Option<Date>,
    funds: Option<f64>,
}

impl BondPurchaseBuilder {
    /// Creates a builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the price in percent of face value.
    #[must_use]
    pub fn price_percent(mut self, percent: f64) -> Self {
        self.price_percent = Some(percent);
        self
    }

    /// Sets the face value (default 1000).
    #[must_use]
    pub fn face_value(mut self, face_value: f64) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the cash amount of one coupon.
    #[must_use]
    pub fn coupon(mut self, coupon: f64) -> Self {
        self.coupon = Some(coupon);
        self
    }

    /// Sets the accrued interest paid to the seller.
    #[must_use]
    pub fn accrued_interest(mut self, accrued: f64) -> Self {
        self.accrued_interest = Some(accrued);
        self
    }

    /// Sets the coupon period in days (default 182).
    #[must_use]
    pub fn coupon_period(mut self, days: u32) -> Self {
        self.coupon_period = Some(days);
        self
    }

    /// Sets the currency code.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets the next coupon date.
    #[must_use]
    pub fn next_coupon(mut self, date: Date) -> Self {
        self.next_coupon = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity(mut self, date: Date) -> Self {
        self.maturity = Some(date);
        self
    }

    /// Sets the offer date.
    #[must_use]
    pub fn offer_date(mut self, date: Date) -> Self {
        self.offer_date = Some(date);
        self
    }

    /// Sets the available funds (default 30000).
    #[must_use]
    pub fn funds(mut self, funds: f64) -> Self {
        self.funds = Some(funds);
        self
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `MissingData` without a price or maturity, and `InvalidInput`
    /// for a non-positive face value or a zero coupon period.
    pub fn build(self, assumptions: &MarketAssumptions) -> AdvisorResult<BondPurchase> {
        let price_percent = self
            .price_percent
            .ok_or_else(|| AdvisorError::missing_data("price_percent is required"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| AdvisorError::missing_data("maturity is required"))?;

        let face_value = self.face_value.unwrap_or(1000.0);
        if face_value.is_nan() || face_value <= 0.0 {
            return Err(AdvisorError::invalid_input(format!(
                "face value must be positive, got {face_value}"
            )));
        }
        let coupon_period = self.coupon_period.unwrap_or(DEFAULT_COUPON_PERIOD);
        if coupon_period == 0 {
            return Err(AdvisorError::invalid_input("coupon period must be positive"));
        }
        assumptions.check()?;

        let price = face_value * price_percent / 100.0;
        Ok(BondPurchase {
            price,
            face_value,
            coupon: self.coupon.unwrap_or(0.0),
            accrued_interest: self.accrued_interest.unwrap_or(0.0),
            coupon_period,
            currency: self.currency.unwrap_or_default(),
            next_coupon: self.next_coupon,
            maturity,
            offer_date: self.offer_date,
            funds: self.funds.unwrap_or(DEFAULT_FUNDS),
            year_days: assumptions.year_days,
            broker_fee: price * assumptions.broker_fee,
            exchange_fee: price * assumptions.exchange_fee,
            tax_rate: assumptions.tax_rate,
        })
    }
}
