//! Bond reference record.

use advisor_core::{AdvisorError, AdvisorResult, Date, MarketAssumptions};
use serde::{Deserialize, Serialize};

use crate::formulas::{normalize_price, years_to_maturity};

/// Issuer sector of a bond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    /// Federal loan bonds and other sovereign issues.
    Government,
    /// Everything else.
    #[default]
    Corporate,
}

/// One traded fixed-income instrument as reported by the exchange.
///
/// Field aliases accept the exchange's upper-case column names so a raw
/// feed row deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    /// Exchange security code.
    #[serde(alias = "SECID")]
    pub secid: String,

    /// ISIN.
    #[serde(default, alias = "ISIN")]
    pub isin: String,

    /// Short display name.
    #[serde(alias = "SHORTNAME")]
    pub name: String,

    /// Issuer name.
    #[serde(default, alias = "EMITTER")]
    pub issuer: String,

    /// Current face value.
    #[serde(alias = "FACEVALUE")]
    pub face_value: f64,

    /// Face value at issue.
    #[serde(alias = "INITIALFACEVALUE")]
    pub initial_face_value: f64,

    /// Face value currency code.
    #[serde(default = "default_currency", alias = "FACEUNIT")]
    pub currency: String,

    /// Annual coupon rate in percent.
    #[serde(default, alias = "COUPONPERCENT")]
    pub coupon_percent: f64,

    /// Cash amount of the next coupon.
    #[serde(default, alias = "COUPONVALUE")]
    pub coupon_value: f64,

    /// Accrued interest.
    #[serde(default, alias = "ACCRUEDINT")]
    pub accrued_interest: f64,

    /// Days between coupons.
    #[serde(default, alias = "COUPONPERIOD")]
    pub coupon_period: u32,

    /// Next coupon date.
    #[serde(default, alias = "NEXTCOUPON", deserialize_with = "Date::deserialize_optional")]
    pub next_coupon: Option<Date>,

    /// Maturity date.
    #[serde(alias = "MATDATE")]
    pub maturity: Date,

    /// Offer (put) date, if any.
    #[serde(default, alias = "OFFERDATE", deserialize_with = "Date::deserialize_optional")]
    pub offer_date: Option<Date>,

    /// Listing tier (1 is the strictest).
    #[serde(default, alias = "LISTLEVEL")]
    pub list_level: u8,

    /// Previous-day price in percent of face value.
    #[serde(default, alias = "PREVPRICE")]
    pub previous_price: Option<f64>,

    /// Yield at the previous weighted-average price, percent.
    #[serde(default, alias = "YIELDATPREVWAPRICE")]
    pub yield_at_previous_price: Option<f64>,

    /// Effective yield reported by the exchange, percent.
    #[serde(default, alias = "EFFECTIVEYIELD")]
    pub effective_yield: Option<f64>,

    /// Issuer sector.
    #[serde(default)]
    pub sector: Sector,

    /// Face value indexed to inflation.
    #[serde(default)]
    pub inflation_linked: bool,

    /// Restricted to qualified investors.
    #[serde(default, alias = "ISQUALIFIEDINVESTORS")]
    pub qualified_only: bool,
}

fn default_currency() -> String {
    "SUR".to_string()
}

impl BondRecord {
    /// Creates a record with the required attributes; the rest default.
    #[must_use]
    pub fn new(
        secid: impl Into<String>,
        name: impl Into<String>,
        face_value: f64,
        maturity: Date,
    ) -> Self {
        Self {
            secid: secid.into(),
            isin: String::new(),
            name: name.into(),
            issuer: String::new(),
            face_value,
            initial_face_value: face_value,
            currency: default_currency(),
            coupon_percent: 0.0,
            coupon_value: 0.0,
            accrued_interest: 0.0,
            coupon_period: 0,
            next_coupon: None,
            maturity,
            offer_date: None,
            list_level: 0,
            previous_price: None,
            yield_at_previous_price: None,
            effective_yield: None,
            sector: Sector::Corporate,
            inflation_linked: false,
            qualified_only: false,
        }
    }

    /// Sets the previous-day price in percent of face.
    #[must_use]
    pub fn with_price(mut self, price_percent: f64) -> Self {
        self.previous_price = Some(price_percent);
        self
    }

    /// Sets coupon rate, cash amount, and period.
    #[must_use]
    pub fn with_coupon(mut self, percent: f64, value: f64, period_days: u32) -> Self {
        self.coupon_percent = percent;
        self.coupon_value = value;
        self.coupon_period = period_days;
        self
    }

    /// Sets the accrued interest.
    #[must_use]
    pub fn with_accrued_interest(mut self, accrued: f64) -> Self {
        self.accrued_interest = accrued;
        self
    }

    /// Sets the issuer sector.
    #[must_use]
    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.sector = sector;
        self
    }

    /// Sets the exchange-reported yields.
    #[must_use]
    pub fn with_yields(mut self, at_previous_price: f64, effective: f64) -> Self {
        self.yield_at_previous_price = Some(at_previous_price);
        self.effective_yield = Some(effective);
        self
    }

    /// Returns true for government issues.
    #[must_use]
    pub fn is_government(&self) -> bool {
        self.sector == Sector::Government
    }

    /// Previous-day price in currency units.
    ///
    /// # Errors
    ///
    /// Returns `MissingData` without a previous price and `InvalidInput`
    /// for a non-positive face value.
    pub fn price(&self) -> AdvisorResult<f64> {
        let percent = self.previous_price.ok_or_else(|| {
            AdvisorError::missing_data(format!("{} has no previous price", self.secid))
        })?;
        normalize_price(percent, self.face_value)
    }

    /// Fractional years to maturity.
    #[must_use]
    pub fn years_to_maturity(&self, as_of: Date, assumptions: &MarketAssumptions) -> f64 {
        years_to_maturity(as_of, self.maturity, assumptions)
    }

    /// Checks the record can enter a valuation on `as_of`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive face value or a maturity on
    /// or before `as_of`.
    pub fn validate(&self, as_of: Date) -> AdvisorResult<()> {
        if self.face_value.is_nan() || self.face_value <= 0.0 {
            return Err(AdvisorError::invalid_input(format!(
                "{}: face value must be positive, got {}",
                self.secid, self.face_value
            )));
        }
        if self.maturity <= as_of {
            return Err(AdvisorError::invalid_input(format!(
                "{}: maturity {} is not after {as_of}",
                self.secid, self.maturity
            )));
        }
        Ok(())
    }
}
