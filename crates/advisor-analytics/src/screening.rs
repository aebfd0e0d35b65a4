//! Bond screening and enrichment.
//!
//! A run takes candidate [`BondRecord`]s in table order and, per bond:
//!
//! 1. Drops it if its amortization schedule has more than one entry.
//! 2. Normalizes the price and checks the maturity is in the future.
//! 3. For the five- and ten-year inflation horizons, discounts the future
//!    coupons and the final face value by inflation, computes the after-tax
//!    profit and annualizes it.
//!
//! Rows whose five-year figure is not strictly positive are dropped: only
//! bonds that beat inflation are shown. The nominal variant stops after
//! step 1.
//!
//! Per-bond failures never abort a run. They are recorded as exclusions in
//! the [`ScreeningReport`].

use advisor_bonds::formulas::{
    annualized_percent, bond_profit, inflation_adjust_cash_flows, inflation_adjust_face_value,
    profit_percent,
};
use advisor_bonds::{BondRecord, ProfitInputs, ProfitOptions};
use advisor_core::{
    AdvisorError, AdvisorResult, CashFlowSchedule, Date, ErrorKind, MarketAssumptions,
};
use serde::{Deserialize, Serialize};

use crate::config::ScreeningConfig;
use crate::inflation::InflationHorizons;
use crate::parallel::maybe_parallel_map;
use crate::source::ScheduleSource;

/// Column labels of the screened table.
pub mod labels {
    /// Security code.
    pub const ID: &str = "ID";
    /// Display name.
    pub const NAME: &str = "Name";
    /// Maturity date.
    pub const MATURITY: &str = "Maturity date";
    /// Previous price in percent of face.
    pub const PRICE: &str = "Price, %";
    /// Yield at the previous weighted-average price.
    pub const YIELD: &str = "Yield, %";
    /// Exchange-reported effective yield.
    pub const EFFECTIVE: &str = "Effective, %";
    /// Annualized after-tax yield discounted by five-year inflation.
    pub const REAL_5Y: &str = "% per year (5y inflation)";
    /// Annualized after-tax yield discounted by ten-year inflation.
    pub const REAL_10Y: &str = "% per year (10y inflation)";
    /// Coupon rate.
    pub const COUPON_PERCENT: &str = "Coupon, %";
    /// Coupon cash amount.
    pub const COUPON_VALUE: &str = "Coupon value";
    /// Accrued interest.
    pub const ACI: &str = "ACI";
    /// Next coupon date.
    pub const NEXT_COUPON: &str = "Next coupon";
    /// Coupon period in days.
    pub const COUPON_PERIOD: &str = "Coupon period";
    /// Face value at issue.
    pub const INITIAL_FACE: &str = "Initial face value";
    /// Current face value.
    pub const FACE: &str = "Face value";
    /// Listing tier.
    pub const LISTING: &str = "Listing level";
    /// Issuer name.
    pub const ISSUER: &str = "Issuer";
}

/// One row of the investor-facing table.
///
/// Serializes with the column labels as keys. The two inflation columns are
/// omitted in the nominal variant. Fields mirror the constants in [`labels`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenedBond {
    #[serde(rename = "ID")]
    pub secid: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Maturity date")]
    pub maturity: Date,
    #[serde(rename = "Price, %")]
    pub price_percent: Option<f64>,
    #[serde(rename = "Yield, %")]
    pub yield_percent: Option<f64>,
    #[serde(rename = "Effective, %")]
    pub effective_yield: Option<f64>,
    #[serde(
        rename = "% per year (5y inflation)",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub real_yield_5y: Option<f64>,
    #[serde(
        rename = "% per year (10y inflation)",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub real_yield_10y: Option<f64>,
    #[serde(rename = "Coupon, %")]
    pub coupon_percent: f64,
    #[serde(rename = "Coupon value")]
    pub coupon_value: f64,
    #[serde(rename = "ACI")]
    pub accrued_interest: f64,
    #[serde(rename = "Next coupon")]
    pub next_coupon: Option<Date>,
    #[serde(rename = "Coupon period")]
    pub coupon_period: u32,
    #[serde(rename = "Initial face value")]
    pub initial_face_value: f64,
    #[serde(rename = "Face value")]
    pub face_value: f64,
    #[serde(rename = "Listing level")]
    pub list_level: u8,
    #[serde(rename = "Issuer")]
    pub issuer: String,
}

impl ScreenedBond {
    fn from_record(record: &BondRecord, yields: Option<InflationYields>) -> Self {
        Self {
            secid: record.secid.clone(),
            name: record.name.clone(),
            maturity: record.maturity,
            price_percent: record.previous_price,
            yield_percent: record.yield_at_previous_price,
            effective_yield: record.effective_yield,
            real_yield_5y: yields.map(|y| y.five_year),
            real_yield_10y: yields.map(|y| y.ten_year),
            coupon_percent: record.coupon_percent,
            coupon_value: record.coupon_value,
            accrued_interest: record.accrued_interest,
            next_coupon: record.next_coupon,
            coupon_period: record.coupon_period,
            initial_face_value: record.initial_face_value,
            face_value: record.face_value,
            list_level: record.list_level,
            issuer: record.issuer.clone(),
        }
    }

    /// Column labels in display order.
    #[must_use]
    pub fn labels(inflation_adjusted: bool) -> Vec<&'static str> {
        use labels::*;
        let mut cols = vec![ID, NAME, MATURITY, PRICE, YIELD, EFFECTIVE];
        if inflation_adjusted {
            cols.extend([REAL_5Y, REAL_10Y]);
        }
        cols.extend([
            COUPON_PERCENT,
            COUPON_VALUE,
            ACI,
            NEXT_COUPON,
            COUPON_PERIOD,
            INITIAL_FACE,
            FACE,
            LISTING,
            ISSUER,
        ]);
        cols
    }

    /// Cell values rendered as text, aligned with [`labels`](Self::labels).
    ///
    /// Missing values render as empty strings.
    #[must_use]
    pub fn cells(&self, inflation_adjusted: bool) -> Vec<String> {
        fn opt<T: ToString>(v: Option<T>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }

        let mut cells = vec![
            self.secid.clone(),
            self.name.clone(),
            self.maturity.to_string(),
            opt(self.price_percent),
            opt(self.yield_percent),
            opt(self.effective_yield),
        ];
        if inflation_adjusted {
            cells.push(opt(self.real_yield_5y));
            cells.push(opt(self.real_yield_10y));
        }
        cells.extend([
            self.coupon_percent.to_string(),
            self.coupon_value.to_string(),
            self.accrued_interest.to_string(),
            opt(self.next_coupon),
            self.coupon_period.to_string(),
            self.initial_face_value.to_string(),
            self.face_value.to_string(),
            self.list_level.to_string(),
            self.issuer.clone(),
        ]);
        cells
    }
}

/// Why a candidate is missing from the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// More than one amortization entry.
    Amortizing,
    /// Five-year inflation-adjusted yield is not positive.
    NotBeatingInflation {
        /// The annualized five-year figure.
        real_yield_5y: f64,
    },
    /// The record could not be valued.
    Failed {
        /// Error taxonomy bucket.
        kind: ErrorKind,
        /// Error description.
        message: String,
    },
}

impl From<AdvisorError> for ExclusionReason {
    fn from(err: AdvisorError) -> Self {
        Self::Failed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// A dropped candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    /// Security code.
    pub secid: String,
    /// Reason it was dropped.
    #[serde(flatten)]
    pub reason: ExclusionReason,
}

/// Result of a screening run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningReport {
    /// Kept rows, in input order.
    pub bonds: Vec<ScreenedBond>,
    /// Dropped candidates, in input order.
    pub excluded: Vec<Exclusion>,
    /// Whether the inflation columns are populated.
    pub inflation_adjusted: bool,
}

impl ScreeningReport {
    /// Column labels for the kept rows.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        ScreenedBond::labels(self.inflation_adjusted)
    }

    /// Number of candidates dropped as amortizing.
    #[must_use]
    pub fn amortizing_count(&self) -> usize {
        self.excluded
            .iter()
            .filter(|e| e.reason == ExclusionReason::Amortizing)
            .count()
    }
}

/// Annualized after-tax yields of one bond under both inflation horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationYields {
    /// Percent per year with five-year inflation.
    pub five_year: f64,
    /// Percent per year with ten-year inflation.
    pub ten_year: f64,
}

/// Annualized after-tax yield of holding `record` to maturity, in percent,
/// with every future cash flow discounted by `inflation_rate`.
///
/// An empty future coupon schedule contributes zero coupons and zero face
/// value.
///
/// # Errors
///
/// Returns `MissingData` without a previous price and `InvalidInput` for a
/// non-positive price or face value or a maturity on or before `as_of`.
pub fn real_annual_yield(
    record: &BondRecord,
    coupons: &CashFlowSchedule,
    inflation_rate: f64,
    as_of: Date,
    assumptions: &MarketAssumptions,
) -> AdvisorResult<f64> {
    record.validate(as_of)?;
    let price = record.price()?;
    if price <= 0.0 {
        return Err(AdvisorError::invalid_input(format!(
            "{}: price must be positive, got {price}",
            record.secid
        )));
    }

    let future = coupons.future(as_of);
    let face_value = match inflation_adjust_face_value(&future, inflation_rate, as_of, assumptions) {
        Ok(face) => face,
        Err(err) if err.is_recoverable() => {
            tracing::debug!(secid = %record.secid, "No future coupons, counting zero face value");
            0.0
        }
        Err(err) => return Err(err),
    };
    let coupon_sum: f64 = inflation_adjust_cash_flows(&future, inflation_rate, as_of, assumptions)
        .iter()
        .sum();

    let inputs = ProfitInputs {
        coupon_sum,
        accrued_interest: record.accrued_interest,
        face_value,
        price,
        maturity: record.maturity,
    };
    let profit = bond_profit(&inputs, as_of, ProfitOptions::taxed(), assumptions);
    annualized_percent(profit_percent(profit, price), record.maturity, as_of, assumptions)
}

/// [`real_annual_yield`] for both horizons.
///
/// # Errors
///
/// Same as [`real_annual_yield`].
pub fn inflation_adjusted_yields(
    record: &BondRecord,
    coupons: &CashFlowSchedule,
    horizons: InflationHorizons,
    as_of: Date,
    assumptions: &MarketAssumptions,
) -> AdvisorResult<InflationYields> {
    Ok(InflationYields {
        five_year: real_annual_yield(record, coupons, horizons.five_year, as_of, assumptions)?,
        ten_year: real_annual_yield(record, coupons, horizons.ten_year, as_of, assumptions)?,
    })
}

enum Outcome {
    Kept(ScreenedBond),
    Excluded(Exclusion),
}

impl Outcome {
    fn excluded(record: &BondRecord, reason: ExclusionReason) -> Self {
        Self::Excluded(Exclusion {
            secid: record.secid.clone(),
            reason,
        })
    }
}

/// Runs the screening pipeline against a schedule source.
///
/// # Example
///
/// ```rust
/// use advisor_analytics::{InflationHorizons, ScheduleBook, Screener};
/// use advisor_bonds::BondRecord;
/// use advisor_core::{Date, MarketAssumptions, ScheduleEntry, ScheduleKind};
///
/// let as_of = Date::from_ymd(2024, 1, 1).unwrap();
/// let bond = BondRecord::new("RU000A1", "Example", 1000.0, as_of.add_days(728))
///     .with_price(95.0)
///     .with_coupon(16.0, 80.0, 182);
/// let book = ScheduleBook::new().with(
///     "RU000A1",
///     ScheduleKind::Coupon,
///     vec![
///         ScheduleEntry::new(as_of.add_days(364), 1000.0, 80.0, 16.0),
///         ScheduleEntry::new(as_of.add_days(728), 1000.0, 80.0, 16.0),
///     ],
/// );
///
/// let screener = Screener::new(&book, MarketAssumptions::default(), as_of).unwrap();
/// let report = screener.screen(&[bond], InflationHorizons::new(0.07, 0.08));
/// assert_eq!(report.bonds.len(), 1);
/// assert!(report.bonds[0].real_yield_5y.unwrap() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Screener<S> {
    source: S,
    assumptions: MarketAssumptions,
    config: ScreeningConfig,
    as_of: Date,
}

impl<S: ScheduleSource + Sync> Screener<S> {
    /// Creates a screener valuing on `as_of`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `assumptions` fail [`MarketAssumptions::check`].
    pub fn new(source: S, assumptions: MarketAssumptions, as_of: Date) -> AdvisorResult<Self> {
        assumptions.check()?;
        Ok(Self {
            source,
            assumptions,
            config: ScreeningConfig::default(),
            as_of,
        })
    }

    /// Sets the execution config.
    #[must_use]
    pub fn with_config(mut self, config: ScreeningConfig) -> Self {
        self.config = config;
        self
    }

    /// Valuation date.
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Inflation-adjusted screening.
    ///
    /// Every kept row has a strictly positive five-year figure.
    pub fn screen(&self, bonds: &[BondRecord], horizons: InflationHorizons) -> ScreeningReport {
        let outcomes = maybe_parallel_map(bonds, &self.config, |record| {
            self.screen_one(record, Some(horizons))
        });
        self.collect(outcomes, true)
    }

    /// Amortization exclusion and relabeling only.
    pub fn screen_nominal(&self, bonds: &[BondRecord]) -> ScreeningReport {
        let outcomes = maybe_parallel_map(bonds, &self.config, |record| {
            self.screen_one(record, None)
        });
        self.collect(outcomes, false)
    }

    fn screen_one(&self, record: &BondRecord, horizons: Option<InflationHorizons>) -> Outcome {
        if self.source.amortizations(&record.secid).is_amortizing() {
            tracing::debug!(secid = %record.secid, "Excluding amortizing bond");
            return Outcome::excluded(record, ExclusionReason::Amortizing);
        }

        let Some(horizons) = horizons else {
            return Outcome::Kept(ScreenedBond::from_record(record, None));
        };

        let coupons = self.source.coupons(&record.secid);
        match inflation_adjusted_yields(record, &coupons, horizons, self.as_of, &self.assumptions) {
            Ok(yields) if yields.five_year > 0.0 => {
                Outcome::Kept(ScreenedBond::from_record(record, Some(yields)))
            }
            Ok(yields) => {
                tracing::debug!(
                    secid = %record.secid,
                    real_yield_5y = yields.five_year,
                    "Bond does not beat inflation"
                );
                Outcome::excluded(
                    record,
                    ExclusionReason::NotBeatingInflation {
                        real_yield_5y: yields.five_year,
                    },
                )
            }
            Err(err) => {
                tracing::warn!(secid = %record.secid, error = %err, "Failed to value bond");
                Outcome::excluded(record, err.into())
            }
        }
    }

    fn collect(&self, outcomes: Vec<Outcome>, inflation_adjusted: bool) -> ScreeningReport {
        let mut report = ScreeningReport {
            inflation_adjusted,
            ..ScreeningReport::default()
        };
        for outcome in outcomes {
            match outcome {
                Outcome::Kept(bond) => report.bonds.push(bond),
                Outcome::Excluded(exclusion) => report.excluded.push(exclusion),
            }
        }

        tracing::info!(
            as_of = %self.as_of,
            inflation_adjusted,
            kept = report.bonds.len(),
            excluded = report.excluded.len(),
            "Screening complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScheduleBook;
    use advisor_core::{ScheduleEntry, ScheduleKind};
    use approx::assert_relative_eq;

    fn as_of() -> Date {
        Date::from_ymd(2024, 1, 1).unwrap()
    }

    fn bond(code: &str) -> BondRecord {
        BondRecord::new(code, code, 1000.0, as_of().add_days(728))
            .with_price(95.0)
            .with_coupon(16.0, 80.0, 182)
    }

    fn two_coupons() -> Vec<ScheduleEntry> {
        vec![
            ScheduleEntry::new(as_of().add_days(364), 1000.0, 80.0, 16.0),
            ScheduleEntry::new(as_of().add_days(728), 1000.0, 80.0, 16.0),
        ]
    }

    #[test]
    fn test_real_annual_yield_without_inflation() {
        let coupons = CashFlowSchedule::new(ScheduleKind::Coupon, two_coupons());
        let a = MarketAssumptions::default();
        let y = real_annual_yield(&bond("A"), &coupons, 0.0, as_of(), &a).unwrap();
        // profit = 50 + 160 * 0.87 = 189.2; 189.2 / 950 = 19.92%; over 2 years
        assert_relative_eq!(y, 9.96, epsilon = 1e-12);
    }

    #[test]
    fn test_real_annual_yield_discounts() {
        let coupons = CashFlowSchedule::new(ScheduleKind::Coupon, two_coupons());
        let a = MarketAssumptions::default();
        let nominal = real_annual_yield(&bond("A"), &coupons, 0.0, as_of(), &a).unwrap();
        let real = real_annual_yield(&bond("A"), &coupons, 0.08, as_of(), &a).unwrap();
        assert!(real < nominal);
    }

    #[test]
    fn test_empty_coupons_count_as_zero() {
        let empty = CashFlowSchedule::empty(ScheduleKind::Coupon);
        let a = MarketAssumptions::default();
        let y = real_annual_yield(&bond("A"), &empty, 0.05, as_of(), &a).unwrap();
        // -950 / 950 = -100% over 2 years
        assert_relative_eq!(y, -50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_maturity_today_is_invalid() {
        let mut b = bond("A");
        b.maturity = as_of();
        let coupons = CashFlowSchedule::new(ScheduleKind::Coupon, two_coupons());
        let err = real_annual_yield(&b, &coupons, 0.05, as_of(), &MarketAssumptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_screen_outcomes() {
        let amortizing = vec![
            ScheduleEntry::new(as_of().add_days(364), 500.0, 500.0, 50.0),
            ScheduleEntry::new(as_of().add_days(728), 500.0, 500.0, 50.0),
        ];
        let book = ScheduleBook::new()
            .with("GOOD", ScheduleKind::Coupon, two_coupons())
            .with("AMORT", ScheduleKind::Coupon, two_coupons())
            .with("AMORT", ScheduleKind::Amortization, amortizing)
            .with("SINGLE", ScheduleKind::Coupon, two_coupons())
            .with(
                "SINGLE",
                ScheduleKind::Amortization,
                vec![ScheduleEntry::new(as_of().add_days(728), 1000.0, 1000.0, 100.0)],
            );
        let mut unpriced = bond("NOPRICE");
        unpriced.previous_price = None;
        let bonds = vec![bond("GOOD"), bond("AMORT"), bond("NOCOUPONS"), unpriced, bond("SINGLE")];

        let screener = Screener::new(&book, MarketAssumptions::default(), as_of()).unwrap()
            .with_config(ScreeningConfig::sequential());
        let report = screener.screen(&bonds, InflationHorizons::new(0.07, 0.08));

        let kept: Vec<&str> = report.bonds.iter().map(|b| b.secid.as_str()).collect();
        assert_eq!(kept, vec!["GOOD", "SINGLE"]);
        assert_eq!(report.excluded.len(), 3);
        assert_eq!(report.excluded[0].reason, ExclusionReason::Amortizing);
        assert!(matches!(report.excluded[1].reason, ExclusionReason::NotBeatingInflation { .. }));
        assert!(matches!(
            report.excluded[2].reason,
            ExclusionReason::Failed { kind: ErrorKind::MissingData, .. }
        ));
        assert_eq!(report.amortizing_count(), 1);
    }

    #[test]
    fn test_new_rejects_unusable_assumptions() {
        let book = ScheduleBook::new();
        let err = Screener::new(&book, MarketAssumptions::default().with_year_days(0), as_of()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("year_days"));
    }

    #[test]
    fn test_screen_nominal_only_drops_amortizing() {
        let book = ScheduleBook::new().with(
            "AMORT",
            ScheduleKind::Amortization,
            vec![
                ScheduleEntry::new(as_of().add_days(364), 500.0, 500.0, 50.0),
                ScheduleEntry::new(as_of().add_days(728), 500.0, 500.0, 50.0),
            ],
        );
        let screener = Screener::new(&book, MarketAssumptions::default(), as_of()).unwrap();
        let report = screener.screen_nominal(&[bond("A"), bond("AMORT"), bond("NOCOUPONS")]);
        assert_eq!(report.bonds.len(), 2);
        assert!(!report.inflation_adjusted);
        assert!(report.bonds.iter().all(|b| b.real_yield_5y.is_none()));
    }

    #[test]
    fn test_labels() {
        let nominal = ScreenedBond::labels(false);
        let adjusted = ScreenedBond::labels(true);
        assert_eq!(nominal.len(), 15);
        assert_eq!(adjusted.len(), 17);
        assert_eq!(adjusted[6], labels::REAL_5Y);
        assert_eq!(adjusted[7], labels::REAL_10Y);
        assert_eq!(nominal[6], labels::COUPON_PERCENT);
        assert_eq!(adjusted.last(), Some(&labels::ISSUER));
    }

    #[test]
    fn test_cells_align_with_labels() {
        let row = ScreenedBond::from_record(&bond("A"), None);
        assert_eq!(row.cells(false).len(), ScreenedBond::labels(false).len());
        assert_eq!(row.cells(true).len(), ScreenedBond::labels(true).len());
        assert_eq!(row.cells(false)[2], "2025-12-29");
    }

    #[test]
    fn test_json_keys_are_labels() {
        let row = ScreenedBond::from_record(
            &bond("A"),
            Some(InflationYields {
                five_year: 1.5,
                ten_year: 1.2,
            }),
        );
        let json = serde_json::to_value(&row).unwrap();
        let obj = json.as_object().unwrap();
        for label in ScreenedBond::labels(true) {
            assert!(obj.contains_key(label), "missing {label}");
        }

        let nominal = serde_json::to_value(ScreenedBond::from_record(&bond("A"), None)).unwrap();
        assert!(!nominal.as_object().unwrap().contains_key(labels::REAL_5Y));
    }
}
