//! Candidate pre-filtering of the bond reference table.
//!
//! Selects the bonds a retail investor can buy and that the profitability
//! model applies to, before any cash-flow work is done.

use std::collections::HashSet;

use advisor_bonds::BondRecord;
use advisor_core::{AdvisorResult, Date, InputIssue};
use serde::{Deserialize, Serialize};

/// Criteria a candidate bond must meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFilter {
    /// Highest accepted initial face value.
    pub max_initial_face_value: f64,

    /// Required face value currency.
    pub currency: String,

    /// Drop issues restricted to qualified investors.
    pub exclude_qualified: bool,

    /// Lowest accepted coupon rate in percent. Rates of 1% or less are
    /// always rejected.
    pub min_coupon_percent: f64,

    /// Shortest accepted coupon period in days.
    pub min_coupon_period: u32,

    /// Longest accepted coupon period in days.
    pub max_coupon_period: u32,

    /// Smallest accepted coupon cash amount.
    pub min_coupon_value: f64,

    /// Keep only government bonds.
    pub government_only: bool,

    /// Corporate yield must be strictly above this percent.
    pub min_corporate_yield: f64,

    /// Corporate yield must be strictly below this percent.
    pub max_corporate_yield: f64,

    /// Keep only inflation-linked bonds; otherwise drop them.
    pub inflation_linked: bool,

    /// Issuer name fragments that disqualify a corporate bond.
    pub excluded_issuer_fragments: Vec<String>,

    /// Issuer name prefixes that disqualify a corporate bond.
    pub excluded_issuer_prefixes: Vec<String>,

    /// Keep only the first bond for each maturity date.
    pub one_per_maturity: bool,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            max_initial_face_value: 1000.0,
            currency: "SUR".to_string(),
            exclude_qualified: true,
            min_coupon_percent: 1.0,
            min_coupon_period: 30,
            max_coupon_period: 182,
            min_coupon_value: 16.0,
            government_only: false,
            min_corporate_yield: 10.0,
            max_corporate_yield: 30.0,
            inflation_linked: false,
            excluded_issuer_fragments: vec![
                "икрофинансовая".to_string(),
                "коллектор".to_string(),
            ],
            excluded_issuer_prefixes: vec!["ООО ".to_string()],
            one_per_maturity: true,
        }
    }
}

impl CandidateFilter {
    /// Creates a filter with default criteria.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter for government bonds only.
    #[must_use]
    pub fn government() -> Self {
        Self {
            government_only: true,
            ..Self::default()
        }
    }

    /// Sets the coupon period range.
    #[must_use]
    pub fn with_coupon_period(mut self, min_days: u32, max_days: u32) -> Self {
        self.min_coupon_period = min_days;
        self.max_coupon_period = max_days;
        self
    }

    /// Sets the minimum coupon rate.
    #[must_use]
    pub fn with_min_coupon_percent(mut self, percent: f64) -> Self {
        self.min_coupon_percent = percent;
        self
    }

    /// Lists every inconsistency in the criteria.
    #[must_use]
    pub fn issues(&self) -> Vec<InputIssue> {
        let mut issues = Vec::new();
        if self.min_coupon_period > self.max_coupon_period {
            issues.push(InputIssue::new(
                "min_coupon_period",
                format!(
                    "Coupon period range [{}, {}] is inverted",
                    self.min_coupon_period, self.max_coupon_period
                ),
                "ordering",
            ));
        }
        if self.min_corporate_yield >= self.max_corporate_yield {
            issues.push(InputIssue::new(
                "min_corporate_yield",
                format!(
                    "Corporate yield range ({}, {}) is empty",
                    self.min_corporate_yield, self.max_corporate_yield
                ),
                "ordering",
            ));
        }
        if self.currency.trim().is_empty() {
            issues.push(InputIssue::new("currency", "Currency cannot be empty", "required"));
        }
        issues
    }

    /// Checks the criteria are consistent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an inverted coupon period or yield range,
    /// or an empty currency.
    pub fn check(&self) -> AdvisorResult<()> {
        InputIssue::first_as_error(self.issues())
    }

    /// Returns true if `bond` passes every criterion on `as_of`.
    pub fn matches(&self, bond: &BondRecord, as_of: Date) -> bool {
        let tradeable = bond.initial_face_value <= self.max_initial_face_value
            && bond.currency == self.currency
            && !(self.exclude_qualified && bond.qualified_only)
            && bond.previous_price.is_some()
            && bond.maturity > as_of
            && bond.initial_face_value == bond.face_value;

        let coupon = bond.coupon_percent > 1.0
            && bond.coupon_percent >= self.min_coupon_percent
            && (self.min_coupon_period..=self.max_coupon_period).contains(&bond.coupon_period)
            && bond.coupon_value >= self.min_coupon_value;

        let segment = if self.government_only {
            bond.is_government()
        } else {
            !bond.is_government() && self.corporate_yield_in_range(bond) && !self.excluded_issuer(bond)
        };

        tradeable && coupon && segment && bond.inflation_linked == self.inflation_linked
    }

    /// Keeps the matching bonds, in input order.
    pub fn apply(&self, bonds: &[BondRecord], as_of: Date) -> Vec<BondRecord> {
        let mut seen = HashSet::new();
        bonds
            .iter()
            .filter(|b| self.matches(b, as_of))
            .filter(|b| !self.one_per_maturity || seen.insert(b.maturity))
            .cloned()
            .collect()
    }

    fn corporate_yield_in_range(&self, bond: &BondRecord) -> bool {
        bond.yield_at_previous_price
            .is_some_and(|y| y > self.min_corporate_yield && y < self.max_corporate_yield)
    }

    fn excluded_issuer(&self, bond: &BondRecord) -> bool {
        self.excluded_issuer_fragments
            .iter()
            .any(|f| bond.issuer.contains(f.as_str()))
            || self
                .excluded_issuer_prefixes
                .iter()
                .any(|p| bond.issuer.starts_with(p.as_str()))
    }
}
