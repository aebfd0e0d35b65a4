//! Curve sampling for plotting and comparison with observed yields.

use advisor_bonds::BondRecord;
use advisor_core::{AdvisorResult, Date, InputIssue, MarketAssumptions};
use serde::{Deserialize, Serialize};

use crate::model::ZeroCurve;

/// Evenly spaced maturities, endpoints included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveGrid {
    /// First maturity in years.
    pub start: f64,
    /// Last maturity in years.
    pub end: f64,
    /// Number of maturities.
    pub points: usize,
}

impl Default for CurveGrid {
    fn default() -> Self {
        Self {
            start: 0.01,
            end: 20.0,
            points: 1500,
        }
    }
}

impl CurveGrid {
    /// Creates a grid.
    #[must_use]
    pub fn new(start: f64, end: f64, points: usize) -> Self {
        Self { start, end, points }
    }

    /// Lists every rule the grid breaks.
    #[must_use]
    pub fn issues(&self) -> Vec<InputIssue> {
        let mut issues = Vec::new();
        if self.points < 2 {
            issues.push(InputIssue::new(
                "points",
                format!("Grid needs at least two points, got {}", self.points),
                "minimum",
            ));
        }
        if !(self.end > self.start) {
            issues.push(InputIssue::new(
                "end",
                format!("Grid end {} must exceed start {}", self.end, self.start),
                "ordering",
            ));
        }
        issues
    }

    /// Checks the grid is non-degenerate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for fewer than two points or `end <= start`.
    pub fn validate(&self) -> AdvisorResult<()> {
        InputIssue::first_as_error(self.issues())
    }

    /// The maturities of the grid.
    ///
    /// # Errors
    ///
    /// Returns the [`validate`](Self::validate) error for a degenerate grid.
    pub fn maturities(&self) -> AdvisorResult<Vec<f64>> {
        self.validate()?;
        let step = (self.end - self.start) / (self.points - 1) as f64;
        let mut grid: Vec<f64> = (0..self.points)
            .map(|i| self.start + step * i as f64)
            .collect();
        if let Some(last) = grid.last_mut() {
            *last = self.end;
        }
        Ok(grid)
    }
}

/// One sampled maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Maturity in years.
    pub maturity: f64,
    /// Spot yield, effective annual percent.
    pub spot_percent: f64,
    /// Forward yield, effective annual percent.
    pub forward_percent: f64,
}

/// Samples spot and forward yields across `grid`.
///
/// # Errors
///
/// Returns `InvalidInput` for a degenerate grid.
pub fn sample_curve<C: ZeroCurve + ?Sized>(curve: &C, grid: &CurveGrid) -> AdvisorResult<Vec<CurvePoint>> {
    Ok(grid
        .maturities()?
        .into_iter()
        .map(|t| CurvePoint {
            maturity: t,
            spot_percent: curve.annual_yield_percent(t),
            forward_percent: curve.forward_yield_percent(t),
        })
        .collect())
}

/// Observed government yields as `(years_to_maturity, yield_percent)` pairs.
///
/// Only nominal government bonds count: inflation-linked issues quote a real
/// yield. Bonds without a quoted yield or already matured are skipped. Pairs
/// keep the input order.
#[must_use]
pub fn observed_yields(
    bonds: &[BondRecord],
    as_of: Date,
    assumptions: &MarketAssumptions,
) -> Vec<(f64, f64)> {
    bonds
        .iter()
        .filter(|b| b.is_government() && !b.inflation_linked && b.maturity > as_of)
        .filter_map(|b| {
            b.yield_at_previous_price
                .map(|y| (b.years_to_maturity(as_of, assumptions), y))
        })
        .collect()
}
