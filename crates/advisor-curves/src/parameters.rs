//! Fitted curve coefficients published by the exchange.

use advisor_core::{AdvisorError, AdvisorResult, Date};
use serde::{Deserialize, Serialize};

/// Number of Gaussian smoothing terms in the zero-coupon curve.
pub const SMOOTHING_TERMS: usize = 9;

/// One daily snapshot of the zero-coupon curve coefficients.
///
/// `beta0..beta2` and the `g` weights are in basis points; `tau` is in years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldCurveParameters {
    /// Trading day the curve was fitted for.
    #[serde(alias = "tradedate")]
    pub trade_date: Date,
    /// Long-run level.
    pub beta0: f64,
    /// Slope.
    pub beta1: f64,
    /// Curvature.
    pub beta2: f64,
    /// Decay constant.
    pub tau: f64,
    /// Smoothing coefficients `g1..g9`; zero when absent.
    #[serde(default)]
    pub g: [f64; SMOOTHING_TERMS],
}

impl YieldCurveParameters {
    /// Creates a snapshot without smoothing terms.
    #[must_use]
    pub fn new(trade_date: Date, beta0: f64, beta1: f64, beta2: f64, tau: f64) -> Self {
        Self {
            trade_date,
            beta0,
            beta1,
            beta2,
            tau,
            g: [0.0; SMOOTHING_TERMS],
        }
    }

    /// Sets the smoothing coefficients.
    #[must_use]
    pub fn with_smoothing(mut self, g: [f64; SMOOTHING_TERMS]) -> Self {
        self.g = g;
        self
    }

    /// Picks the snapshot with the latest trade date.
    ///
    /// # Errors
    ///
    /// Returns `MissingData` when `snapshots` is empty.
    pub fn latest(snapshots: &[Self]) -> AdvisorResult<&Self> {
        snapshots
            .iter()
            .max_by_key(|s| s.trade_date)
            .ok_or_else(|| AdvisorError::missing_data("no yield curve snapshot available"))
    }

    /// Checks the coefficients describe a usable curve.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive `tau` or a non-finite
    /// coefficient.
    pub fn validate(&self) -> AdvisorResult<()> {
        if self.tau.is_nan() || self.tau <= 0.0 {
            return Err(AdvisorError::invalid_input(format!(
                "tau must be positive, got {}",
                self.tau
            )));
        }
        let finite = [self.beta0, self.beta1, self.beta2, self.tau]
            .iter()
            .chain(self.g.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(AdvisorError::invalid_input(format!(
                "curve coefficients for {} contain non-finite values",
                self.trade_date
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::ErrorKind;

    fn snapshot(day: u32, beta0: f64) -> YieldCurveParameters {
        YieldCurveParameters::new(Date::from_ymd(2024, 3, day).unwrap(), beta0, -200.0, 50.0, 1.5)
    }

    #[test]
    fn test_latest_picks_max_trade_date() {
        let snapshots = [snapshot(4, 1.0), snapshot(6, 2.0), snapshot(5, 3.0)];
        let latest = YieldCurveParameters::latest(&snapshots).unwrap();
        assert_eq!(latest.beta0, 2.0);
    }

    #[test]
    fn test_latest_empty() {
        let err = YieldCurveParameters::latest(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);
    }

    #[test]
    fn test_validate_tau() {
        assert!(snapshot(4, 1.0).validate().is_ok());

        let mut bad = snapshot(4, 1.0);
        bad.tau = 0.0;
        assert_eq!(bad.validate().unwrap_err().kind(), ErrorKind::InvalidInput);

        let mut nan = snapshot(4, 1.0);
        nan.g[3] = f64::NAN;
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "tradedate": "2024-03-06",
            "beta0": 1180.5, "beta1": -127.4, "beta2": -68.9, "tau": 1.74,
            "g": [0, 0, 0, 0, 0, 0, 0, 0, 0]
        }"#;
        let p: YieldCurveParameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.trade_date, Date::from_ymd(2024, 3, 6).unwrap());
        assert_eq!(p.tau, 1.74);
    }
}
