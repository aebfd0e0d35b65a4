//! Zero-coupon curve evaluation.
//!
//! The exchange publishes its zero-coupon curve as a Nelson-Siegel form plus
//! nine Gaussian bumps:
//!
//! ```text
//! G(t) = β₀ + β₁ * (1 - e^(-t/τ)) * τ/t
//!           + β₂ * ((1 - e^(-t/τ)) * τ/t - e^(-t/τ))
//!           + Σ gᵢ * e^(-(t - aᵢ)² / bᵢ²)
//! ```
//!
//! `G(t)` is in basis points; the continuously compounded rate is
//! `G(t) / 10000`.

use advisor_core::AdvisorResult;

use crate::parameters::{YieldCurveParameters, SMOOTHING_TERMS};

/// Step for the finite-difference forward rate, in years.
pub const DEFAULT_FORWARD_STEP: f64 = 1e-4;

/// Ratio of the geometric bump spacing.
const BUMP_RATIO: f64 = 1.6;

/// First bump width, also the second bump centre.
const BUMP_SEED: f64 = 0.6;

/// Rates read off a zero-coupon curve.
///
/// Implementors provide the continuously compounded spot rate; everything
/// else derives from it.
pub trait ZeroCurve {
    /// Continuously compounded spot rate for maturity `t` in years.
    fn spot_rate(&self, t: f64) -> f64;

    /// Spot rate as an effective annual percentage: `100 * (e^R - 1)`.
    fn annual_yield_percent(&self, t: f64) -> f64 {
        to_annual_percent(self.spot_rate(t))
    }

    /// Price of a zero-coupon bond paying 1 at `t`: `e^(-R(t) * t)`.
    fn discount_factor(&self, t: f64) -> f64 {
        (-self.spot_rate(t) * t).exp()
    }

    /// Instantaneous forward rate by forward difference over `dt`.
    ///
    /// ```text
    /// F(t) = -(ln P(t + dt) - ln P(t)) / dt
    /// ```
    fn forward_rate_with_step(&self, t: f64, dt: f64) -> f64 {
        let next = self.discount_factor(t + dt).ln();
        let here = self.discount_factor(t).ln();
        -(next - here) / dt
    }

    /// Instantaneous forward rate with [`DEFAULT_FORWARD_STEP`].
    fn forward_rate(&self, t: f64) -> f64 {
        self.forward_rate_with_step(t, DEFAULT_FORWARD_STEP)
    }

    /// Forward rate as an effective annual percentage.
    fn forward_yield_percent(&self, t: f64) -> f64 {
        to_annual_percent(self.forward_rate(t))
    }
}

fn to_annual_percent(rate: f64) -> f64 {
    100.0 * (rate.exp() - 1.0)
}

/// The exchange's parametric zero-coupon curve.
///
/// # Example
///
/// ```rust
/// use advisor_core::Date;
/// use advisor_curves::{ParametricZeroCurve, YieldCurveParameters, ZeroCurve};
///
/// let flat = YieldCurveParameters::new(Date::from_ymd(2024, 3, 6).unwrap(), 800.0, 0.0, 0.0, 2.0);
/// let curve = ParametricZeroCurve::new(&flat).unwrap();
///
/// assert!((curve.spot_rate(5.0) - 0.08).abs() < 1e-12);
/// assert_eq!(curve.discount_factor(0.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricZeroCurve {
    beta0: f64,
    beta1: f64,
    beta2: f64,
    tau: f64,
    g: [f64; SMOOTHING_TERMS],
    centres: [f64; SMOOTHING_TERMS],
    widths: [f64; SMOOTHING_TERMS],
}

impl ParametricZeroCurve {
    /// Builds the curve from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive `tau` or non-finite values.
    pub fn new(params: &YieldCurveParameters) -> AdvisorResult<Self> {
        params.validate()?;
        let (centres, widths) = bump_grid();
        Ok(Self {
            beta0: params.beta0,
            beta1: params.beta1,
            beta2: params.beta2,
            tau: params.tau,
            g: params.g,
            centres,
            widths,
        })
    }

    /// Curve value `G(t)` in basis points.
    ///
    /// Maturities at or below zero evaluate the `t → 0` limit.
    pub fn basis_points(&self, t: f64) -> f64 {
        let t = t.max(0.0);
        let x = t / self.tau;

        let level = self.beta0 + self.beta1 * loading_factor_1(x);
        let curvature = self.beta2 * loading_factor_2(x);
        let bumps: f64 = self
            .g
            .iter()
            .zip(self.centres.iter().zip(&self.widths))
            .map(|(g, (a, b))| g * (-((t - a) * (t - a)) / (b * b)).exp())
            .sum();

        level + curvature + bumps
    }
}

impl ZeroCurve for ParametricZeroCurve {
    fn spot_rate(&self, t: f64) -> f64 {
        self.basis_points(t) / 10_000.0
    }
}

/// Bump centres `aᵢ` and widths `bᵢ`.
///
/// `a₁ = 0`, `a₂ = 0.6`, `aᵢ = aᵢ₋₁ + 1.6^(i-2)`; `b₁ = 0.6`, `bᵢ = 1.6 * bᵢ₋₁`.
pub fn bump_grid() -> ([f64; SMOOTHING_TERMS], [f64; SMOOTHING_TERMS]) {
    let mut centres = [0.0; SMOOTHING_TERMS];
    let mut widths = [0.0; SMOOTHING_TERMS];

    centres[1] = BUMP_SEED;
    widths[0] = BUMP_SEED;
    let mut step = BUMP_RATIO;
    for i in 2..SMOOTHING_TERMS {
        centres[i] = centres[i - 1] + step;
        step *= BUMP_RATIO;
    }
    for i in 1..SMOOTHING_TERMS {
        widths[i] = widths[i - 1] * BUMP_RATIO;
    }

    (centres, widths)
}

/// (1 - e^(-x)) / x
fn loading_factor_1(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        1.0 - x / 2.0 + x * x / 6.0
    } else {
        (1.0 - (-x).exp()) / x
    }
}

/// (1 - e^(-x)) / x - e^(-x)
fn loading_factor_2(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        x / 2.0 - x * x / 3.0
    } else {
        loading_factor_1(x) - (-x).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::Date;
    use approx::assert_relative_eq;

    fn params() -> YieldCurveParameters {
        YieldCurveParameters::new(Date::from_ymd(2024, 3, 6).unwrap(), 1180.5, -127.4, -68.9, 1.74)
            .with_smoothing([5.0, -3.0, 2.0, 1.0, -1.0, 0.5, 0.0, 0.2, 0.1])
    }

    #[test]
    fn test_bump_grid() {
        let (a, b) = bump_grid();
        assert_relative_eq!(a[0], 0.0);
        assert_relative_eq!(a[1], 0.6);
        assert_relative_eq!(a[2], 2.2, epsilon = 1e-12);
        assert_relative_eq!(a[3], 4.76, epsilon = 1e-12);
        assert_relative_eq!(b[0], 0.6);
        assert_relative_eq!(b[1], 0.96, epsilon = 1e-12);
        assert_relative_eq!(b[8], 0.6 * 1.6_f64.powi(8), epsilon = 1e-9);
    }

    #[test]
    fn test_nelson_siegel_terms() {
        let p = YieldCurveParameters::new(Date::from_ymd(2024, 3, 6).unwrap(), 800.0, -200.0, 100.0, 2.0);
        let curve = ParametricZeroCurve::new(&p).unwrap();
        let t: f64 = 3.0;
        let e = (-t / 2.0).exp();
        let expected = 800.0 - 200.0 * (1.0 - e) * 2.0 / t + 100.0 * ((1.0 - e) * 2.0 / t - e);
        assert_relative_eq!(curve.basis_points(t), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_short_end_limit() {
        let curve = ParametricZeroCurve::new(&params()).unwrap();
        let at_zero = curve.basis_points(0.0);
        assert_relative_eq!(curve.basis_points(1e-7), at_zero, max_relative = 1e-6);
        assert_eq!(curve.basis_points(-1.0), at_zero);
    }

    #[test]
    fn test_discount_factor_at_zero() {
        let curve = ParametricZeroCurve::new(&params()).unwrap();
        assert_eq!(curve.discount_factor(0.0), 1.0);
    }

    #[test]
    fn test_flat_curve_forward_equals_spot() {
        let flat = YieldCurveParameters::new(Date::from_ymd(2024, 3, 6).unwrap(), 750.0, 0.0, 0.0, 1.3);
        let curve = ParametricZeroCurve::new(&flat).unwrap();
        for t in [0.25, 1.0, 5.0, 19.5] {
            assert_relative_eq!(curve.forward_rate(t), 0.075, epsilon = 1e-9);
            assert_relative_eq!(curve.spot_rate(t), 0.075, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_annual_percent_conversion() {
        let flat = YieldCurveParameters::new(Date::from_ymd(2024, 3, 6).unwrap(), 1000.0, 0.0, 0.0, 1.0);
        let curve = ParametricZeroCurve::new(&flat).unwrap();
        assert_relative_eq!(curve.annual_yield_percent(2.0), 100.0 * (0.1_f64.exp() - 1.0), epsilon = 1e-12);
        assert_relative_eq!(curve.forward_yield_percent(2.0), curve.annual_yield_percent(2.0), epsilon = 1e-7);
    }

    #[test]
    fn test_rejects_bad_tau() {
        let mut p = params();
        p.tau = -1.0;
        assert!(ParametricZeroCurve::new(&p).is_err());
    }
}
