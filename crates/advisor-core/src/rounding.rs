//! Rounding helpers.
//!
//! Monetary and percentage figures are rounded to two places only where
//! they are finalized; intermediate discounting keeps full precision.

/// Rounds `value` to `places` decimal places (half away from zero).
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Rounds `value` to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}
