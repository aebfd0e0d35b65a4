//! # Advisor Curves
//!
//! Evaluation of the exchange's fitted zero-coupon yield curve.
//!
//! This crate provides:
//!
//! - **Snapshots**: [`YieldCurveParameters`], one row of fitted coefficients
//! - **Curve Trait**: [`ZeroCurve`] with spot, discount, and forward rates
//! - **Model**: [`ParametricZeroCurve`], Nelson-Siegel plus nine Gaussian bumps
//! - **Sampling**: [`sample_curve`] over a [`CurveGrid`] and
//!   [`observed_yields`] for the government bonds plotted against it
//!
//! ## Quick Start
//!
//! ```rust
//! use advisor_core::Date;
//! use advisor_curves::prelude::*;
//!
//! let snapshots = vec![
//!     YieldCurveParameters::new(Date::from_ymd(2024, 3, 5).unwrap(), 1150.0, -100.0, -60.0, 1.7),
//!     YieldCurveParameters::new(Date::from_ymd(2024, 3, 6).unwrap(), 1180.5, -127.4, -68.9, 1.74),
//! ];
//! let latest = YieldCurveParameters::latest(&snapshots).unwrap();
//! let curve = ParametricZeroCurve::new(latest).unwrap();
//!
//! let points = sample_curve(&curve, &CurveGrid::default()).unwrap();
//! assert_eq!(points.len(), 1500);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod model;
pub mod parameters;
pub mod sampling;

pub use model::{ParametricZeroCurve, ZeroCurve};
pub use parameters::YieldCurveParameters;
pub use sampling::{observed_yields, sample_curve, CurveGrid, CurvePoint};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::model::{bump_grid, ParametricZeroCurve, ZeroCurve, DEFAULT_FORWARD_STEP};
    pub use crate::parameters::{YieldCurveParameters, SMOOTHING_TERMS};
    pub use crate::sampling::{observed_yields, sample_curve, CurveGrid, CurvePoint};
}
