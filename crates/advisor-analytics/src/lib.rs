//! # Advisor Analytics
//!
//! Screening of exchange-traded bonds for retail investors.
//!
//! This crate provides:
//!
//! - **Inflation**: [`InflationSeries`] with the trailing five- and ten-year
//!   horizons used to discount cash flows
//! - **Filtering**: [`CandidateFilter`], the pre-selection of buyable bonds
//! - **Schedules**: the [`ScheduleSource`] seam and the in-memory [`ScheduleBook`]
//! - **Screening**: [`Screener`], which drops amortizing bonds and computes
//!   annualized after-tax yields net of inflation
//!
//! ## Quick Start
//!
//! ```rust
//! use advisor_analytics::prelude::*;
//! use advisor_bonds::BondRecord;
//! use advisor_core::{Date, MarketAssumptions};
//!
//! let as_of = Date::from_ymd(2024, 6, 1).unwrap();
//! let series: InflationSeries = (2013..=2023)
//!     .map(|year| InflationObservation::new(year, 0.06))
//!     .collect();
//! let horizons = series.horizons(as_of).unwrap();
//!
//! let bonds = vec![BondRecord::new("RU000A1", "Example", 1000.0, as_of.add_days(400))];
//! let candidates = CandidateFilter::default().apply(&bonds, as_of);
//!
//! let screener = Screener::new(ScheduleBook::new(), MarketAssumptions::default(), as_of).unwrap();
//! let report = screener.screen(&candidates, horizons);
//! assert!(report.bonds.is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: value large candidate sets with rayon

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod filter;
pub mod inflation;
pub mod parallel;
pub mod screening;
pub mod source;

pub use config::ScreeningConfig;
pub use filter::CandidateFilter;
pub use inflation::{InflationHorizons, InflationObservation, InflationSeries};
pub use screening::{
    inflation_adjusted_yields, real_annual_yield, Exclusion, ExclusionReason, InflationYields,
    ScreenedBond, Screener, ScreeningReport,
};
pub use source::{ScheduleBook, ScheduleSource};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::ScreeningConfig;
    pub use crate::filter::CandidateFilter;
    pub use crate::inflation::{
        InflationHorizons, InflationObservation, InflationSeries, LONG_HORIZON_YEARS,
        SHORT_HORIZON_YEARS,
    };
    pub use crate::parallel::maybe_parallel_map;
    pub use crate::screening::{
        inflation_adjusted_yields, real_annual_yield, Exclusion, ExclusionReason,
        InflationYields, ScreenedBond, Screener, ScreeningReport,
    };
    pub use crate::source::{ScheduleBook, ScheduleSource};
}
