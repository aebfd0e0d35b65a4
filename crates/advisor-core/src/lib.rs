//! # Advisor Core
//!
//! Core types and abstractions shared by every Advisor crate.
//!
//! - **Types**: `Date`, cash-flow schedules, and the [`MarketAssumptions`]
//!   value that carries year length, fee rates, and the tax rate
//! - **Errors**: the [`AdvisorError`] taxonomy with an [`ErrorKind`] view
//! - **Rounding**: display rounding helpers used when values are finalized
//!
//! ## Example
//!
//! ```rust
//! use advisor_core::prelude::*;
//!
//! let as_of = Date::from_ymd(2024, 1, 15).unwrap();
//! let schedule = CashFlowSchedule::new(
//!     ScheduleKind::Coupon,
//!     vec![
//!         ScheduleEntry::new(Date::from_ymd(2023, 12, 1).unwrap(), 1000.0, 38.64, 7.75),
//!         ScheduleEntry::new(Date::from_ymd(2024, 6, 1).unwrap(), 1000.0, 38.64, 7.75),
//!     ],
//! );
//!
//! assert_eq!(schedule.future(as_of).len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod error;
pub mod rounding;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AdvisorError, AdvisorResult, ErrorKind, InputIssue};
    pub use crate::rounding::{round2, round_to};
    pub use crate::types::{
        CashFlowSchedule, Date, MarketAssumptions, ScheduleEntry, ScheduleKind,
    };
}

// Re-export commonly used types at crate root
pub use error::{AdvisorError, AdvisorResult, ErrorKind, InputIssue};
pub use types::{CashFlowSchedule, Date, MarketAssumptions, ScheduleEntry, ScheduleKind};
