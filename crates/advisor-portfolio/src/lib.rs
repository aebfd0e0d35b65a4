//! # Advisor Portfolio
//!
//! Aggregation of a buy/sell ledger into per-instrument holdings.
//!
//! ## Quick Start
//!
//! ```rust
//! use advisor_portfolio::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let ledger = vec![
//!     LedgerEvent::buy(AssetType::Share, "SBER", "Sberbank", Decimal::from(100), 10),
//!     LedgerEvent::sell(AssetType::Share, "SBER", "Sberbank", Decimal::from(120), 4),
//! ];
//!
//! let summary = PortfolioSummary::from_events(&ledger).unwrap();
//! let sber = summary.position("SBER").unwrap();
//! assert_eq!(sber.quantity, 6);
//! assert_eq!(sber.average_price, Some(Decimal::from(100)));
//! ```
//!
//! ## Module Overview
//!
//! - [`aggregate`] - Net quantity, average price, and totals per code
//! - [`types`] - Ledger events and positions

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod error;
pub mod types;

pub use aggregate::aggregate_positions;
pub use error::{PortfolioError, PortfolioResult};
pub use types::{AssetType, EventKind, LedgerEvent, PortfolioPosition, PortfolioSummary};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::aggregate_positions;
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::types::{AssetType, EventKind, LedgerEvent, PortfolioPosition, PortfolioSummary};
}
