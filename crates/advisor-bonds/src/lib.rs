//! # Advisor Bonds
//!
//! Bond records and the stateless formulas that turn them into
//! investor-relevant profitability figures.
//!
//! ## Features
//!
//! - **Records**: [`BondRecord`] with the exchange's static attributes
//! - **Primitives**: price normalization, discounting, inflation adjustment,
//!   after-tax profit, and annualization in [`formulas`]
//! - **Classic yields**: current, modified, redemption, effective, and real
//!   yields for a plain coupon bond in [`classic`]
//! - **Purchase plans**: funded purchase of a single bond in [`purchase`]
//! - **Deposits**: simple and compound growth in [`deposit`]
//!
//! Every time-dependent formula takes the valuation date explicitly and every
//! fee- or tax-dependent formula takes [`MarketAssumptions`].
//!
//! ## Example
//!
//! ```rust
//! use advisor_bonds::formulas::{normalize_price, profit_percent};
//!
//! let price = normalize_price(90.21, 1000.0).unwrap();
//! assert_eq!(price, 902.1);
//! assert_eq!(profit_percent(90.21, price), 10.0);
//! ```
//!
//! [`MarketAssumptions`]: advisor_core::MarketAssumptions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod classic;
pub mod deposit;
pub mod formulas;
pub mod purchase;
pub mod record;

pub use classic::{ClassicBond, ClassicYields};
pub use deposit::{CapitalizationFrequency, Deposit};
pub use formulas::{ProfitInputs, ProfitOptions, Reinvested};
pub use purchase::{BondPurchase, BondPurchaseBuilder};
pub use record::{BondRecord, Sector};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::classic::{ClassicBond, ClassicYields};
    pub use crate::deposit::{compound_growth, simple_growth, CapitalizationFrequency, Deposit};
    pub use crate::formulas::{
        annualized_percent, bond_profit, discount, inflation_adjust_cash_flows,
        inflation_adjust_face_value, nominal_coupon_yield, normalize_price, profit_percent,
        reinvest_coupons, years_to_maturity, ProfitInputs, ProfitOptions, Reinvested,
    };
    pub use crate::purchase::{BondPurchase, BondPurchaseBuilder};
    pub use crate::record::{BondRecord, Sector};
}
