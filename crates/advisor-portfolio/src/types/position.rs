//! Aggregated holdings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AssetType;

/// One instrument's aggregated holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioPosition {
    /// Instrument class.
    pub asset_type: AssetType,
    /// Instrument code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Buy-side weighted average price, rounded to 2 decimals.
    ///
    /// `None` when the ledger holds no bought units of the instrument.
    pub average_price: Option<Decimal>,
    /// Net quantity; sells reduce it.
    pub quantity: i64,
    /// `average_price * quantity`, rounded to 2 decimals.
    pub total: Option<Decimal>,
}

impl PortfolioPosition {
    /// Returns true if every unit has been sold.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.quantity == 0
    }
}

/// All positions of a ledger and their combined cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Positions sorted by asset type, then code.
    pub positions: Vec<PortfolioPosition>,
    /// Sum of the defined position totals.
    pub total_cost: Decimal,
}

impl PortfolioSummary {
    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there are no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Looks up a position by instrument code.
    #[must_use]
    pub fn position(&self, code: &str) -> Option<&PortfolioPosition> {
        self.positions.iter().find(|p| p.code == code)
    }
}
