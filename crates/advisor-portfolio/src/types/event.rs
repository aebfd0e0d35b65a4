//! Ledger events.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Instrument class of a ledger entry.
///
/// The declaration order is the display order of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// Exchange-traded bond.
    Bond,
    /// Equity share.
    Share,
    /// Fund unit.
    Fund,
    /// Foreign currency.
    Currency,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bond => "Bond",
            Self::Share => "Share",
            Self::Fund => "Fund",
            Self::Currency => "Currency",
        };
        write!(f, "{name}")
    }
}

/// Direction of a ledger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Units acquired.
    Buy,
    /// Units disposed of.
    Sell,
}

/// One buy or sell entry with instrument metadata joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Instrument class.
    pub asset_type: AssetType,
    /// Instrument code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Units traded, always non-negative; `kind` gives the direction.
    pub quantity: i64,
    /// Buy or sell.
    pub kind: EventKind,
}

impl LedgerEvent {
    /// A buy of `quantity` units at `price`.
    #[must_use]
    pub fn buy(
        asset_type: AssetType,
        code: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Self {
        Self {
            asset_type,
            code: code.into(),
            name: name.into(),
            price,
            quantity,
            kind: EventKind::Buy,
        }
    }

    /// A sell of `quantity` units at `price`.
    #[must_use]
    pub fn sell(
        asset_type: AssetType,
        code: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Self {
        Self {
            kind: EventKind::Sell,
            ..Self::buy(asset_type, code, name, price, quantity)
        }
    }

    /// Quantity with sells negated.
    #[must_use]
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            EventKind::Buy => self.quantity,
            EventKind::Sell => -self.quantity,
        }
    }

    /// Checks the event can be aggregated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEvent` for a negative quantity or price.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.quantity < 0 {
            return Err(PortfolioError::invalid_event(
                &self.code,
                format!("quantity must not be negative, got {}", self.quantity),
            ));
        }
        if self.price < Decimal::ZERO {
            return Err(PortfolioError::invalid_event(
                &self.code,
                format!("price must not be negative, got {}", self.price),
            ));
        }
        Ok(())
    }
}
