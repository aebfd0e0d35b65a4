//! Ledger and position types.

mod event;
mod position;

pub use event::{AssetType, EventKind, LedgerEvent};
pub use position::{PortfolioPosition, PortfolioSummary};
