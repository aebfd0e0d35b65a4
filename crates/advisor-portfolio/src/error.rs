//! Error types for portfolio aggregation.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur while aggregating a ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    /// A ledger event carries an unusable value.
    #[error("Invalid event for '{code}': {reason}")]
    InvalidEvent {
        /// The instrument code of the event.
        code: String,
        /// The reason the event is invalid.
        reason: String,
    },

    /// Decimal arithmetic overflowed.
    #[error("Calculation failed: {reason}")]
    CalculationFailed {
        /// The reason the calculation failed.
        reason: String,
    },
}

impl PortfolioError {
    /// Create an invalid event error.
    #[must_use]
    pub fn invalid_event(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Create a calculation failed error.
    #[must_use]
    pub fn calculation_failed(reason: impl Into<String>) -> Self {
        Self::CalculationFailed {
            reason: reason.into(),
        }
    }
}
