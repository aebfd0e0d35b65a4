//! Error types for the Advisor engine.
//!
//! Primitive formulas fail fast with an [`AdvisorError`]; orchestration code
//! inspects [`AdvisorError::kind`] to decide whether a record is rejected
//! or its contribution is treated as zero.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized Result type for Advisor operations.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// The main error type for Advisor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    /// Non-positive face value, zero maturity horizon, and similar.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of what's invalid.
        reason: String,
    },

    /// Malformed or out-of-range date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Required data is absent (e.g. no future coupons).
    #[error("Missing data: {reason}")]
    MissingData {
        /// Description of what is missing.
        reason: String,
    },

    /// Mathematical error (non-finite result, division by zero, ...).
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },
}

/// Coarse classification of an [`AdvisorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The record itself is unusable and must be rejected.
    InvalidInput,
    /// Data is absent; callers may substitute a zero contribution.
    MissingData,
    /// A computation produced an unusable number.
    Math,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::MissingData => "missing data",
            ErrorKind::Math => "math",
        };
        write!(f, "{name}")
    }
}

impl AdvisorError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a missing data error.
    #[must_use]
    pub fn missing_data(reason: impl Into<String>) -> Self {
        Self::MissingData {
            reason: reason.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// Returns the taxonomy bucket of this error.
    ///
    /// Malformed dates count as invalid input.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } | Self::InvalidDate { .. } => ErrorKind::InvalidInput,
            Self::MissingData { .. } => ErrorKind::MissingData,
            Self::MathError { .. } => ErrorKind::Math,
        }
    }

    /// Returns true if the caller may recover by treating the value as zero.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::MissingData
    }
}

/// One rule broken by a configurable input.
///
/// Types with several independent rules list every breach as an issue;
/// their `check` methods report the first one as [`AdvisorError::InvalidInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputIssue {
    /// Name of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
    /// Short rule identifier (`positive`, `range`, `ordering`, ...).
    pub rule: &'static str,
}

impl InputIssue {
    /// Creates an issue.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>, rule: &'static str) -> Self {
        Self {
            field,
            message: message.into(),
            rule,
        }
    }

    /// Turns the first issue, if any, into an error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the field of the first issue.
    pub fn first_as_error(issues: Vec<Self>) -> AdvisorResult<()> {
        match issues.into_iter().next() {
            Some(issue) => Err(issue.into()),
            None => Ok(()),
        }
    }
}

impl From<InputIssue> for AdvisorError {
    fn from(issue: InputIssue) -> Self {
        Self::invalid_input(format!("{}: {}", issue.field, issue.message))
    }
}
