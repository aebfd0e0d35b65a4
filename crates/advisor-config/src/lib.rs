//! # Advisor Config
//!
//! Loading and validation of session settings: market assumptions, the
//! candidate filter, the curve sampling grid, and screening execution.
//!
//! Files are TOML or JSON, chosen by extension. Every field has a default.
//!
//! ```rust
//! use advisor_config::{AdvisorConfig, ConfigFormat, Validate};
//!
//! let config = AdvisorConfig::parse("[assumptions]\ntax_rate = 0.3", ConfigFormat::Toml).unwrap();
//! assert!(config.is_valid());
//! assert_eq!(config.assumptions.tax_rate, 0.3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod error;
pub mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use settings::{AdvisorConfig, ConfigFormat};
