//! The top-level configuration document.

use std::fs;
use std::path::Path;

use advisor_analytics::{CandidateFilter, ScreeningConfig};
use advisor_core::MarketAssumptions;
use advisor_curves::CurveGrid;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Settings for one analysis session.
///
/// Every section defaults, so a file only needs the values it changes:
///
/// ```toml
/// [assumptions]
/// tax_rate = 0.15
///
/// [filter]
/// max_coupon_period = 91
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Calendar, fee, and tax assumptions.
    pub assumptions: MarketAssumptions,
    /// Candidate pre-filter.
    pub filter: CandidateFilter,
    /// Curve sampling grid.
    pub curve_grid: CurveGrid,
    /// Screening execution.
    pub screening: ScreeningConfig,
}

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Infers the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for anything but `.toml` or `.json`.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl AdvisorConfig {
    /// Parses a document in `format`.
    ///
    /// # Errors
    ///
    /// Returns `Deserialization` for malformed input.
    pub fn parse(input: &str, format: ConfigFormat) -> ConfigResult<Self> {
        Ok(match format {
            ConfigFormat::Toml => toml::from_str(input)?,
            ConfigFormat::Json => serde_json::from_str(input)?,
        })
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `UnsupportedFormat` for an
    /// unknown extension, `Deserialization` for malformed content, and a
    /// validation error for inconsistent values.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&input, format)?;
        config.validate_or_error()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Renders the configuration in `format`.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the document cannot be rendered.
    pub fn render(&self, format: ConfigFormat) -> ConfigResult<String> {
        Ok(match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }
}

impl Validate for MarketAssumptions {
    fn validate(&self) -> Vec<ValidationError> {
        ValidationError::from_issues("assumptions", self.issues())
    }
}

impl Validate for CandidateFilter {
    fn validate(&self) -> Vec<ValidationError> {
        ValidationError::from_issues("filter", self.issues())
    }
}

impl Validate for CurveGrid {
    fn validate(&self) -> Vec<ValidationError> {
        ValidationError::from_issues("curve_grid", self.issues())
    }
}

impl Validate for AdvisorConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.assumptions.validate();
        errors.extend(self.filter.validate());
        errors.extend(Validate::validate(&self.curve_grid));
        errors
    }
}
