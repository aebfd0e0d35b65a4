//! Market snapshot files.
//!
//! A snapshot is one JSON document holding the tables a session works on:
//!
//! ```json
//! {
//!   "bonds": [{"SECID": "RU000A105TU8", "SHORTNAME": "...", ...}],
//!   "coupons": {"RU000A105TU8": [{"date": "2024-09-02", "face_value": 1000, "value": 34.9, "rate_percent": 14}]},
//!   "amortizations": {},
//!   "inflation": [{"year": 2023, "rate": 0.074}],
//!   "curves": [{"tradedate": "2024-06-03", "beta0": 1180.5, ...}],
//!   "ledger": [{"asset_type": "share", "code": "SBER", ...}]
//! }
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use advisor_analytics::{Exclusion, InflationSeries, ScheduleBook};
use advisor_bonds::BondRecord;
use advisor_core::AdvisorError;
use advisor_curves::YieldCurveParameters;
use advisor_portfolio::LedgerEvent;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::error::CliError;

/// The tables of one snapshot file.
#[derive(Debug, Default)]
pub struct Snapshot {
    /// Bond reference table.
    pub bonds: Vec<BondRecord>,
    /// Bond rows that could not be read, with the reason.
    pub rejected: Vec<Exclusion>,
    /// Coupon and amortization schedules by code.
    pub schedules: ScheduleBook,
    /// Annual inflation observations.
    pub inflation: InflationSeries,
    /// Fitted curve snapshots.
    pub curves: Vec<YieldCurveParameters>,
    /// Portfolio ledger.
    pub ledger: Vec<LedgerEvent>,
    path: PathBuf,
}

/// The document as written; bond rows are read one at a time afterwards.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSnapshot {
    bonds: Vec<Value>,
    #[serde(flatten)]
    schedules: ScheduleBook,
    inflation: InflationSeries,
    curves: Vec<YieldCurveParameters>,
    ledger: Vec<LedgerEvent>,
}

impl Snapshot {
    /// Reads a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let mut snapshot = Self::parse(&input)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
        snapshot.path = path.to_path_buf();

        tracing::info!(
            path = %path.display(),
            bonds = snapshot.bonds.len(),
            rejected = snapshot.rejected.len(),
            inflation_years = snapshot.inflation.observations().len(),
            curves = snapshot.curves.len(),
            ledger = snapshot.ledger.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Parses a snapshot document.
    ///
    /// A bond row that does not deserialize is moved to
    /// [`rejected`](Self::rejected) instead of failing the document.
    pub fn parse(input: &str) -> serde_json::Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(input)?;

        let mut bonds = Vec::with_capacity(raw.bonds.len());
        let mut rejected = Vec::new();
        for (index, row) in raw.bonds.into_iter().enumerate() {
            let secid = row_code(&row).unwrap_or_else(|| format!("row {index}"));
            match serde_json::from_value::<BondRecord>(row) {
                Ok(bond) => bonds.push(bond),
                Err(err) => {
                    tracing::warn!(secid = %secid, error = %err, "Skipping unreadable bond row");
                    rejected.push(Exclusion {
                        secid,
                        reason: AdvisorError::invalid_input(err.to_string()).into(),
                    });
                }
            }
        }

        Ok(Self {
            bonds,
            rejected,
            schedules: raw.schedules,
            inflation: raw.inflation,
            curves: raw.curves,
            ledger: raw.ledger,
            path: PathBuf::new(),
        })
    }

    /// Error for a section the command cannot run without.
    pub fn missing(&self, section: &'static str) -> CliError {
        CliError::MissingSection {
            path: self.path.clone(),
            section,
        }
    }
}

fn row_code(row: &Value) -> Option<String> {
    ["SECID", "secid"]
        .iter()
        .find_map(|key| row.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_analytics::{ExclusionReason, ScheduleSource};
    use advisor_core::ErrorKind;

    #[test]
    fn test_empty_document() {
        let snapshot = Snapshot::parse("{}").unwrap();
        assert!(snapshot.bonds.is_empty());
        assert!(snapshot.rejected.is_empty());
        assert!(snapshot.inflation.is_empty());
    }

    #[test]
    fn test_schedules_are_flattened() {
        let json = r#"{
            "coupons": {"A": [{"date": "2025-01-10", "face_value": 1000.0, "value": 40.0, "rate_percent": 8.0}]},
            "inflation": [{"year": 2023, "rate": 0.074}]
        }"#;
        let snapshot = Snapshot::parse(json).unwrap();
        assert_eq!(snapshot.schedules.coupons("A").len(), 1);
        assert!(snapshot.schedules.amortizations("A").is_empty());
        assert_eq!(snapshot.inflation.observations().len(), 1);
    }

    #[test]
    fn test_bad_bond_row_is_rejected_alone() {
        let json = r#"{
            "bonds": [
                {"SECID": "GOOD", "SHORTNAME": "Good", "FACEVALUE": 1000.0, "INITIALFACEVALUE": 1000.0,
                 "MATDATE": "2026-06-01", "NEXTCOUPON": "0000-00-00"},
                {"SECID": "BROKEN", "SHORTNAME": "Broken", "FACEVALUE": 1000.0, "INITIALFACEVALUE": 1000.0,
                 "MATDATE": "0000-00-00"},
                {"SHORTNAME": "No code"}
            ]
        }"#;
        let snapshot = Snapshot::parse(json).unwrap();

        assert_eq!(snapshot.bonds.len(), 1);
        assert_eq!(snapshot.bonds[0].secid, "GOOD");
        assert_eq!(snapshot.bonds[0].next_coupon, None);

        let codes: Vec<&str> = snapshot.rejected.iter().map(|e| e.secid.as_str()).collect();
        assert_eq!(codes, vec!["BROKEN", "row 2"]);
        assert!(matches!(
            snapshot.rejected[0].reason,
            ExclusionReason::Failed { kind: ErrorKind::InvalidInput, .. }
        ));
    }

    #[test]
    fn test_malformed_document_still_fails() {
        assert!(Snapshot::parse(r#"{"bonds": 3}"#).is_err());
    }
}
