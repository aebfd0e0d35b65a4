//! Date type for financial calculations.

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AdvisorError, AdvisorResult};

/// Placeholder the exchange feed writes for an absent date.
pub const NO_DATE: &str = "0000-00-00";

/// A calendar date used as event date, maturity, or valuation date.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. It serializes as an
/// ISO `YYYY-MM-DD` string, matching the exchange feed.
///
/// # Example
///
/// ```rust
/// use advisor_core::types::Date;
///
/// let as_of = Date::parse("2023-10-18").unwrap();
/// let maturity = Date::from_ymd(2026, 9, 16).unwrap();
/// assert_eq!(as_of.days_between(&maturity), 1064);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> AdvisorResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| AdvisorError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> AdvisorResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| AdvisorError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date from the local clock.
    ///
    /// Formulas never call this; it only seeds a default valuation date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Deserializes an optional date field of a feed row.
    ///
    /// `null`, an empty string and [`NO_DATE`] all read as `None`. Use with
    /// `#[serde(default, deserialize_with = "Date::deserialize_optional")]`.
    ///
    /// # Errors
    ///
    /// Fails for any other string that is not a `YYYY-MM-DD` date.
    pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") | Some(NO_DATE) => Ok(None),
            Some(s) => Date::parse(s).map(Some).map_err(de::Error::custom),
        }
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2026, 9, 16).unwrap();
        assert_eq!(date.year(), 2026);
        assert_eq!(date.month(), 9);
        assert_eq!(date.day(), 16);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_malformed_string_is_invalid_input() {
        let err = Date::parse("16.09.2026").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!("2026-9-xx".parse::<Date>().is_err());
    }

    #[test]
    fn test_days_between_spans_leap_year() {
        let d1 = Date::from_ymd(2023, 10, 18).unwrap();
        let d2 = Date::from_ymd(2026, 9, 16).unwrap();
        assert_eq!(d1.days_between(&d2), 1064);
        assert_eq!(d2.days_between(&d1), -1064);
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "Date::deserialize_optional")]
        next: Option<Date>,
    }

    #[test]
    fn test_optional_date_placeholders() {
        for json in [r#"{}"#, r#"{"next": null}"#, r#"{"next": ""}"#, r#"{"next": "0000-00-00"}"#] {
            let row: Row = serde_json::from_str(json).unwrap();
            assert_eq!(row.next, None, "{json}");
        }

        let row: Row = serde_json::from_str(r#"{"next": "2024-09-02"}"#).unwrap();
        assert_eq!(row.next, Some(Date::from_ymd(2024, 9, 2).unwrap()));

        assert!(serde_json::from_str::<Row>(r#"{"next": "02.09.2024"}"#).is_err());
    }

    #[test]
    fn test_serde_iso_string() {
        let date = Date::parse("2024-06-01").unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-06-01\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
