//! Coupon and amortization schedules.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Which schedule a set of entries belongs to.
///
/// Both kinds share the [`ScheduleEntry`] shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Coupon payments.
    Coupon,
    /// Principal repayments.
    Amortization,
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScheduleKind::Coupon => "coupons",
            ScheduleKind::Amortization => "amortizations",
        };
        write!(f, "{name}")
    }
}

/// One scheduled coupon or amortization event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Event date.
    pub date: Date,
    /// Face value in effect at the event date.
    pub face_value: f64,
    /// Cash amount paid.
    pub value: f64,
    /// Rate of the payment in percent.
    #[serde(default)]
    pub rate_percent: f64,
}

impl ScheduleEntry {
    /// Creates a new schedule entry.
    #[must_use]
    pub fn new(date: Date, face_value: f64, value: f64, rate_percent: f64) -> Self {
        Self {
            date,
            face_value,
            value,
            rate_percent,
        }
    }
}

/// An ordered schedule of events for a single security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    kind: ScheduleKind,
    entries: Vec<ScheduleEntry>,
}

impl CashFlowSchedule {
    /// Creates a schedule, ordering entries by date.
    #[must_use]
    pub fn new(kind: ScheduleKind, mut entries: Vec<ScheduleEntry>) -> Self {
        entries.sort_by_key(|e| e.date);
        Self { kind, entries }
    }

    /// Creates an empty schedule of the given kind.
    #[must_use]
    pub fn empty(kind: ScheduleKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Returns the schedule kind.
    #[must_use]
    pub fn kind(&self) -> ScheduleKind {
        self.kind
    }

    /// Returns the entries in date order.
    #[must_use]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the schedule has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the last (latest) entry.
    #[must_use]
    pub fn last(&self) -> Option<&ScheduleEntry> {
        self.entries.last()
    }

    /// Returns only entries dated strictly after `as_of`.
    #[must_use]
    pub fn future(&self, as_of: Date) -> Self {
        Self {
            kind: self.kind,
            entries: self
                .entries
                .iter()
                .filter(|e| e.date > as_of)
                .copied()
                .collect(),
        }
    }

    /// Returns true if principal is repaid in more than one installment.
    ///
    /// A single entry is the ordinary redemption at maturity.
    #[must_use]
    pub fn is_amortizing(&self) -> bool {
        self.kind == ScheduleKind::Amortization && self.entries.len() > 1
    }

    /// Sum of the cash amounts.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
