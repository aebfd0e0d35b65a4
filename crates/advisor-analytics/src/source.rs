//! Access to per-bond cash-flow schedules.

use std::collections::HashMap;

use advisor_core::{CashFlowSchedule, ScheduleEntry, ScheduleKind};
use serde::{Deserialize, Serialize};

/// Supplies coupon and amortization schedules by security code.
///
/// Unknown codes yield an empty schedule.
pub trait ScheduleSource {
    /// Returns the full schedule of `kind` for `code`.
    fn schedule(&self, code: &str, kind: ScheduleKind) -> CashFlowSchedule;

    /// Coupon schedule for `code`.
    fn coupons(&self, code: &str) -> CashFlowSchedule {
        self.schedule(code, ScheduleKind::Coupon)
    }

    /// Amortization schedule for `code`.
    fn amortizations(&self, code: &str) -> CashFlowSchedule {
        self.schedule(code, ScheduleKind::Amortization)
    }
}

impl<S: ScheduleSource + ?Sized> ScheduleSource for &S {
    fn schedule(&self, code: &str, kind: ScheduleKind) -> CashFlowSchedule {
        (**self).schedule(code, kind)
    }
}

/// In-memory schedules keyed by security code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBook {
    /// Coupon entries per code.
    #[serde(default)]
    pub coupons: HashMap<String, Vec<ScheduleEntry>>,
    /// Amortization entries per code.
    #[serde(default)]
    pub amortizations: HashMap<String, Vec<ScheduleEntry>>,
}

impl ScheduleBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds entries of `kind` for `code`, appending to any already present.
    pub fn insert(&mut self, code: impl Into<String>, kind: ScheduleKind, entries: Vec<ScheduleEntry>) {
        let map = match kind {
            ScheduleKind::Coupon => &mut self.coupons,
            ScheduleKind::Amortization => &mut self.amortizations,
        };
        map.entry(code.into()).or_default().extend(entries);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, code: impl Into<String>, kind: ScheduleKind, entries: Vec<ScheduleEntry>) -> Self {
        self.insert(code, kind, entries);
        self
    }
}

impl ScheduleSource for ScheduleBook {
    fn schedule(&self, code: &str, kind: ScheduleKind) -> CashFlowSchedule {
        let map = match kind {
            ScheduleKind::Coupon => &self.coupons,
            ScheduleKind::Amortization => &self.amortizations,
        };
        map.get(code).map_or_else(
            || CashFlowSchedule::empty(kind),
            |entries| CashFlowSchedule::new(kind, entries.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::Date;

    fn entry(day: u32) -> ScheduleEntry {
        ScheduleEntry::new(Date::from_ymd(2025, 1, day).unwrap(), 1000.0, 40.0, 8.0)
    }

    #[test]
    fn test_unknown_code_is_empty() {
        let book = ScheduleBook::new();
        let s = book.coupons("SU26238RMFS4");
        assert!(s.is_empty());
        assert_eq!(s.kind(), ScheduleKind::Coupon);
    }

    #[test]
    fn test_kinds_are_separate() {
        let book = ScheduleBook::new()
            .with("A", ScheduleKind::Coupon, vec![entry(20), entry(10)])
            .with("A", ScheduleKind::Amortization, vec![entry(20)]);
        let coupons = book.coupons("A");
        assert_eq!(coupons.len(), 2);
        assert_eq!(coupons.entries()[0].date.day(), 10);
        assert_eq!(book.amortizations("A").len(), 1);
        assert!(!book.amortizations("A").is_amortizing());
    }

    #[test]
    fn test_insert_appends() {
        let mut book = ScheduleBook::new();
        book.insert("A", ScheduleKind::Amortization, vec![entry(1)]);
        book.insert("A", ScheduleKind::Amortization, vec![entry(2)]);
        assert!(book.amortizations("A").is_amortizing());
    }
}
