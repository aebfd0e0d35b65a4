//! Property-based tests for the profitability formulas.
//!
//! These tests verify properties that should hold for any input:
//! - Normalized prices are rounded to cents and scale with face value
//! - Discounting and compounding by the same rate cancel out
//! - Inflation adjustment never increases a cash flow
//! - Deducting tax never increases profit

use advisor_bonds::prelude::*;
use advisor_core::{CashFlowSchedule, Date, MarketAssumptions, ScheduleEntry, ScheduleKind};
use proptest::prelude::*;

fn as_of() -> Date {
    Date::from_ymd(2024, 1, 1).unwrap()
}

proptest! {
    #[test]
    fn normalized_price_has_two_decimals(pct in 1.0f64..200.0, face in 1u32..10_000) {
        let price = normalize_price(pct, f64::from(face)).unwrap();
        let cents = price * 100.0;
        prop_assert!((cents - cents.round()).abs() < 1e-6);
        prop_assert!((price - f64::from(face) * pct / 100.0).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn discount_round_trips(amount in 1.0f64..1e6, rate in 0.0f64..0.5, power in 0.0f64..30.0) {
        let present = discount(amount, rate, -power);
        let back = discount(present, rate, power);
        prop_assert!((back - amount).abs() <= amount * 1e-9);
    }

    #[test]
    fn inflation_never_inflates(
        values in prop::collection::vec(0.0f64..500.0, 1..12),
        rate in 0.0f64..0.3,
    ) {
        let entries = values
            .iter()
            .enumerate()
            .map(|(i, v)| ScheduleEntry::new(as_of().add_days(91 * (i as i64 + 1)), 1000.0, *v, 8.0))
            .collect();
        let schedule = CashFlowSchedule::new(ScheduleKind::Coupon, entries);
        let a = MarketAssumptions::default();

        let adjusted = inflation_adjust_cash_flows(&schedule, rate, as_of(), &a);
        prop_assert_eq!(adjusted.len(), values.len());
        for (raw, adj) in values.iter().zip(&adjusted) {
            prop_assert!(*adj <= *raw + 1e-9);
        }
        let face = inflation_adjust_face_value(&schedule, rate, as_of(), &a).unwrap();
        prop_assert!(face <= 1000.0 + 1e-9);
    }

    #[test]
    fn tax_never_increases_profit(
        coupons in 0.0f64..500.0,
        price_pct in 50.0f64..99.0,
        days in 30i64..4000,
    ) {
        let inputs = ProfitInputs {
            coupon_sum: coupons,
            accrued_interest: 0.0,
            face_value: 1000.0,
            price: price_pct * 10.0,
            maturity: as_of().add_days(days),
        };
        let a = MarketAssumptions::default();
        let gross = bond_profit(&inputs, as_of(), ProfitOptions::gross(), &a);
        let taxed = bond_profit(&inputs, as_of(), ProfitOptions::taxed(), &a);
        prop_assert!(taxed <= gross);
    }

    #[test]
    fn compound_beats_simple(rate in 0.0f64..0.3, payments in 1u32..365, years in 1u32..10) {
        let compound = compound_growth(10_000.0, rate, payments, years, 0).unwrap();
        let simple = simple_growth(10_000.0, rate, payments, years).unwrap();
        prop_assert!(compound >= simple - 0.01);
    }
}
