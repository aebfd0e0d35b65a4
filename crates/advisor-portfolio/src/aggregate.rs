//! Ledger aggregation.
//!
//! Net quantity sums every event with sells negated. The average price only
//! looks at buys: `Σ(price * qty) / Σ(qty)` over the buy events of a code, so
//! a sale never revises the cost basis of the units still held.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AssetType, EventKind, LedgerEvent, PortfolioPosition, PortfolioSummary};

const PRICE_PLACES: u32 = 2;

struct Accumulator<'a> {
    asset_type: AssetType,
    name: &'a str,
    quantity: i64,
    bought_value: Decimal,
    bought_quantity: i64,
}

impl<'a> Accumulator<'a> {
    fn new(event: &'a LedgerEvent) -> Self {
        Self {
            asset_type: event.asset_type,
            name: &event.name,
            quantity: 0,
            bought_value: Decimal::ZERO,
            bought_quantity: 0,
        }
    }

    fn add(&mut self, event: &'a LedgerEvent) -> PortfolioResult<()> {
        self.asset_type = self.asset_type.min(event.asset_type);
        self.name = self.name.min(event.name.as_str());
        self.quantity = self
            .quantity
            .checked_add(event.signed_quantity())
            .ok_or_else(|| overflow(&event.code))?;

        if event.kind == EventKind::Buy {
            let value = event
                .price
                .checked_mul(Decimal::from(event.quantity))
                .ok_or_else(|| overflow(&event.code))?;
            self.bought_value = self
                .bought_value
                .checked_add(value)
                .ok_or_else(|| overflow(&event.code))?;
            self.bought_quantity = self
                .bought_quantity
                .checked_add(event.quantity)
                .ok_or_else(|| overflow(&event.code))?;
        }
        Ok(())
    }

    fn finish(self, code: &str) -> PortfolioResult<PortfolioPosition> {
        let average_price = if self.bought_quantity == 0 {
            None
        } else {
            let avg = self
                .bought_value
                .checked_div(Decimal::from(self.bought_quantity))
                .ok_or_else(|| overflow(code))?;
            Some(avg.round_dp(PRICE_PLACES))
        };
        let total = average_price
            .map(|price| {
                price
                    .checked_mul(Decimal::from(self.quantity))
                    .map(|t| t.round_dp(PRICE_PLACES))
                    .ok_or_else(|| overflow(code))
            })
            .transpose()?;

        Ok(PortfolioPosition {
            asset_type: self.asset_type,
            code: code.to_string(),
            name: self.name.to_string(),
            average_price,
            quantity: self.quantity,
            total,
        })
    }
}

fn overflow(code: &str) -> PortfolioError {
    PortfolioError::calculation_failed(format!("decimal overflow aggregating '{code}'"))
}

/// Collapses `events` into one position per instrument code.
///
/// The representative type and name of a code are the smallest seen across
/// its events. Positions are sorted by asset type, then code.
///
/// # Errors
///
/// Returns `InvalidEvent` for an event with a negative quantity or price,
/// and `CalculationFailed` on decimal overflow.
pub fn aggregate_positions(events: &[LedgerEvent]) -> PortfolioResult<Vec<PortfolioPosition>> {
    let mut by_code: BTreeMap<&str, Accumulator<'_>> = BTreeMap::new();
    for event in events {
        event.validate()?;
        by_code
            .entry(event.code.as_str())
            .or_insert_with(|| Accumulator::new(event))
            .add(event)?;
    }

    let mut positions = by_code
        .into_iter()
        .map(|(code, acc)| acc.finish(code))
        .collect::<PortfolioResult<Vec<_>>>()?;
    positions.sort_by(|a, b| (a.asset_type, &a.code).cmp(&(b.asset_type, &b.code)));

    for position in positions.iter().filter(|p| p.average_price.is_none()) {
        tracing::debug!(code = %position.code, "No buy events, average price undefined");
    }
    Ok(positions)
}

impl PortfolioSummary {
    /// Aggregates a ledger and sums the defined position totals.
    ///
    /// # Errors
    ///
    /// Same as [`aggregate_positions`].
    pub fn from_events(events: &[LedgerEvent]) -> PortfolioResult<Self> {
        let positions = aggregate_positions(events)?;
        let total_cost = positions
            .iter()
            .filter_map(|p| p.total)
            .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t))
            .ok_or_else(|| PortfolioError::calculation_failed("decimal overflow in total cost"))?;

        tracing::info!(
            events = events.len(),
            positions = positions.len(),
            total_cost = %total_cost,
            "Portfolio aggregated"
        );
        Ok(Self {
            positions,
            total_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn share_buy(code: &str, price: Decimal, qty: i64) -> LedgerEvent {
        LedgerEvent::buy(AssetType::Share, code, code, price, qty)
    }

    fn share_sell(code: &str, price: Decimal, qty: i64) -> LedgerEvent {
        LedgerEvent::sell(AssetType::Share, code, code, price, qty)
    }

    #[test]
    fn test_sell_does_not_change_average() {
        let events = vec![share_buy("SBER", dec!(100), 10), share_sell("SBER", dec!(130), 4)];
        let positions = aggregate_positions(&events).unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].quantity, 6);
        assert_eq!(positions[0].average_price, Some(dec!(100)));
        assert_eq!(positions[0].total, Some(dec!(600)));
    }

    #[test]
    fn test_weighted_average_is_rounded() {
        let events = vec![share_buy("GAZP", dec!(160.10), 3), share_buy("GAZP", dec!(170.25), 4)];
        let positions = aggregate_positions(&events).unwrap();
        // (480.30 + 681.00) / 7 = 165.9
        assert_eq!(positions[0].average_price, Some(dec!(165.90)));
        assert_eq!(positions[0].total, Some(dec!(1161.30)));
    }

    #[test]
    fn test_only_sells_leave_average_undefined() {
        let positions = aggregate_positions(&[share_sell("LKOH", dec!(7000), 2)]).unwrap();
        assert_eq!(positions[0].quantity, -2);
        assert_eq!(positions[0].average_price, None);
        assert_eq!(positions[0].total, None);
    }

    #[test]
    fn test_sorted_by_type_then_code() {
        let events = vec![
            share_buy("YNDX", dec!(2500), 1),
            LedgerEvent::buy(AssetType::Bond, "SU26238", "OFZ 26238", dec!(615), 5),
            share_buy("AFLT", dec!(40), 100),
            LedgerEvent::buy(AssetType::Currency, "USD000UTSTOM", "USD", dec!(92.5), 1000),
        ];
        let codes: Vec<String> = aggregate_positions(&events)
            .unwrap()
            .into_iter()
            .map(|p| p.code)
            .collect();
        assert_eq!(codes, vec!["SU26238", "AFLT", "YNDX", "USD000UTSTOM"]);
    }

    #[test]
    fn test_representative_row_takes_minimums() {
        let events = vec![
            LedgerEvent::buy(AssetType::Fund, "X", "Zeta", dec!(1), 1),
            LedgerEvent::buy(AssetType::Share, "X", "Alpha", dec!(1), 1),
        ];
        let positions = aggregate_positions(&events).unwrap();
        assert_eq!(positions[0].asset_type, AssetType::Share);
        assert_eq!(positions[0].name, "Alpha");
    }

    #[test]
    fn test_invalid_event_is_rejected() {
        let err = aggregate_positions(&[share_buy("SBER", dec!(100), -1)]).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidEvent { .. }));
    }

    #[test]
    fn test_summary_total_cost() {
        let events = vec![
            share_buy("SBER", dec!(100), 10),
            share_sell("SBER", dec!(130), 4),
            share_buy("AFLT", dec!(40.5), 100),
            share_sell("LKOH", dec!(7000), 2),
        ];
        let summary = PortfolioSummary::from_events(&events).unwrap();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.total_cost, dec!(4650));
        assert_eq!(summary.position("AFLT").unwrap().total, Some(dec!(4050)));
    }

    #[test]
    fn test_empty_ledger() {
        let summary = PortfolioSummary::from_events(&[]).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total_cost, Decimal::ZERO);
    }
}
