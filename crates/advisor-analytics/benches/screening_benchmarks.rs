//! Benchmarks for the advisor-analytics screening pipeline.
//!
//! Run with: cargo bench -p advisor-analytics --features parallel

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use advisor_analytics::{
    CandidateFilter, InflationHorizons, ScheduleBook, ScheduleSource, Screener, ScreeningConfig,
};
use advisor_bonds::BondRecord;
use advisor_core::{Date, MarketAssumptions, ScheduleEntry, ScheduleKind};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn as_of() -> Date {
    Date::from_ymd(2024, 6, 3).unwrap()
}

fn create_test_bond(id: usize) -> BondRecord {
    let prices = [84.5, 88.0, 91.2, 95.7, 98.3, 101.4, 104.9];
    let horizons = [364_i64, 546, 728, 910, 1092, 1456, 1820];
    let mut bond = BondRecord::new(
        format!("RU000A{id:06}"),
        format!("Test Bond {id}"),
        1000.0,
        as_of().add_days(horizons[id % horizons.len()]),
    )
    .with_price(prices[id % prices.len()])
    .with_coupon(13.5, 33.66, 91)
    .with_yields(15.0, 15.8);
    bond.issuer = format!("ПАО Эмитент {}", id % 10);
    bond
}

fn create_schedule_book(bonds: &[BondRecord]) -> ScheduleBook {
    let mut book = ScheduleBook::new();
    for (i, bond) in bonds.iter().enumerate() {
        let days = as_of().days_between(&bond.maturity);
        let coupons = (1..=days / 91)
            .map(|n| ScheduleEntry::new(as_of().add_days(n * 91), 1000.0, 33.66, 13.5))
            .collect();
        book.insert(bond.secid.clone(), ScheduleKind::Coupon, coupons);
        if i % 7 == 0 {
            let half = days / 2;
            book.insert(
                bond.secid.clone(),
                ScheduleKind::Amortization,
                vec![
                    ScheduleEntry::new(as_of().add_days(half), 1000.0, 500.0, 50.0),
                    ScheduleEntry::new(bond.maturity, 500.0, 500.0, 50.0),
                ],
            );
        }
    }
    book
}

fn create_bond_batch(count: usize) -> Vec<BondRecord> {
    (0..count).map(create_test_bond).collect()
}

// =============================================================================
// SINGLE BOND BENCHMARKS
// =============================================================================

fn bench_single_bond_yield(c: &mut Criterion) {
    let bonds = create_bond_batch(1);
    let book = create_schedule_book(&bonds);
    let coupons = book.coupons(&bonds[0].secid);
    let assumptions = MarketAssumptions::default();

    c.bench_function("real_annual_yield", |b| {
        b.iter(|| {
            advisor_analytics::real_annual_yield(
                black_box(&bonds[0]),
                black_box(&coupons),
                0.074,
                as_of(),
                &assumptions,
            )
        })
    });
}

fn bench_candidate_filter(c: &mut Criterion) {
    let bonds = create_bond_batch(2000);
    let filter = CandidateFilter::default();

    c.bench_function("candidate_filter_2000", |b| {
        b.iter(|| filter.apply(black_box(&bonds), as_of()))
    });
}

// =============================================================================
// BATCH SCREENING BENCHMARKS
// =============================================================================

fn bench_screening(c: &mut Criterion) {
    let mut group = c.benchmark_group("screening");
    let horizons = InflationHorizons::new(0.074, 0.064);

    for size in [100, 500, 2000] {
        let bonds = create_bond_batch(size);
        let book = create_schedule_book(&bonds);
        group.throughput(Throughput::Elements(size as u64));

        let sequential = Screener::new(&book, MarketAssumptions::default(), as_of()).unwrap()
            .with_config(ScreeningConfig::sequential());
        group.bench_with_input(BenchmarkId::new("sequential", size), &bonds, |b, bonds| {
            b.iter(|| sequential.screen(black_box(bonds), horizons))
        });

        let parallel = Screener::new(&book, MarketAssumptions::default(), as_of()).unwrap()
            .with_config(ScreeningConfig::new().with_threshold(1));
        group.bench_with_input(BenchmarkId::new("parallel", size), &bonds, |b, bonds| {
            b.iter(|| parallel.screen(black_box(bonds), horizons))
        });
    }

    group.finish();
}

criterion_group!(single_bond, bench_single_bond_yield, bench_candidate_filter);
criterion_group!(batch_screening, bench_screening);
criterion_main!(single_bond, batch_screening);
