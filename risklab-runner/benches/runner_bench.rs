//! Criterion benchmarks for risklab hot paths.
//!
//! Benchmarks:
//! 1. Full replay loop (runner + validator + ledger) over synthetic series
//! 2. Risk validation of a single intent

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use risklab_core::domain::{MarketSample, PositionSide};
use risklab_core::risk::{self, RiskParameters, TradeIntent};
use risklab_core::{Ledger, PortfolioValuator};
use risklab_runner::{BacktestRunner, MaCrossStrategy};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(n: usize) -> Vec<MarketSample> {
    let mut rng = StdRng::seed_from_u64(42);
    let base = chrono::DateTime::parse_from_rfc3339("2024-01-02T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let mut price = 100.0_f64;

    (0..n)
        .map(|i| {
            price *= 1.0 + rng.gen_range(-0.01..0.011);
            MarketSample::new(base + chrono::Duration::hours(i as i64))
                .with_price("BENCH", price)
                .with_volume("BENCH", rng.gen_range(10_000.0..1_000_000.0))
        })
        .collect()
}

// ── 1. Replay loop ───────────────────────────────────────────────────

fn bench_backtest_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtest_run");
    for n in [500, 2_000] {
        let series = make_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &series, |b, series| {
            b.iter(|| {
                let mut runner = BacktestRunner::new(RiskParameters::default());
                let mut strategy = MaCrossStrategy::new("BENCH", 10, 40, 5.0);
                let report = runner
                    .run(black_box(series), &mut strategy, 100_000.0)
                    .unwrap();
                black_box(report.final_value)
            })
        });
    }
    group.finish();
}

// ── 2. Risk validation ───────────────────────────────────────────────

fn bench_validate(c: &mut Criterion) {
    let ledger = Ledger::new(100_000.0);
    let valuator = PortfolioValuator::new(100_000.0);
    let summary = valuator.summary(ledger.portfolio());
    let params = RiskParameters::default();
    let intent = TradeIntent {
        symbol: "BENCH".into(),
        side: PositionSide::Long,
        size: 10.0,
        price: 100.0,
    };

    c.bench_function("validate_intent", |b| {
        b.iter(|| {
            let result = risk::validate(black_box(&intent), &summary, &params);
            black_box(result.valid)
        })
    });
}

criterion_group!(benches, bench_backtest_run, bench_validate);
criterion_main!(benches);
