//! Criterion benchmarks for the per-asset analysis hot path.
//!
//! Benchmarks:
//! 1. Synthetic history generation
//! 2. Indicator set over a 120-point series
//! 3. Full evaluate (history + indicators + score + sizing)

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use perpscan_core::history::generate_with_rng;
use perpscan_core::indicators::IndicatorSet;
use perpscan_core::{evaluate, MarketSnapshot, RiskProfile};

fn bench_history(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("history_generate", |b| {
        b.iter(|| generate_with_rng(black_box(64_000.0), black_box(3.5), &mut rng))
    });
}

fn bench_indicators(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let series = generate_with_rng(64_000.0, 3.5, &mut rng).unwrap();
    c.bench_function("indicator_set_120", |b| {
        b.iter(|| IndicatorSet::compute(black_box(&series), black_box(64_000.0)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let snap = MarketSnapshot::new("BTC", 64_000.0, 3.5, 0.01, 2e9);
    let profile = RiskProfile::default();
    c.bench_function("evaluate_asset", |b| {
        b.iter(|| evaluate(black_box(&snap), 10_000.0, &profile, &mut rng))
    });
}

criterion_group!(benches, bench_history, bench_indicators, bench_evaluate);
criterion_main!(benches);
