//! Criterion benchmarks for the planner.
//!
//! Two benchmark groups:
//! - `deep_chain`: 1000-item linear chain -- worst case for queue depth
//! - `wide_fan`: 2000 consumers of one shared input -- worst case for
//!   per-producer accumulation

use criterion::{Criterion, criterion_group, criterion_main};
use factorplan_core::plan::{RoundingMode, compute};
use factorplan_core::test_utils::{chain, fan};

fn bench_deep_chain(c: &mut Criterion) {
    let items = chain(1000, 1.5);

    c.bench_function("deep_chain_exact", |b| {
        b.iter(|| compute(&items, RoundingMode::Exact).unwrap())
    });

    c.bench_function("deep_chain_ceiling", |b| {
        b.iter(|| compute(&items, RoundingMode::Ceiling).unwrap())
    });
}

fn bench_wide_fan(c: &mut Criterion) {
    let items = fan(2000, 0.3);

    c.bench_function("wide_fan_ceiling", |b| {
        b.iter(|| compute(&items, RoundingMode::Ceiling).unwrap())
    });
}

criterion_group!(benches, bench_deep_chain, bench_wide_fan);
criterion_main!(benches);
