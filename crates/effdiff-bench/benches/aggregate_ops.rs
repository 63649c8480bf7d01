//! Criterion benchmarks for the temporal aggregates.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use effdiff_aggregate::Calendar;
use effdiff_bench::reference_series;

fn bench_annual_statistics(c: &mut Criterion) {
    let series = reference_series();
    let calendar = Calendar::default();

    c.bench_function("annual_statistics_21y", |b| {
        b.iter(|| {
            let stats = calendar.annual_statistics(&series).unwrap();
            black_box(&stats);
        });
    });
}

fn bench_weekly_composite(c: &mut Criterion) {
    let series = reference_series();
    let calendar = Calendar::default();

    c.bench_function("weekly_composite_21y", |b| {
        b.iter(|| {
            let composite = calendar.weekly_composite(&series).unwrap();
            black_box(&composite);
        });
    });
}

criterion_group!(benches, bench_annual_statistics, bench_weekly_composite);
criterion_main!(benches);
