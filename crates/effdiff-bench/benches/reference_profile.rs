//! Criterion benchmarks for the full estimator on the reference crop.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use effdiff_bench::{reference_estimator, reference_profile, stress_profile};
use effdiff_diagnostic::ContourMethod;

fn bench_estimate_reference(c: &mut Criterion) {
    let tracer = reference_profile(42);
    let estimator = reference_estimator(ContourMethod::Sorted, true);

    c.bench_function("estimate_reference_52x88x223", |b| {
        b.iter(|| {
            let field = estimator.estimate(&tracer).unwrap();
            black_box(&field);
        });
    });
}

fn bench_estimate_reference_sequential(c: &mut Criterion) {
    let tracer = reference_profile(42);
    let estimator = reference_estimator(ContourMethod::Sorted, false);

    c.bench_function("estimate_reference_sequential", |b| {
        b.iter(|| {
            let field = estimator.estimate(&tracer).unwrap();
            black_box(&field);
        });
    });
}

fn bench_estimate_stress(c: &mut Criterion) {
    let tracer = stress_profile(42);
    let estimator = reference_estimator(ContourMethod::Sorted, true);

    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("estimate_stress_52x176x446", |b| {
        b.iter(|| {
            let field = estimator.estimate(&tracer).unwrap();
            black_box(&field);
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_estimate_reference,
    bench_estimate_reference_sequential,
    bench_estimate_stress
);
criterion_main!(benches);
