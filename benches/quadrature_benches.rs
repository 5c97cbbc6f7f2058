use app_area::numerical::app_area::AppAreaAnalysis;
use app_area::numerical::app_survey::{ReferenceAreas, SampleSet};
use app_area::numerical::quadrature::{simpson, trapezoid};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_survey_rules(c: &mut Criterion) {
    let samples = SampleSet::survey();
    let y = samples.y_upper.as_slice();
    c.bench_function("trapezoid, 21 stations", |b| {
        b.iter(|| trapezoid(black_box(y), black_box(samples.h)))
    });
    c.bench_function("simpson, 21 stations", |b| {
        b.iter(|| simpson(black_box(y), black_box(samples.h)))
    });
}

fn bench_fine_grid(c: &mut Criterion) {
    let n = 100_000;
    let h = std::f64::consts::PI / n as f64;
    let y: Vec<f64> = (0..=n).map(|i| (i as f64 * h).sin()).collect();
    c.bench_function("simpson, 100k intervals", |b| {
        b.iter(|| simpson(black_box(&y), black_box(h)))
    });
}

fn bench_full_analysis(c: &mut Criterion) {
    let samples = SampleSet::survey();
    let references = ReferenceAreas::default();
    c.bench_function("APP analysis", |b| {
        b.iter(|| AppAreaAnalysis::run(black_box(&samples), black_box(&references)))
    });
}

criterion_group!(benches, bench_survey_rules, bench_fine_grid, bench_full_analysis);
criterion_main!(benches);
