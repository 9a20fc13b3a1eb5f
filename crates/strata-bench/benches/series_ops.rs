//! Criterion micro-benchmarks for summary series appends and queries.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use strata_bench::filled_series;
use strata_series::ReportStepRule;

/// Benchmark: append 1000 ministeps over 50 wells.
fn bench_append(c: &mut Criterion) {
    c.bench_function("series_append_1k_x_203", |b| {
        b.iter(|| black_box(filled_series(50, 1000).unwrap()));
    });
}

/// Benchmark: read one well variable at every report step.
fn bench_query_by_key(c: &mut Criterion) {
    let mut series = filled_series(50, 1000).unwrap();
    let starts = (0..1000).step_by(10).collect();
    series.set_report_rule(ReportStepRule::Explicit(starts)).unwrap();
    c.bench_function("series_value_at_report_100", |b| {
        b.iter(|| {
            for report in 0..series.report_step_count() {
                black_box(series.value_at_report("WBHP:W25", report).unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_append, bench_query_by_key);
criterion_main!(benches);
