//! Criterion micro-benchmarks for grid construction, geometry and active
//! index compression.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use strata_bench::{faulted_grid, reference_grid};

/// Benchmark: build a 40x40x10 faulted grid, including depth repair.
fn bench_grid_build(c: &mut Criterion) {
    c.bench_function("grid_build_16k", |b| {
        b.iter(|| black_box(faulted_grid(40, 40, 10, 15.0).unwrap()));
    });
}

/// Benchmark: evaluate every cell volume of the reference grid.
fn bench_cell_volumes(c: &mut Criterion) {
    let grid = reference_grid().unwrap();
    c.bench_function("cell_volumes_200k", |b| {
        b.iter(|| {
            let total: f64 = (0..grid.cartesian_size())
                .map(|g| grid.cell_volume(g).unwrap())
                .sum();
            black_box(total);
        });
    });
}

/// Benchmark: compress then expand a full-length property.
fn bench_compress_expand(c: &mut Criterion) {
    let grid = reference_grid().unwrap();
    let values: Vec<f32> = (0..grid.cartesian_size()).map(|g| g as f32).collect();
    c.bench_function("compress_expand_200k", |b| {
        b.iter(|| {
            let active = grid.compress(&values).unwrap();
            black_box(grid.expand(&active, 0.0).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_grid_build,
    bench_cell_volumes,
    bench_compress_expand
);
criterion_main!(benches);
