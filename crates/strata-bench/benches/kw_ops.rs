//! Criterion micro-benchmarks for the keyword-record codec.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use strata_kw::{KeywordData, KeywordEntry, KeywordFile, Layout};

/// A grid-sized file: 100K-element `ZCORN` plus a matching `ACTNUM`.
fn make_file() -> KeywordFile {
    KeywordFile::from_entries([
        KeywordEntry::new(
            "ZCORN",
            KeywordData::Float((0..100_000).map(|i| 1000.0 + (i % 97) as f32).collect()),
        ),
        KeywordEntry::new(
            "ACTNUM",
            KeywordData::Int((0..12_500).map(|i| i32::from(i % 7 != 0)).collect()),
        ),
    ])
}

/// Benchmark: write the file in the binary layout.
fn bench_encode_binary(c: &mut Criterion) {
    let file = make_file();
    c.bench_function("kw_encode_binary_100k", |b| {
        b.iter(|| {
            let buf = file.write_to(Vec::with_capacity(512 * 1024), Layout::Binary).unwrap();
            black_box(buf);
        });
    });
}

/// Benchmark: read the file back from the binary layout.
fn bench_decode_binary(c: &mut Criterion) {
    let buf = make_file().write_to(Vec::new(), Layout::Binary).unwrap();
    c.bench_function("kw_decode_binary_100k", |b| {
        b.iter(|| black_box(KeywordFile::read_from(buf.as_slice(), Layout::Binary).unwrap()));
    });
}

/// Benchmark: read the file back from the formatted layout.
fn bench_decode_formatted(c: &mut Criterion) {
    let buf = make_file().write_to(Vec::new(), Layout::Formatted).unwrap();
    c.bench_function("kw_decode_formatted_100k", |b| {
        b.iter(|| black_box(KeywordFile::read_from(buf.as_slice(), Layout::Formatted).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_encode_binary,
    bench_decode_binary,
    bench_decode_formatted
);
criterion_main!(benches);
