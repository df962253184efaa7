//! Benchmarks for the live counter and wrap measurement.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use notefield::field::{TextCounts, content_rows, wrap_ranges};

fn sample_note() -> String {
    "The quick brown fox jumps over the lazy dog. Ünïcödé words count too.\n".repeat(200)
}

fn bench_counts(c: &mut Criterion) {
    let text = sample_note();
    c.bench_function("text_counts", |b| b.iter(|| TextCounts::of(black_box(&text))));
}

fn bench_wrap(c: &mut Criterion) {
    let text = sample_note();
    let line = text.replace('\n', " ");

    c.bench_function("wrap_ranges_long_line", |b| {
        b.iter(|| wrap_ranges(black_box(&line), black_box(74)))
    });
    c.bench_function("content_rows", |b| {
        b.iter(|| content_rows(black_box(text.lines()), black_box(74)))
    });
}

criterion_group!(benches, bench_counts, bench_wrap);
criterion_main!(benches);
