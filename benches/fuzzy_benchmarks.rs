//! # Encore Performance Benchmarks
//!
//! Benchmarks for the fuzzy name resolver, the one hot path that scales
//! with catalogue size: `playlist list -n QUERY` scores every stored name.
//!
//! ```bash
//! cargo bench
//! cargo bench fuzzy
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use encore::fuzzy;
use std::hint::black_box;

/// Realistic playlist names: a few word-salad genres per index.
fn generate_names(count: usize) -> Vec<String> {
    let moods = ["morning", "late night", "rainy day", "focus", "workout"];
    let genres = ["jazz", "rock", "lofi", "classical", "synthwave"];
    (0..count)
        .map(|i| {
            format!(
                "{} {} {}",
                moods[i % moods.len()],
                genres[(i / moods.len()) % genres.len()],
                i
            )
        })
        .collect()
}

fn bench_weighted_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_weighted_ratio");

    group.bench_function("short_vs_short", |b| {
        b.iter(|| fuzzy::weighted_ratio(black_box("jazz"), black_box("jazzy nights")));
    });

    group.bench_function("short_vs_long", |b| {
        b.iter(|| {
            fuzzy::weighted_ratio(
                black_box("jazz"),
                black_box("the very long morning jazz compilation volume three"),
            )
        });
    });

    group.bench_function("reordered_tokens", |b| {
        b.iter(|| fuzzy::weighted_ratio(black_box("nights jazzy late"), black_box("late jazzy nights")));
    });

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_extract");

    for size in [10usize, 100, 1000] {
        let names = generate_names(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &names, |b, names| {
            b.iter(|| fuzzy::extract(black_box("morning jazz"), names, 10));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_weighted_ratio, bench_extract);
criterion_main!(benches);
