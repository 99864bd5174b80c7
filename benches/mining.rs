//! Benchmarks for co-occurrence mining.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ingredient_groups::mining::{generate_candidates, log_scores, log_scores_sequential};
use ingredient_groups::prelude::*;

/// Recipes built from a few overlapping "cuisines" plus noise, from a fixed
/// linear congruential sequence so every run sees the same data.
fn synthetic_recipes(n_records: usize, n_items: usize) -> BinaryMatrix {
    let mut state: u64 = 42;
    let mut next = move || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        (state >> 33) as usize
    };

    let transactions: Vec<Vec<usize>> = (0..n_records)
        .map(|_| {
            let cuisine = next() % 8;
            let base = cuisine * (n_items / 8);
            let mut items: Vec<usize> = (0..4)
                .map(|j| base + j)
                .filter(|_| next() % 4 != 0)
                .collect();
            items.extend((0..3).map(|_| next() % n_items));
            items
        })
        .collect();

    let names = (0..n_items).map(|i| format!("ingredient{i}")).collect();
    BinaryMatrix::from_transactions(names, &transactions).unwrap()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("cooccurrence_fit");

    for n_records in [1_000, 5_000, 20_000].iter() {
        let data = synthetic_recipes(*n_records, 200);
        let miner = CooccurrenceMiner::new()
            .with_min_support(n_records / 100)
            .with_min_score(2.0);

        group.bench_with_input(BenchmarkId::from_parameter(n_records), n_records, |b, _| {
            b.iter(|| miner.fit(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

fn bench_candidate_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_candidates");

    for n_items in [50, 200, 600].iter() {
        let singletons: Vec<ItemSet> = (0..*n_items).map(ItemSet::singleton).collect();
        let pairs = generate_candidates(&singletons, &singletons);

        group.bench_with_input(BenchmarkId::from_parameter(n_items), n_items, |b, _| {
            let frontier = &pairs[..pairs.len().min(2_000)];
            b.iter(|| generate_candidates(black_box(frontier), &singletons));
        });
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_scores");
    let data = synthetic_recipes(20_000, 200);
    let singletons: Vec<ItemSet> = (0..data.n_items()).map(ItemSet::singleton).collect();
    let pairs = generate_candidates(&singletons, &singletons);

    group.bench_function("default", |b| {
        b.iter(|| log_scores(black_box(&data), black_box(&pairs), 200).unwrap());
    });
    group.bench_function("sequential", |b| {
        b.iter(|| log_scores_sequential(black_box(&data), black_box(&pairs), 200).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_fit, bench_candidate_generation, bench_scoring);
criterion_main!(benches);
