//! Criterion micro-benchmarks for the block store.

use churn_core::Ttl;
use churn_pool::BlockStore;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Store with `n` blocks of cycling sizes.
fn make_store(n: u64) -> BlockStore {
    let mut store = BlockStore::with_capacity(n as usize);
    for i in 0..n {
        store.push_back(1 + i % 4096, Ttl::INFINITE);
    }
    store
}

/// Benchmark: Push 10K blocks into an empty store, then drain it.
fn bench_push_pop_10k(c: &mut Criterion) {
    c.bench_function("store_push_pop_10k", |b| {
        b.iter(|| {
            let mut store = BlockStore::with_capacity(10_000);
            for i in 0..10_000u64 {
                store.push_back(1 + i % 4096, Ttl::INFINITE);
            }
            while let Some(block) = store.pop_back() {
                black_box(block.size());
            }
        });
    });
}

/// Benchmark: Remove from the middle of a 10K store and push back.
fn bench_remove_at_middle_10k(c: &mut Criterion) {
    let mut store = make_store(10_000);
    c.bench_function("store_remove_at_middle_10k", |b| {
        b.iter(|| {
            let block = store.remove_at(5_000);
            store.push_back(block.size(), block.ttl());
            black_box(store.len());
        });
    });
}

/// Benchmark: Linear max scan over 10K blocks.
fn bench_find_max_10k(c: &mut Criterion) {
    let store = make_store(10_000);
    c.bench_function("store_find_max_10k", |b| {
        b.iter(|| {
            black_box(store.find_max());
        });
    });
}

criterion_group!(
    benches,
    bench_push_pop_10k,
    bench_remove_at_middle_10k,
    bench_find_max_10k
);
criterion_main!(benches);
