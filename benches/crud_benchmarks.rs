use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;
use std::hint::black_box;
use tree234::Tree234;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Benchmarks ─────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("insert_{order}"));

        group.bench_function(BenchmarkId::new("Tree234", N), |b| {
            b.iter(|| {
                let mut tree = Tree234::new();
                for &k in &keys {
                    tree.insert(k).unwrap();
                }
                tree
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.finish();
    }
}

fn bench_search(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let tree: Tree234 = keys.iter().copied().collect();
        let set: BTreeSet<i64> = keys.iter().copied().collect();
        let mut group = c.benchmark_group(format!("search_{order}"));

        group.bench_function(BenchmarkId::new("Tree234", N), |b| {
            b.iter(|| {
                for &k in &keys {
                    black_box(tree.search(k));
                }
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                for &k in &keys {
                    black_box(set.contains(&k));
                }
            });
        });

        group.finish();
    }
}

fn bench_delete(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("delete_{order}"));

        group.bench_function(BenchmarkId::new("Tree234", N), |b| {
            b.iter_batched(
                || keys.iter().copied().collect::<Tree234>(),
                |mut tree| {
                    for &k in &keys {
                        black_box(tree.delete(k));
                    }
                    tree
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter_batched(
                || keys.iter().copied().collect::<BTreeSet<i64>>(),
                |mut set| {
                    for &k in &keys {
                        black_box(set.remove(&k));
                    }
                    set
                },
                BatchSize::LargeInput,
            );
        });

        group.finish();
    }
}

criterion_group!(crud_benches, bench_insert, bench_search, bench_delete);

criterion_main!(crud_benches);
