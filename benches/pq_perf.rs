//! Criterion benchmarks comparing the three indexed queue engines.
//!
//! Workloads:
//! - fill_drain: insert every index, then del_min to empty
//! - decrease_heavy: fill, then repeatedly decrease random keys (the
//!   Fibonacci engine's favourite workload)
//! - churn: interleaved del_min / reinsert cycles
//!
//! ```bash
//! cargo bench --bench pq_perf
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use indexed_heaps::binomial::BinomialIndexPq;
use indexed_heaps::fibonacci::FibonacciIndexPq;
use indexed_heaps::multiway::MultiwayIndexPq;
use indexed_heaps::IndexedMinPq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: &[usize] = &[1_000, 10_000];

/// Pseudo-random but deterministic key for index `i`.
fn key_for(i: usize) -> i64 {
    ((i as i64).wrapping_mul(2_654_435_761) % 1_000_003).abs()
}

fn fill<H: IndexedMinPq<i64>>(pq: &mut H, n: usize) {
    for i in 0..n {
        pq.insert(i, key_for(i)).unwrap();
    }
}

fn bench_fill_drain<H, F>(c: &mut Criterion, engine: &str, make: F)
where
    H: IndexedMinPq<i64>,
    F: Fn(usize) -> H,
{
    let mut group = c.benchmark_group("fill_drain");
    for &n in SIZES {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new(engine, n), &n, |b, &n| {
            b.iter(|| {
                let mut pq = make(n);
                fill(&mut pq, n);
                while !pq.is_empty() {
                    black_box(pq.del_min().unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_decrease_heavy<H, F>(c: &mut Criterion, engine: &str, make: F)
where
    H: IndexedMinPq<i64>,
    F: Fn(usize) -> H,
{
    let mut group = c.benchmark_group("decrease_heavy");
    for &n in SIZES {
        group.throughput(Throughput::Elements(4 * n as u64));
        group.bench_with_input(BenchmarkId::new(engine, n), &n, |b, &n| {
            b.iter(|| {
                let mut pq = make(n);
                fill(&mut pq, n);
                let mut rng = StdRng::seed_from_u64(42);
                for _ in 0..4 * n {
                    let i = rng.gen_range(0..n);
                    let key = *pq.key_of(i).unwrap();
                    pq.decrease_key(i, key - rng.gen_range(1..100)).unwrap();
                }
                while !pq.is_empty() {
                    black_box(pq.del_min().unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_churn<H, F>(c: &mut Criterion, engine: &str, make: F)
where
    H: IndexedMinPq<i64>,
    F: Fn(usize) -> H,
{
    let mut group = c.benchmark_group("churn");
    for &n in SIZES {
        group.throughput(Throughput::Elements(2 * n as u64));
        group.bench_with_input(BenchmarkId::new(engine, n), &n, |b, &n| {
            b.iter(|| {
                let mut pq = make(n);
                fill(&mut pq, n);
                for round in 0..2 * n {
                    let i = pq.del_min().unwrap();
                    pq.insert(i, key_for(i) + round as i64).unwrap();
                }
                black_box(pq.len());
            });
        });
    }
    group.finish();
}

fn all_benches(c: &mut Criterion) {
    bench_fill_drain(c, "binomial", |n| BinomialIndexPq::with_capacity(n));
    bench_fill_drain(c, "fibonacci", |n| FibonacciIndexPq::with_capacity(n));
    bench_fill_drain(c, "multiway_d4", |n| {
        MultiwayIndexPq::with_capacity(n, 4).unwrap()
    });

    bench_decrease_heavy(c, "binomial", |n| BinomialIndexPq::with_capacity(n));
    bench_decrease_heavy(c, "fibonacci", |n| FibonacciIndexPq::with_capacity(n));
    bench_decrease_heavy(c, "multiway_d4", |n| {
        MultiwayIndexPq::with_capacity(n, 4).unwrap()
    });

    bench_churn(c, "binomial", |n| BinomialIndexPq::with_capacity(n));
    bench_churn(c, "fibonacci", |n| FibonacciIndexPq::with_capacity(n));
    bench_churn(c, "multiway_d4", |n| {
        MultiwayIndexPq::with_capacity(n, 4).unwrap()
    });
}

criterion_group!(benches, all_benches);
criterion_main!(benches);
