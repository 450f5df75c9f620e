use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use probe_collections::ProbeMap;
use rand_core::{RngCore, SeedableRng};
use rand_pcg::Lcg128Xsl64 as Pcg;
use std::time::Duration;

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn keys(seed: u64, n: usize) -> Vec<String> {
    let mut rng = Pcg::seed_from_u64(seed);
    (0..n).map(|_| key(rng.next_u64())).collect()
}

fn filled(seed: u64, n: usize) -> (ProbeMap<String, u64>, Vec<String>) {
    let ks = keys(seed, n);
    let mut m = ProbeMap::new();
    for (i, k) in ks.iter().enumerate() {
        m.insert(k.clone(), i as u64);
    }
    (m, ks)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe_map::insert");
    group.throughput(Throughput::Elements(100_000));
    let ks = keys(1, 100_000);
    group.bench_function("fresh_100k", |b| {
        b.iter_batched(
            || ks.clone(),
            |ks| {
                let mut m = ProbeMap::new();
                for (i, k) in ks.into_iter().enumerate() {
                    m.insert(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("hashbrown_fresh_100k", |b| {
        b.iter_batched(
            || ks.clone(),
            |ks| {
                let mut m = hashbrown::HashMap::new();
                for (i, k) in ks.into_iter().enumerate() {
                    m.insert(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe_map::lookup");
    group.throughput(Throughput::Elements(10_000));
    let (m, ks) = filled(7, 100_000);
    let hb: hashbrown::HashMap<String, u64> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
    let mut rng = Pcg::seed_from_u64(0x9e3779b97f4a7c15);
    let hits: Vec<String> = (0..10_000)
        .map(|_| ks[(rng.next_u64() as usize) % ks.len()].clone())
        .collect();
    let misses = keys(0xdead_beef, 10_000);

    group.bench_function("hit_10k_on_100k", |b| {
        b.iter(|| {
            for k in &hits {
                black_box(m.get(k));
            }
        })
    });
    group.bench_function("hashbrown_hit_10k_on_100k", |b| {
        b.iter(|| {
            for k in &hits {
                black_box(hb.get(k));
            }
        })
    });
    group.bench_function("miss_10k_on_100k", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(m.get(k));
            }
        })
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe_map::remove");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (m, ks) = filled(5, 110_000);
                let mut rng = Pcg::seed_from_u64(6);
                let victims: Vec<String> = (0..10_000)
                    .map(|_| ks[(rng.next_u64() as usize) % ks.len()].clone())
                    .collect();
                (m, victims)
            },
            |(mut m, victims)| {
                for k in &victims {
                    black_box(m.remove(k));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    // Drain to a tenth: exercises the shrink path repeatedly.
    group.bench_function("drain_90k_of_100k", |b| {
        b.iter_batched(
            || filled(9, 100_000),
            |(mut m, ks)| {
                for k in &ks[..90_000] {
                    m.remove(k);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("remove_where_half_100k", |b| {
        b.iter_batched(
            || filled(10, 100_000).0,
            |mut m| {
                black_box(m.remove_where(|_, v| v % 2 == 0));
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let (m, _) = filled(999, 100_000);
    c.bench_function("probe_map::iter_all_100k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in m.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_lookup, bench_remove, bench_iter
}
criterion_main!(benches);
