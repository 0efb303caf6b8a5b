use criterion::{BenchmarkId, Criterion, criterion_group};
use itertools::interleave;
use rand::prelude::*;
use round_robin_merge::{InequalityHandling, round_robin};

fn bench_itertools(c: &mut Criterion) {
    let n_els = 2_usize.pow(20);
    let vec = StdRng::seed_from_u64(0)
        .random_iter()
        .take(n_els)
        .collect::<Vec<u64>>();
    let (a, b) = vec.split_at(n_els / 2);

    let mut group = c.benchmark_group("Two producers VS Itertools");
    group.bench_function("RoundRobin relocate", |bencher| {
        bencher.iter(|| {
            round_robin([a, b], InequalityHandling::Relocate)
                .unwrap()
                .into_vec()
                .unwrap()
        });
    });
    group.bench_function("Itertools interleave", |bencher| {
        bencher.iter(|| interleave(a, b).collect::<Vec<_>>());
    });
    group.finish();
}

fn bench_policies(c: &mut Criterion) {
    let iter_counts = [2, 8, 64, 512];
    let n_els = 2_usize.pow(18);
    let mut rng = StdRng::seed_from_u64(0);
    let vec = rng.clone().random_iter().take(n_els).collect::<Vec<u64>>();

    for n_iters in iter_counts {
        // unequal lengths, so every policy has something to handle
        let mut bounds = (0..n_iters - 1)
            .map(|_| rng.random_range(0..n_els))
            .collect::<Vec<_>>();
        bounds.push(0);
        bounds.push(n_els);
        bounds.sort_unstable();
        let sources = bounds
            .windows(2)
            .map(|w| &vec[w[0]..w[1]])
            .collect::<Vec<_>>();

        let mut group = c.benchmark_group(format!("Policies ({n_els} items)"));
        for policy in InequalityHandling::ALL {
            group.bench_function(BenchmarkId::new(policy.name(), n_iters), |bencher| {
                bencher.iter(|| {
                    round_robin(sources.iter().copied(), policy)
                        .unwrap()
                        .into_vec()
                        .unwrap()
                });
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_itertools, bench_policies);
