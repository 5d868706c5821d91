//! Micro-benchmarks for the membership oracle and the sampling strategies.
//!
//! These measure the raw cost of point generation and escape-time testing
//! in isolation, without the estimator loop around them.
//!
//! Run with:
//! ```bash
//! cargo bench --bench sampling
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_complex::Complex64;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use mandel_rs::domain::Domain;
use mandel_rs::escape;
use mandel_rs::estimator::Estimator;
use mandel_rs::sampling::Strategy;

fn bench_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("oracle/in_set");

    // A boundary-hugging point that exhausts the budget, the worst case.
    let slow = Complex64::new(-0.75, 0.05);
    for budget in [100u32, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(budget), &budget, |b, &budget| {
            b.iter(|| escape::in_set(slow, budget));
        });
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/generate");
    let domain = Domain::full();

    for count in [1024usize, 4096] {
        group.throughput(Throughput::Elements(count as u64));
        for strategy in [Strategy::Random, Strategy::Hypercube, Strategy::Orthogonal] {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            group.bench_function(BenchmarkId::new(strategy.name(), count), |b| {
                b.iter(|| strategy.generate(&domain, count, &mut rng).unwrap());
            });
        }
    }
    group.finish();
}

fn bench_estimation_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator/round");
    group.sample_size(20);

    for (label, stratified) in [("flat", false), ("stratified", true)] {
        let estimator = Estimator::new(Domain::upper_half(), Strategy::Random, 10_000, 100)
            .with_symmetry(true);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        group.bench_function(label, |b| {
            b.iter(|| estimator.run(1, stratified, &mut rng).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_oracle, bench_strategies, bench_estimation_round);
criterion_main!(benches);
