//! Criterion benchmarks for the Floyd-Warshall stepper.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fwsim_core::{AlgorithmStepper, DistanceMatrix, DistanceStore, RandomGraph, VertexBounds};

fn graph(n: usize) -> DistanceMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
    RandomGraph::with_vertices(n).generate(&mut rng).unwrap()
}

fn bench_full_run(c: &mut Criterion) {
    let bounds = VertexBounds::new(1, 256).unwrap();
    let sizes = [10usize, 50, 200];

    let mut group = c.benchmark_group("RunToCompletion");
    for &n in &sizes {
        let matrix = graph(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, matrix| {
            b.iter(|| {
                let mut store = DistanceStore::new(bounds);
                store.initialize(matrix).unwrap();
                let mut stepper = AlgorithmStepper::new(store);
                stepper.run_to_completion()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_run);
criterion_main!(benches);
