//! Elimination throughput across input sizes and index backends.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{Point2, Point3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sample_elim::{
    elimination_threshold, EliminationConfig, IndexKind, PointSet, SampleEliminator, Sampler,
};

fn square(n: usize) -> PointSet<f64, 2> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n).map(|_| Point2::new(rng.gen(), rng.gen())).collect()
}

fn cube(n: usize) -> PointSet<f32, 3> {
    let mut rng = StdRng::seed_from_u64(11);
    (0..n)
        .map(|_| Point3::new(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

fn bench_eliminate_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("eliminate_2d");

    for &target in &[100usize, 1_000, 5_000] {
        let input = square(target * 5);
        let d_max = elimination_threshold(2, target, 1.0).unwrap_or(0.1);
        let eliminator = SampleEliminator::<f64, 2>::default();

        group.bench_with_input(BenchmarkId::from_parameter(target), &input, |b, input| {
            b.iter(|| eliminator.eliminate(black_box(input), target, d_max, 2))
        });
    }

    group.finish();
}

fn bench_eliminate_3d(c: &mut Criterion) {
    let input = cube(10_000);
    let d_max = elimination_threshold(3, 1_000, 1.0).unwrap_or(0.1) as f32;
    let eliminator = SampleEliminator::<f32, 3>::default();

    c.bench_function("eliminate_3d_10k_to_1k", |b| {
        b.iter(|| eliminator.eliminate(black_box(&input), 1_000, d_max, 3))
    });
}

fn bench_index_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_backend");
    let input = square(2_000);
    let d_max = elimination_threshold(2, 400, 1.0).unwrap_or(0.1);

    for kind in [IndexKind::KdTree, IndexKind::Flat] {
        let eliminator = SampleEliminator::<f64, 2>::new(EliminationConfig::new().with_index(kind));
        group.bench_function(format!("{:?}", kind), |b| {
            b.iter(|| eliminator.eliminate(black_box(&input), 400, d_max, 2))
        });
    }

    group.finish();
}

fn bench_progressive(c: &mut Criterion) {
    let input = square(5_000);
    let d_max = elimination_threshold(2, 1_000, 1.0).unwrap_or(0.1);
    let eliminator =
        SampleEliminator::<f64, 2>::new(EliminationConfig::new().with_progressive(true));

    c.bench_function("progressive_5k_to_1k", |b| {
        b.iter(|| eliminator.eliminate(black_box(&input), 1_000, d_max, 2))
    });
}

fn bench_flat_boundary(c: &mut Criterion) {
    let input: Vec<u8> = square(5_000)
        .to_flat()
        .into_iter()
        .flat_map(f64::to_le_bytes)
        .collect();
    let sampler = Sampler::default();

    c.bench_function("compute_and_eliminate_5k_to_1k", |b| {
        b.iter(|| sampler.compute_and_eliminate::<f64>(black_box(&input), 5_000, 2, 1.0, 1_000))
    });
}

criterion_group!(
    benches,
    bench_eliminate_2d,
    bench_eliminate_3d,
    bench_index_backends,
    bench_progressive,
    bench_flat_boundary
);
criterion_main!(benches);
