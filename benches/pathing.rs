use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use treemaze::{
    generators,
    pathing,
    units::{Length, Width},
    validation,
};

fn bench_distances_from_target_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(1);
    let tree = generators::spanning_tree(Width(32), Length(32), &mut rng).unwrap();
    c.bench_function("distances_from_target_32", move |b| {
        b.iter(|| pathing::Distances::from_target(&tree))
    });
}

fn bench_longest_path_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(2);
    let tree = generators::spanning_tree(Width(32), Length(32), &mut rng).unwrap();
    c.bench_function("longest_path_32", move |b| {
        b.iter(|| pathing::longest_path(&tree))
    });
}

fn bench_verify_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(3);
    let tree = generators::spanning_tree(Width(32), Length(32), &mut rng).unwrap();
    c.bench_function("verify_spanning_tree_32", move |b| {
        b.iter(|| validation::verify_spanning_tree(&tree).unwrap())
    });
}

criterion_group!(
    benches,
    bench_distances_from_target_32,
    bench_longest_path_32,
    bench_verify_32
);
criterion_main!(benches);
