use brick_octree_core::prelude::*;
use brick_octree_storage::prelude::*;
use utilities::data_sets::{checkerboard, random_voxels, sphere};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn sphere_model(edge_len: i32) -> SparseVoxelModel {
    let shape = Point3i::fill(edge_len);

    SparseVoxelModel::fill_with(shape, sphere(shape, 1))
}

fn svo_build_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("svo_build_sphere");
    for power in [4, 5, 6].iter() {
        let edge_len = 1 << *power;
        group.bench_with_input(
            BenchmarkId::from_parameter(edge_len),
            &edge_len,
            |b, &edge_len| {
                b.iter_with_setup(
                    || sphere_model(edge_len),
                    |model| SparseVoxelOctree::from_model(&model),
                );
            },
        );
    }
    group.finish();
}

fn svo_build_sphere_from_bricks(c: &mut Criterion) {
    let mut group = c.benchmark_group("svo_build_sphere_from_bricks");
    for power in [4, 5, 6].iter() {
        let edge_len = 1 << *power;
        group.bench_with_input(
            BenchmarkId::from_parameter(edge_len),
            &edge_len,
            |b, &edge_len| {
                b.iter_with_setup(
                    || BrickMap::from_model(&sphere_model(edge_len)),
                    |bricks| SparseVoxelOctree::from_model(&bricks),
                );
            },
        );
    }
    group.finish();
}

fn svo_build_checkerboard_unpruned(c: &mut Criterion) {
    let mut group = c.benchmark_group("svo_build_checkerboard_unpruned");
    let builder = SvoBuilder {
        prune: false,
        ..Default::default()
    };
    for power in [4, 5, 6].iter() {
        let edge_len = 1 << *power;
        group.bench_with_input(
            BenchmarkId::from_parameter(edge_len),
            &edge_len,
            |b, &edge_len| {
                b.iter_with_setup(
                    || SparseVoxelModel::fill_with(Point3i::fill(edge_len), checkerboard(1, 2)),
                    |model| builder.build(Some(&model)),
                );
            },
        );
    }
    group.finish();
}

fn svo_get_random_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("svo_get_random_points");
    for power in [4, 5, 6].iter() {
        let edge_len = 1 << *power;
        let shape = Point3i::fill(edge_len);
        let mut model = SparseVoxelModel::new(shape);
        for (p, m) in random_voxels(shape, 0.5, 1) {
            model.insert(p, m);
        }
        let queries: Vec<_> = random_voxels(shape, 0.1, 2)
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        let svo = SparseVoxelOctree::from_model(&model).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(edge_len), &svo, |b, svo| {
            b.iter(|| {
                for p in queries.iter() {
                    black_box(svo.get(*p));
                }
            });
        });
    }
    group.finish();
}

fn svo_visit_voxels_of_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("svo_visit_voxels_of_sphere");
    for power in [4, 5, 6].iter() {
        let edge_len = 1 << *power;
        group.bench_with_input(
            BenchmarkId::from_parameter(edge_len),
            &edge_len,
            |b, &edge_len| {
                b.iter_with_setup(
                    || SparseVoxelOctree::from_model(&sphere_model(edge_len)).unwrap(),
                    |svo| {
                        svo.visit_voxels(|p, m| {
                            black_box((p, m));
                        });
                    },
                );
            },
        );
    }
    group.finish();
}

fn svo_pack_texture_of_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("svo_pack_texture_of_sphere");
    for power in [4, 5, 6].iter() {
        let edge_len = 1 << *power;
        group.bench_with_input(
            BenchmarkId::from_parameter(edge_len),
            &edge_len,
            |b, &edge_len| {
                b.iter_with_setup(
                    || SparseVoxelOctree::from_model(&sphere_model(edge_len)).unwrap(),
                    |svo| svo.to_texture(),
                );
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    svo_build_sphere,
    svo_build_sphere_from_bricks,
    svo_build_checkerboard_unpruned,
    svo_get_random_points,
    svo_visit_voxels_of_sphere,
    svo_pack_texture_of_sphere
);
criterion_main!(benches);
