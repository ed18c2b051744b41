//! Octree benchmarks.
//!
//! - **insert**: rebuild a tree from scratch, as a host does once per step
//! - **query**: coarse vs exact range queries against a built tree
//! - **batch**: parallel query phase vs the same queries run sequentially

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial_octree::{DAabb3, Octree, OctreeConfig};

const WORLD_HALF: f64 = 500.0;

fn scatter(count: usize, seed: u64) -> Vec<DAabb3> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..count)
    .map(|_| {
      let center = DVec3::new(
        rng.random_range(-WORLD_HALF..WORLD_HALF),
        rng.random_range(-WORLD_HALF..WORLD_HALF),
        rng.random_range(-WORLD_HALF..WORLD_HALF),
      );
      DAabb3::cube(center, rng.random_range(0.5..3.0))
    })
    .collect()
}

fn build(boxes: &[DAabb3]) -> Octree<u32> {
  let mut tree = Octree::with_bounds(OctreeConfig::default(), DAabb3::cube(DVec3::ZERO, WORLD_HALF))
    .expect("valid bounds");
  tree
    .insert_all(boxes.iter().enumerate().map(|(i, b)| (i as u32, b)))
    .expect("prepared tree");
  tree
}

fn probes(count: usize, radius: f64) -> Vec<(DVec3, f64)> {
  let mut rng = StdRng::seed_from_u64(99);
  (0..count)
    .map(|_| {
      let center = DVec3::new(
        rng.random_range(-WORLD_HALF..WORLD_HALF),
        rng.random_range(-WORLD_HALF..WORLD_HALF),
        rng.random_range(-WORLD_HALF..WORLD_HALF),
      );
      (center, radius)
    })
    .collect()
}

fn bench_insert(c: &mut Criterion) {
  let mut group = c.benchmark_group("insert");
  for count in [1_000usize, 10_000, 50_000] {
    let boxes = scatter(count, 1);
    group.bench_with_input(BenchmarkId::from_parameter(count), &boxes, |b, boxes| {
      b.iter(|| black_box(build(boxes)))
    });
  }
  group.finish();
}

fn bench_query(c: &mut Criterion) {
  let boxes = scatter(20_000, 2);
  let tree = build(&boxes);
  let queries = probes(256, 25.0);

  let mut group = c.benchmark_group("query");
  group.bench_function("coarse", |b| {
    b.iter(|| {
      for &(center, radius) in &queries {
        black_box(tree.find_in_range(center, radius).unwrap());
      }
    })
  });
  group.bench_function("exact", |b| {
    b.iter(|| {
      for &(center, radius) in &queries {
        black_box(tree.find_in_range_exact(center, radius).unwrap());
      }
    })
  });
  group.bench_function("linear_scan", |b| {
    b.iter(|| {
      for &(center, radius) in &queries {
        let cube = DAabb3::cube(center, radius);
        black_box(boxes.iter().filter(|bx| bx.overlaps(&cube)).count());
      }
    })
  });
  group.finish();
}

fn bench_batch(c: &mut Criterion) {
  let tree = build(&scatter(20_000, 3));
  let queries = probes(2048, 25.0);

  let mut group = c.benchmark_group("batch");
  group.bench_function("parallel", |b| {
    b.iter(|| black_box(tree.find_in_range_batch(&queries).unwrap()))
  });
  group.bench_function("sequential", |b| {
    b.iter(|| {
      let results: Vec<_> = queries
        .iter()
        .map(|&(center, radius)| tree.find_in_range(center, radius).unwrap())
        .collect();
      black_box(results)
    })
  });
  group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_batch);
criterion_main!(benches);
