// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use maptile_grid::{Aabb2D, Backend, FlatVec, GridIndex, UniformGrid};

const EXTENT: f64 = 8192.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Boxes shaped like tile features: mostly small, a few spanning much of the
/// tile (roads, coastlines).
fn gen_feature_boxes(count: usize) -> Vec<Aabb2D> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    (0..count)
        .map(|i| {
            let size = if i % 50 == 0 {
                rng.next_f64() * 4000.0 + 1000.0
            } else {
                rng.next_f64() * 120.0 + 4.0
            };
            let x = rng.next_f64() * (EXTENT - size);
            let y = rng.next_f64() * (EXTENT - size);
            Aabb2D::from_xywh(x, y, size, size)
        })
        .collect()
}

/// Small query boxes, like a click grown by a few pixels of tolerance.
fn gen_click_boxes(count: usize) -> Vec<Aabb2D> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * EXTENT;
            let y = rng.next_f64() * EXTENT;
            Aabb2D::from_xywh(x - 48.0, y - 48.0, 96.0, 96.0)
        })
        .collect()
}

fn fill<B: Backend>(index: &mut GridIndex<u32, B>, boxes: &[Aabb2D]) {
    for (i, aabb) in boxes.iter().copied().enumerate() {
        index.insert(i as u32, aabb);
    }
}

fn bench_insert(c: &mut Criterion) {
    fn bench<B: Backend>(
        b: &mut criterion::Bencher,
        boxes: &[Aabb2D],
        make_index: impl Fn() -> GridIndex<u32, B> + Clone,
    ) {
        b.iter_batched(
            make_index,
            |mut index| {
                fill(&mut index, boxes);
                index
            },
            BatchSize::SmallInput,
        );
    }

    let mut group = c.benchmark_group("grid_insert");
    for &n in &[256usize, 1024, 4096] {
        let boxes = gen_feature_boxes(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            bench(b, &boxes, || {
                GridIndex::with_backend(EXTENT, FlatVec::default())
            });
        });
        group.bench_function(BenchmarkId::new("UniformGrid(16)", n), |b| {
            bench(b, &boxes, || GridIndex::new(EXTENT, 16));
        });
        group.bench_function(BenchmarkId::new("UniformGrid(64)", n), |b| {
            bench(b, &boxes, || {
                GridIndex::with_backend(EXTENT, UniformGrid::new(EXTENT, 64))
            });
        });
    }
    group.finish();
}

fn bench_visit_rect(c: &mut Criterion) {
    fn bench<B: Backend>(
        b: &mut criterion::Bencher,
        boxes: &[Aabb2D],
        queries: &[Aabb2D],
        mut index: GridIndex<u32, B>,
    ) {
        fill(&mut index, boxes);
        b.iter(|| {
            let mut total = 0usize;
            for query in queries {
                index.visit_rect(
                    *query,
                    #[inline(always)]
                    |_, _| total += 1,
                );
            }
            black_box(total)
        });
    }

    let queries = gen_click_boxes(1000);
    let mut group = c.benchmark_group("grid_visit_rect");
    for &n in &[256usize, 1024, 4096] {
        let boxes = gen_feature_boxes(n);
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            bench(
                b,
                &boxes,
                &queries,
                GridIndex::with_backend(EXTENT, FlatVec::default()),
            );
        });
        group.bench_function(BenchmarkId::new("UniformGrid(16)", n), |b| {
            bench(b, &boxes, &queries, GridIndex::new(EXTENT, 16));
        });
        group.bench_function(BenchmarkId::new("UniformGrid(64)", n), |b| {
            bench(
                b,
                &boxes,
                &queries,
                GridIndex::with_backend(EXTENT, UniformGrid::new(EXTENT, 64)),
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_visit_rect);
criterion_main!(benches);
