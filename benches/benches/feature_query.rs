// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use maptile_feature_index::{
    CanonicalTileId, FeatureIndex, FeatureType, GeometryTileFeature, LayerKind, MemoryFeature,
    MemoryTileData, QueryParams, RenderLayer, RenderedQueryOptions,
};

struct Fill(&'static str);

impl RenderLayer for Fill {
    fn id(&self) -> &str {
        self.0
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Fill
    }

    fn query_intersects_feature(
        &self,
        query_geometry: &[Point],
        feature: &dyn GeometryTileFeature,
        _zoom: u8,
        _bearing: f64,
        _pixels_to_tile_units: f64,
    ) -> bool {
        let geometries = feature.geometries();
        query_geometry.iter().any(|q| {
            geometries
                .iter()
                .flatten()
                .any(|p| (p.x - q.x).abs() < 64.0 && (p.y - q.y).abs() < 64.0)
        })
    }
}

/// `n`×`n` squares over the tile, drawn by two layers sharing one bucket.
fn build_index(n: usize) -> FeatureIndex<MemoryTileData> {
    let step = 8192.0 / n as f64;
    let mut data = MemoryTileData::new();
    let mut rings = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let (x0, y0) = (x as f64 * step, y as f64 * step);
            let ring = vec![
                Point::new(x0, y0),
                Point::new(x0 + step * 0.8, y0),
                Point::new(x0 + step * 0.8, y0 + step * 0.8),
                Point::new(x0, y0 + step * 0.8),
                Point::new(x0, y0),
            ];
            data.layer_mut("landuse")
                .push(MemoryFeature::new(FeatureType::Polygon, vec![ring.clone()]));
            rings.push(ring);
        }
    }
    let mut index = FeatureIndex::new(Some(data));
    for (i, ring) in rings.iter().enumerate() {
        index.insert(core::slice::from_ref(ring), i, "landuse", "landuse");
    }
    index.set_bucket_layer_ids("landuse", ["landuse-fill", "landuse-outline"]);
    index
}

fn bench_click_query(c: &mut Criterion) {
    let fill = Fill("landuse-fill");
    let outline = Fill("landuse-outline");
    let layers: [&dyn RenderLayer; 2] = [&fill, &outline];
    let params = QueryParams::new(CanonicalTileId::new(14, 8185, 5449), "composite")
        .with_additional_radius(4.0);
    let options = RenderedQueryOptions::default();
    let clicks: Vec<_> = (0..64)
        .map(|i| Point::new(f64::from(i) * 127.0 + 3.0, f64::from(i) * 61.0 + 7.0))
        .collect();

    let mut group = c.benchmark_group("feature_query_click");
    for &n in &[8usize, 32, 128] {
        let index = build_index(n);
        group.throughput(Throughput::Elements(clicks.len() as u64));
        group.bench_function(BenchmarkId::new("squares", n * n), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for click in &clicks {
                    let result = index
                        .query(
                            core::slice::from_ref(click),
                            &params,
                            &options,
                            &layers,
                            &(),
                        )
                        .unwrap();
                    hits += result.values().map(Vec::len).sum::<usize>();
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_click_query);
criterion_main!(benches);
