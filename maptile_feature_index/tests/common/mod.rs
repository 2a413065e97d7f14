// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for feature index integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(dead_code, reason = "not every test file uses every fixture")]

use std::sync::atomic::{AtomicUsize, Ordering};

use kurbo::{Line, ParamCurveNearest, Point};
use maptile_feature_index::{
    CanonicalTileId, CollisionIndex, FeatureFilter, FeatureId, FeatureIndex, FeatureType,
    GeometryTileData, GeometryTileFeature, GeometryTileLayer, IndexedSubfeature, LayerKind,
    LayerTranslate, MemoryFeature, MemoryTileData, QueryParams, RenderLayer, UnwrappedTileId,
};

pub(crate) const TILE: CanonicalTileId = CanonicalTileId::new(14, 8185, 5449);
pub(crate) const SOURCE: &str = "composite";

pub(crate) fn params() -> QueryParams<'static> {
    QueryParams::new(TILE, SOURCE)
}

/// Closed square ring.
pub(crate) fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
        Point::new(x, y),
    ]
}

/// Query region covering `[x0, x1] × [y0, y1]`.
pub(crate) fn region(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

/// Exact-test behaviour of a [`TestLayer`].
#[derive(Clone, Copy, Debug)]
pub(crate) enum Hit {
    Always,
    Never,
    /// Some query vertex lies within this many tile units of the feature's
    /// outline.
    Stroke(f64),
}

/// Render layer that counts its intersection tests.
#[derive(Debug)]
pub(crate) struct TestLayer {
    pub(crate) id: &'static str,
    pub(crate) kind: LayerKind,
    pub(crate) hit: Hit,
    pub(crate) translate: LayerTranslate,
    pub(crate) tests: AtomicUsize,
}

impl TestLayer {
    pub(crate) fn new(id: &'static str, kind: LayerKind, hit: Hit) -> Self {
        Self {
            id,
            kind,
            hit,
            translate: LayerTranslate::default(),
            tests: AtomicUsize::new(0),
        }
    }

    pub(crate) fn fill(id: &'static str) -> Self {
        Self::new(id, LayerKind::Fill, Hit::Always)
    }

    pub(crate) fn symbol(id: &'static str) -> Self {
        Self::new(id, LayerKind::Symbol, Hit::Never)
    }

    pub(crate) fn with_translate(mut self, translate: LayerTranslate) -> Self {
        self.translate = translate;
        self
    }

    pub(crate) fn tests(&self) -> usize {
        self.tests.load(Ordering::SeqCst)
    }
}

impl RenderLayer for TestLayer {
    fn id(&self) -> &str {
        self.id
    }

    fn kind(&self) -> LayerKind {
        self.kind
    }

    fn query_intersects_feature(
        &self,
        query_geometry: &[Point],
        feature: &dyn GeometryTileFeature,
        _zoom: u8,
        bearing: f64,
        pixels_to_tile_units: f64,
    ) -> bool {
        self.tests.fetch_add(1, Ordering::SeqCst);
        let query = self
            .translate
            .apply(query_geometry, bearing, pixels_to_tile_units);
        match self.hit {
            Hit::Always => true,
            Hit::Never => false,
            Hit::Stroke(half_width) => feature.geometries().iter().any(|ring| {
                query
                    .iter()
                    .any(|&q| distance_to_ring(ring, q) <= half_width)
            }),
        }
    }
}

fn distance_to_ring(ring: &[Point], pt: Point) -> f64 {
    if let [only] = ring {
        return only.distance(pt);
    }
    ring.windows(2)
        .map(|seg| Line::new(seg[0], seg[1]).nearest(pt, 0.).distance_sq.sqrt())
        .fold(f64::INFINITY, f64::min)
}

/// Collision index returning a fixed list of symbols, in the given order.
#[derive(Debug, Default)]
pub(crate) struct FixedSymbols(pub(crate) Vec<IndexedSubfeature>);

impl CollisionIndex for FixedSymbols {
    fn query_rendered_symbols(
        &self,
        _query_geometry: &[Point],
        tile_id: &UnwrappedTileId,
        source_id: &str,
    ) -> Vec<IndexedSubfeature> {
        assert_eq!(tile_id.canonical, TILE, "queried for the wrong tile");
        assert_eq!(source_id, SOURCE, "queried for the wrong source");
        self.0.clone()
    }
}

/// Tile data that counts layer lookups, i.e. feature decodes.
#[derive(Debug, Default)]
pub(crate) struct CountingTileData {
    pub(crate) inner: MemoryTileData,
    pub(crate) lookups: AtomicUsize,
}

impl CountingTileData {
    pub(crate) fn new(inner: MemoryTileData) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl GeometryTileData for CountingTileData {
    fn layer(&self, name: &str) -> Option<Box<dyn GeometryTileLayer + '_>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.layer(name)
    }
}

/// Filter that rejects everything and counts its calls.
#[derive(Debug, Default)]
pub(crate) struct RejectAll(pub(crate) AtomicUsize);

impl FeatureFilter for RejectAll {
    fn evaluate(&self, _zoom: f64, _feature: &dyn GeometryTileFeature) -> bool {
        self.0.fetch_add(1, Ordering::SeqCst);
        false
    }
}

/// Ids of the features in one result list, in order.
pub(crate) fn ids(features: &[maptile_feature_index::Feature]) -> Vec<u64> {
    features
        .iter()
        .map(|f| match f.id {
            Some(FeatureId::UInt(id)) => id,
            ref other => panic!("unexpected id {other:?}"),
        })
        .collect()
}

/// Index over single-ring polygon features in source layer `src`, all drawn
/// by `bucket`. Feature `i` has id `i` and is inserted `i`-th.
pub(crate) fn single_ring_index(rings: &[Vec<Point>], bucket: &str) -> FeatureIndex<MemoryTileData> {
    let mut data = MemoryTileData::new();
    for (i, ring) in rings.iter().enumerate() {
        data.layer_mut("src").push(
            MemoryFeature::new(FeatureType::Polygon, vec![ring.clone()]).with_id(i as u64),
        );
    }
    let mut index = FeatureIndex::new(Some(data));
    for (i, ring) in rings.iter().enumerate() {
        index.insert(std::slice::from_ref(ring), i, "src", bucket);
    }
    index
}
