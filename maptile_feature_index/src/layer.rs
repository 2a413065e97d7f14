// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits supplied by the renderer and the style.

use alloc::vec::Vec;

use kurbo::Point;

use crate::subfeature::IndexedSubfeature;
use crate::tile::UnwrappedTileId;
use crate::tile_data::GeometryTileFeature;

/// Kind of a style layer as far as hit testing cares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Filled polygons.
    Fill,
    /// Extruded polygons.
    FillExtrusion,
    /// Stroked lines.
    Line,
    /// Circles drawn at points.
    Circle,
    /// Heatmap contributions.
    Heatmap,
    /// Text and icons placed by the collision index.
    Symbol,
    /// Anything else with its own intersection test.
    Custom,
}

impl LayerKind {
    /// Returns `true` for symbol layers, whose hits come from the collision index.
    #[must_use]
    pub const fn is_symbol(self) -> bool {
        matches!(self, Self::Symbol)
    }
}

/// An active style layer, as rendered for the current frame.
pub trait RenderLayer {
    /// Style layer identifier.
    fn id(&self) -> &str;

    /// Layer kind.
    fn kind(&self) -> LayerKind;

    /// Precise test of `feature` against the query region.
    ///
    /// Implementations account for their own paint properties (stroke width,
    /// circle radius, translate); see [`LayerTranslate`](crate::LayerTranslate).
    /// Not called for symbol layers.
    fn query_intersects_feature(
        &self,
        query_geometry: &[Point],
        feature: &dyn GeometryTileFeature,
        zoom: u8,
        bearing: f64,
        pixels_to_tile_units: f64,
    ) -> bool;
}

/// Style filter evaluated per candidate feature.
pub trait FeatureFilter {
    /// Returns `true` if `feature` passes at `zoom`.
    fn evaluate(&self, zoom: f64, feature: &dyn GeometryTileFeature) -> bool;
}

impl<F> FeatureFilter for F
where
    F: Fn(f64, &dyn GeometryTileFeature) -> bool,
{
    fn evaluate(&self, zoom: f64, feature: &dyn GeometryTileFeature) -> bool {
        self(zoom, feature)
    }
}

/// Symbol placement index, queried for symbols under a region.
pub trait CollisionIndex {
    /// Symbols of `source_id` in `tile_id` whose placed boxes intersect the
    /// query region. Order is unspecified.
    fn query_rendered_symbols(
        &self,
        query_geometry: &[Point],
        tile_id: &UnwrappedTileId,
        source_id: &str,
    ) -> Vec<IndexedSubfeature>;
}

/// No placed symbols.
impl CollisionIndex for () {
    fn query_rendered_symbols(
        &self,
        _query_geometry: &[Point],
        _tile_id: &UnwrappedTileId,
        _source_id: &str,
    ) -> Vec<IndexedSubfeature> {
        Vec::new()
    }
}
