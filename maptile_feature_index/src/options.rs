// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-query inputs.

use core::fmt;

use crate::layer::FeatureFilter;
use crate::tile::UnwrappedTileId;

/// What the caller wants back from a query.
#[derive(Clone, Copy, Default)]
pub struct RenderedQueryOptions<'a> {
    /// Style filter each candidate must pass.
    pub filter: Option<&'a dyn FeatureFilter>,
    /// When set, only these style layers receive results.
    pub layers: Option<&'a [&'a str]>,
}

impl<'a> RenderedQueryOptions<'a> {
    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: &'a dyn FeatureFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Restricts results to the given style layers.
    #[must_use]
    pub fn with_layers(mut self, layers: &'a [&'a str]) -> Self {
        self.layers = Some(layers);
        self
    }

    pub(crate) fn allows_layer(&self, layer_id: &str) -> bool {
        self.layers
            .is_none_or(|ids| ids.iter().any(|id| *id == layer_id))
    }
}

impl fmt::Debug for RenderedQueryOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedQueryOptions")
            .field("filter", &self.filter.is_some())
            .field("layers", &self.layers)
            .finish()
    }
}

/// Where and how the tile was drawn when the query was made.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryParams<'a> {
    /// Map bearing in radians.
    pub bearing: f64,
    /// Rendered tile size in pixels at scale 1.
    pub tile_size: f64,
    /// Current scale of the tile relative to `tile_size`.
    pub scale: f64,
    /// Tile being queried.
    pub tile_id: UnwrappedTileId,
    /// Source the tile belongs to.
    pub source_id: &'a str,
    /// Extra tolerance around the query region, in pixels.
    pub additional_query_radius: f64,
}

impl<'a> QueryParams<'a> {
    /// Parameters for a north-up 512px tile at scale 1 with no extra radius.
    #[must_use]
    pub fn new(tile_id: impl Into<UnwrappedTileId>, source_id: &'a str) -> Self {
        Self {
            bearing: 0.0,
            tile_size: 512.0,
            scale: 1.0,
            tile_id: tile_id.into(),
            source_id,
            additional_query_radius: 0.0,
        }
    }

    /// Sets the bearing in radians.
    #[must_use]
    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = bearing;
        self
    }

    /// Sets rendered tile size and scale.
    #[must_use]
    pub fn with_tile_size(mut self, tile_size: f64, scale: f64) -> Self {
        self.tile_size = tile_size;
        self.scale = scale;
        self
    }

    /// Sets the extra tolerance radius in pixels.
    #[must_use]
    pub fn with_additional_radius(mut self, pixels: f64) -> Self {
        self.additional_query_radius = pixels;
        self
    }

    /// Tile units covered by one screen pixel.
    #[must_use]
    pub fn pixels_to_tile_units(&self, extent: f64) -> f64 {
        extent / self.tile_size / self.scale
    }
}
