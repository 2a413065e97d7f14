// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-tile feature index.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use kurbo::Point;
use maptile_grid::{Aabb2D, GridIndex};

use crate::config::FeatureIndexConfig;
use crate::error::QueryError;
use crate::intern::NameInterner;
use crate::layer::{CollisionIndex, RenderLayer};
use crate::materialize::{BucketLayerIds, Materializer};
use crate::options::{QueryParams, RenderedQueryOptions};
use crate::subfeature::{IndexedSubfeature, SortIndex};
use crate::tile_data::{Feature, GeometryTileData};

/// Query results: style layer id to the features hit in that layer, in the
/// order they were accepted.
pub type QueryResult = HashMap<String, Vec<Feature>>;

/// Spatial index of the features rendered from one tile.
///
/// Built once while the tile's buckets are created ([`insert`](Self::insert),
/// [`set_bucket_layer_ids`](Self::set_bucket_layer_ids)), then queried any
/// number of times through `&self`. Queries share nothing mutable, so a built
/// index can be queried from several threads at once when `D` is `Sync`.
pub struct FeatureIndex<D> {
    config: FeatureIndexConfig,
    grid: GridIndex<IndexedSubfeature>,
    next_sort_index: u64,
    bucket_layer_ids: BucketLayerIds,
    names: NameInterner,
    tile_data: Option<D>,
}

impl<D: GeometryTileData> FeatureIndex<D> {
    /// Creates an index with the default 8192-unit extent and 16×16 grid.
    ///
    /// `tile_data` is `None` for tiles that failed to load or were purged;
    /// such an index answers every query with an empty result.
    #[must_use]
    pub fn new(tile_data: Option<D>) -> Self {
        Self::with_config(tile_data, FeatureIndexConfig::default())
    }

    /// Creates an index with explicit grid sizing.
    #[must_use]
    pub fn with_config(tile_data: Option<D>, config: FeatureIndexConfig) -> Self {
        Self {
            config,
            grid: GridIndex::new(config.extent, config.cells_per_side),
            next_sort_index: 0,
            bucket_layer_ids: BucketLayerIds::new(),
            names: NameInterner::default(),
            tile_data,
        }
    }

    /// Grid sizing.
    #[must_use]
    pub fn config(&self) -> FeatureIndexConfig {
        self.config
    }

    /// Tile-local coordinate extent.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.config.extent
    }

    /// Number of indexed rings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Returns `true` if nothing has been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Returns `true` if the index owns tile data to materialize features from.
    #[must_use]
    pub fn has_tile_data(&self) -> bool {
        self.tile_data.is_some()
    }

    /// The owned tile data.
    #[must_use]
    pub fn tile_data(&self) -> Option<&D> {
        self.tile_data.as_ref()
    }

    /// Indexes every ring of a feature.
    ///
    /// Each non-empty ring is keyed by its envelope and takes the next sort
    /// index, so a feature with three rings consumes three. Rings of the same
    /// feature are not merged. Empty rings are skipped.
    pub fn insert<R: AsRef<[Point]>>(
        &mut self,
        geometries: &[R],
        index: usize,
        source_layer_name: &str,
        bucket_name: &str,
    ) {
        let source_layer_name = self.names.intern(source_layer_name);
        let bucket_name = self.names.intern(bucket_name);
        for ring in geometries {
            let Some(envelope) = Aabb2D::from_points(ring.as_ref().iter().copied()) else {
                continue;
            };
            let sort_index = SortIndex::new(self.next_sort_index);
            self.next_sort_index += 1;
            self.grid.insert(
                IndexedSubfeature {
                    index,
                    source_layer_name: Arc::clone(&source_layer_name),
                    bucket_name: Arc::clone(&bucket_name),
                    sort_index,
                },
                envelope,
            );
        }
        log::trace!(
            "indexed feature {index} of `{source_layer_name}` for bucket `{bucket_name}` ({} rings)",
            geometries.len()
        );
    }

    /// Records which style layers a bucket renders, replacing any earlier list.
    ///
    /// Every bucket named by an inserted feature must be registered before the
    /// index is queried.
    pub fn set_bucket_layer_ids<I, S>(&mut self, bucket_name: &str, layer_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bucket_name = self.names.intern(bucket_name);
        let layer_ids: Vec<String> = layer_ids.into_iter().map(Into::into).collect();
        log::trace!("bucket `{bucket_name}` renders layers {layer_ids:?}");
        self.bucket_layer_ids.insert(bucket_name, layer_ids);
    }

    /// Style layers registered for `bucket_name`.
    #[must_use]
    pub fn bucket_layer_ids(&self, bucket_name: &str) -> Option<&[String]> {
        self.bucket_layer_ids.get(bucket_name).map(Vec::as_slice)
    }

    /// Box the grid is asked for: the query envelope grown by the extra
    /// radius converted to tile units.
    ///
    /// The radius is clamped to `[0, extent]`, and the growth stops at the
    /// tile bounds; an envelope already reaching past them is kept as is.
    /// Returns `None` for an empty query region.
    #[must_use]
    pub fn effective_query_box(
        &self,
        query_geometry: &[Point],
        params: &QueryParams<'_>,
    ) -> Option<Aabb2D> {
        let envelope = Aabb2D::from_points(query_geometry.iter().copied())?;
        let extent = self.extent();
        let radius = (params.additional_query_radius * params.pixels_to_tile_units(extent))
            .max(0.0)
            .min(extent);
        let bounds = self.grid.bounds();
        Some(Aabb2D::new(
            (envelope.min_x - radius).max(bounds.min_x.min(envelope.min_x)),
            (envelope.min_y - radius).max(bounds.min_y.min(envelope.min_y)),
            (envelope.max_x + radius).min(bounds.max_x.max(envelope.max_x)),
            (envelope.max_y + radius).min(bounds.max_y.max(envelope.max_y)),
        ))
    }

    /// Features under `query_geometry`, grouped by style layer.
    ///
    /// Grid candidates are visited top-down (last painted first), each
    /// indexed ring once. Symbols reported by `collision_index` follow in
    /// ascending sort order. `layers` is the set of currently rendered layers;
    /// buckets whose layers are all inactive contribute nothing.
    ///
    /// # Errors
    ///
    /// - [`QueryError::UnregisteredBucket`] if a candidate's bucket was never
    ///   registered.
    /// - [`QueryError::CorruptIndex`] if a candidate's source layer or feature
    ///   is missing from the tile data.
    pub fn query(
        &self,
        query_geometry: &[Point],
        params: &QueryParams<'_>,
        options: &RenderedQueryOptions<'_>,
        layers: &[&dyn RenderLayer],
        collision_index: &dyn CollisionIndex,
    ) -> Result<QueryResult, QueryError> {
        let mut result = QueryResult::new();
        let Some(tile_data) = self.tile_data.as_ref() else {
            return Ok(result);
        };
        let Some(query_box) = self.effective_query_box(query_geometry, params) else {
            return Ok(result);
        };

        let materializer = Materializer {
            tile_data,
            bucket_layer_ids: &self.bucket_layer_ids,
            query_geometry,
            options,
            layers,
            tile_id: params.tile_id.canonical,
            bearing: params.bearing,
            pixels_to_tile_units: params.pixels_to_tile_units(self.extent()),
        };

        let mut candidates = self.grid.query_rect(query_box);
        let grid_hits = candidates.len();
        candidates.sort_unstable_by(|a, b| b.sort_index.cmp(&a.sort_index));
        let mut seen = HashSet::with_capacity(candidates.len());
        for indexed in candidates {
            if !seen.insert(indexed.sort_index) {
                continue;
            }
            materializer.add_feature(&mut result, indexed)?;
        }

        let mut symbols =
            collision_index.query_rendered_symbols(query_geometry, &params.tile_id, params.source_id);
        symbols.sort_by_key(|symbol| symbol.sort_index);
        for symbol in &symbols {
            materializer.add_feature(&mut result, symbol)?;
        }

        log::debug!(
            "query {} of `{}`: {grid_hits} grid hits, {} candidates, {} symbols, {} layers hit",
            params.tile_id.canonical,
            params.source_id,
            seen.len(),
            symbols.len(),
            result.len()
        );
        Ok(result)
    }
}

impl<D> fmt::Debug for FeatureIndex<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureIndex")
            .field("config", &self.config)
            .field("rings", &self.grid.len())
            .field("buckets", &self.bucket_layer_ids.len())
            .field("names", &self.names.len())
            .field("has_tile_data", &self.tile_data.is_some())
            .finish_non_exhaustive()
    }
}
