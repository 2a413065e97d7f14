// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning one candidate into feature records for the layers of its bucket.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Point;

use crate::error::{CorruptIndex, QueryError};
use crate::feature_index::QueryResult;
use crate::layer::RenderLayer;
use crate::options::RenderedQueryOptions;
use crate::subfeature::IndexedSubfeature;
use crate::tile::CanonicalTileId;
use crate::tile_data::{Feature, GeometryTileData, GeometryTileFeature};

pub(crate) type BucketLayerIds = HashMap<Arc<str>, Vec<String>>;

/// State shared by every candidate of one query.
pub(crate) struct Materializer<'a, D: ?Sized> {
    pub(crate) tile_data: &'a D,
    pub(crate) bucket_layer_ids: &'a BucketLayerIds,
    pub(crate) query_geometry: &'a [Point],
    pub(crate) options: &'a RenderedQueryOptions<'a>,
    pub(crate) layers: &'a [&'a dyn RenderLayer],
    pub(crate) tile_id: CanonicalTileId,
    pub(crate) bearing: f64,
    pub(crate) pixels_to_tile_units: f64,
}

impl<D: GeometryTileData + ?Sized> Materializer<'_, D> {
    /// Appends `indexed` to the result list of every active layer of its
    /// bucket that accepts it.
    ///
    /// Per layer: the exact intersection test runs first (skipped for symbol
    /// layers, which were hit-tested by the collision index), then the filter.
    pub(crate) fn add_feature(
        &self,
        result: &mut QueryResult,
        indexed: &IndexedSubfeature,
    ) -> Result<(), QueryError> {
        let layer_ids = self
            .bucket_layer_ids
            .get(&*indexed.bucket_name)
            .ok_or_else(|| QueryError::UnregisteredBucket {
                bucket: indexed.bucket_name.to_string(),
            })?;

        let mut feature = LazyFeature::new(self.tile_data, indexed);
        for layer_id in layer_ids {
            if !self.options.allows_layer(layer_id) {
                continue;
            }
            let Some(layer) = self.render_layer(layer_id) else {
                continue;
            };

            let decoded = feature.get()?;
            if !layer.kind().is_symbol()
                && !layer.query_intersects_feature(
                    self.query_geometry,
                    decoded,
                    self.tile_id.z,
                    self.bearing,
                    self.pixels_to_tile_units,
                )
            {
                continue;
            }
            if let Some(filter) = self.options.filter
                && !filter.evaluate(f64::from(self.tile_id.z), decoded)
            {
                continue;
            }

            let record = Feature::from_tile_feature(
                decoded,
                Arc::clone(&indexed.source_layer_name),
                self.tile_id,
            );
            match result.get_mut(layer_id.as_str()) {
                Some(features) => features.push(record),
                None => {
                    result.insert(layer_id.clone(), vec![record]);
                }
            }
        }
        Ok(())
    }

    fn render_layer(&self, id: &str) -> Option<&dyn RenderLayer> {
        self.layers.iter().copied().find(|layer| layer.id() == id)
    }
}

/// Source feature decoded on first use and shared by the layers of a bucket.
struct LazyFeature<'a, D: ?Sized> {
    tile_data: &'a D,
    indexed: &'a IndexedSubfeature,
    decoded: Option<Box<dyn GeometryTileFeature>>,
}

impl<'a, D: GeometryTileData + ?Sized> LazyFeature<'a, D> {
    fn new(tile_data: &'a D, indexed: &'a IndexedSubfeature) -> Self {
        Self {
            tile_data,
            indexed,
            decoded: None,
        }
    }

    fn get(&mut self) -> Result<&dyn GeometryTileFeature, CorruptIndex> {
        let decoded = match self.decoded.take() {
            Some(decoded) => decoded,
            None => self.decode()?,
        };
        Ok(&**self.decoded.insert(decoded))
    }

    fn decode(&self) -> Result<Box<dyn GeometryTileFeature>, CorruptIndex> {
        let name = &*self.indexed.source_layer_name;
        let layer = self
            .tile_data
            .layer(name)
            .ok_or_else(|| CorruptIndex::MissingSourceLayer {
                source_layer: name.into(),
            })?;
        layer
            .feature(self.indexed.index)
            .ok_or_else(|| CorruptIndex::MissingFeature {
                source_layer: name.into(),
                index: self.indexed.index,
            })
    }
}
