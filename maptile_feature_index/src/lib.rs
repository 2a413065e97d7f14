// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Maptile Feature Index: "what is under this point" for rendered map tiles.
//!
//! Each rendered tile owns a [`FeatureIndex`]. While buckets are built, every
//! feature ring is inserted into a coarse grid ([`maptile_grid`]) together with
//! the bucket that drew it, and each bucket records the style layers it serves.
//! A query then runs in two phases:
//!
//! 1. **Broad phase.** The query region's envelope, grown by a pixel tolerance,
//!    is looked up in the grid. Hits are ordered top-down by paint order and
//!    each indexed ring is processed once.
//! 2. **Narrow phase.** For each candidate, every active layer of its bucket
//!    runs its own exact intersection test ([`RenderLayer`]) and the optional
//!    style filter ([`FeatureFilter`]). The source feature is decoded at most
//!    once per candidate, however many layers share the bucket.
//!
//! Symbols (text and icons) are positioned by a separate placement pass, so
//! their hits come from a [`CollisionIndex`] instead of the grid and are merged
//! into the same result in placement order.
//!
//! Layers drawn with a translate paint property can use
//! [`translate_query_geometry`] (or [`LayerTranslate`]) inside their
//! intersection test to compare against where the geometry was drawn.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use maptile_feature_index::{
//!     CanonicalTileId, FeatureId, FeatureIndex, FeatureType, GeometryTileFeature, LayerKind,
//!     MemoryFeature, MemoryTileData, QueryParams, RenderLayer, RenderedQueryOptions,
//! };
//!
//! struct Water;
//!
//! impl RenderLayer for Water {
//!     fn id(&self) -> &str {
//!         "water-fill"
//!     }
//!     fn kind(&self) -> LayerKind {
//!         LayerKind::Fill
//!     }
//!     fn query_intersects_feature(
//!         &self,
//!         _query: &[Point],
//!         _feature: &dyn GeometryTileFeature,
//!         _zoom: u8,
//!         _bearing: f64,
//!         _pixels_to_tile_units: f64,
//!     ) -> bool {
//!         true
//!     }
//! }
//!
//! let ring = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(100.0, 0.0),
//!     Point::new(100.0, 100.0),
//!     Point::new(0.0, 0.0),
//! ];
//!
//! let mut data = MemoryTileData::new();
//! let feature = MemoryFeature::new(FeatureType::Polygon, vec![ring.clone()]).with_id(0_u64);
//! let index = data.layer_mut("water").push(feature);
//!
//! let mut features = FeatureIndex::new(Some(data));
//! features.insert(&[ring], index, "water", "b1");
//! features.set_bucket_layer_ids("b1", ["water-fill"]);
//!
//! let query = [
//!     Point::new(50.0, 50.0),
//!     Point::new(60.0, 50.0),
//!     Point::new(60.0, 60.0),
//!     Point::new(50.0, 60.0),
//! ];
//! let params = QueryParams::new(CanonicalTileId::new(14, 8192, 5461), "composite");
//! let result = features
//!     .query(&query, &params, &RenderedQueryOptions::default(), &[&Water], &())
//!     .unwrap();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result["water-fill"][0].id, Some(FeatureId::UInt(0)));
//! ```
//!
//! ## Errors
//!
//! Misses are not errors. [`FeatureIndex::query`] fails only when the index
//! contradicts itself: a candidate's bucket was never registered, or its
//! source feature cannot be found in the tile data ([`QueryError`]).
//!
//! ## Logging
//!
//! Build steps log at `trace` and each query logs a one-line summary at
//! `debug` through the [`log`] facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod feature_index;
mod intern;
mod layer;
mod materialize;
mod memory;
mod options;
mod subfeature;
mod tile;
mod tile_data;
mod translate;

pub use maptile_grid::Aabb2D;

pub use config::{EXTENT, FeatureIndexConfig, GRID_CELLS_PER_SIDE};
pub use error::{CorruptIndex, QueryError};
pub use feature_index::{FeatureIndex, QueryResult};
pub use layer::{CollisionIndex, FeatureFilter, LayerKind, RenderLayer};
pub use memory::{MemoryFeature, MemoryLayer, MemoryTileData};
pub use options::{QueryParams, RenderedQueryOptions};
pub use subfeature::{IndexedSubfeature, SortIndex};
pub use tile::{CanonicalTileId, UnwrappedTileId};
pub use tile_data::{
    Feature, FeatureId, FeatureType, GeometryCollection, GeometryCoordinates, GeometryTileData,
    GeometryTileFeature, GeometryTileLayer, PropertyMap, Value,
};
pub use translate::{LayerTranslate, TranslateAnchor, translate_query_geometry};
