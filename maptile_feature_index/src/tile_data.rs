// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoded tile data as seen by the index, and the feature records it emits.
//!
//! Tile decoding lives elsewhere. The index only needs to look a source layer
//! up by name and a feature up by its position within that layer.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Point;

use crate::tile::CanonicalTileId;

/// One ring or line string in tile-local units.
pub type GeometryCoordinates = Vec<Point>;

/// All rings or parts of a feature.
pub type GeometryCollection = Vec<GeometryCoordinates>;

/// Feature attributes by key.
pub type PropertyMap = BTreeMap<String, Value>;

/// Geometry type of a tile feature.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FeatureType {
    /// Unknown or unsupported geometry.
    #[default]
    Unknown,
    /// Points or multipoints.
    Point,
    /// Line strings.
    LineString,
    /// Polygons.
    Polygon,
}

/// Attribute value carried by a tile feature.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Unsigned integer.
    UInt(u64),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Double(f64),
    /// String.
    String(String),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Identifier of a tile feature.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureId {
    /// Unsigned integer id (the common case for vector tiles).
    UInt(u64),
    /// Signed integer id.
    Int(i64),
    /// Floating point id.
    Double(f64),
    /// String id.
    String(String),
}

impl From<u64> for FeatureId {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<&str> for FeatureId {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

/// Decoded tile data owned by a [`FeatureIndex`](crate::FeatureIndex).
pub trait GeometryTileData {
    /// Returns the layer with the given name.
    fn layer(&self, name: &str) -> Option<Box<dyn GeometryTileLayer + '_>>;
}

/// A named source layer inside tile data.
pub trait GeometryTileLayer {
    /// Layer name.
    fn name(&self) -> &str;

    /// Number of features in the layer.
    fn feature_count(&self) -> usize;

    /// Decodes the feature at `index`.
    ///
    /// Decoding may be expensive; the index calls this at most once per
    /// candidate per query.
    fn feature(&self, index: usize) -> Option<Box<dyn GeometryTileFeature>>;
}

impl<T: GeometryTileLayer + ?Sized> GeometryTileLayer for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn feature_count(&self) -> usize {
        (**self).feature_count()
    }

    fn feature(&self, index: usize) -> Option<Box<dyn GeometryTileFeature>> {
        (**self).feature(index)
    }
}

/// A decoded feature: geometry, attributes and identifier.
pub trait GeometryTileFeature {
    /// Geometry type.
    fn feature_type(&self) -> FeatureType;

    /// Feature identifier, if the source carries one.
    fn id(&self) -> Option<FeatureId>;

    /// Value of a single attribute.
    fn value(&self, key: &str) -> Option<Value>;

    /// All attributes.
    fn properties(&self) -> PropertyMap;

    /// Geometry in tile-local units.
    fn geometries(&self) -> GeometryCollection;
}

/// A feature returned from a rendered-feature query.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// Feature identifier.
    pub id: Option<FeatureId>,
    /// Geometry type.
    pub feature_type: FeatureType,
    /// Geometry in tile-local units; reproject with [`Feature::tile`].
    pub geometry: GeometryCollection,
    /// Attributes.
    pub properties: PropertyMap,
    /// Source layer the feature was decoded from.
    pub source_layer: Arc<str>,
    /// Tile whose local coordinate space `geometry` is expressed in.
    pub tile: CanonicalTileId,
}

impl Feature {
    /// Converts a decoded tile feature into a query result record.
    #[must_use]
    pub fn from_tile_feature(
        feature: &dyn GeometryTileFeature,
        source_layer: Arc<str>,
        tile: CanonicalTileId,
    ) -> Self {
        Self {
            id: feature.id(),
            feature_type: feature.feature_type(),
            geometry: feature.geometries(),
            properties: feature.properties(),
            source_layer,
            tile,
        }
    }
}
