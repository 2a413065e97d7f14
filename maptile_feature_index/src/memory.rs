// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile data kept fully decoded in memory.
//!
//! Useful for sources that arrive already parsed (GeoJSON, generated
//! overlays) and for tests.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::tile_data::{
    FeatureId, FeatureType, GeometryCollection, GeometryTileData, GeometryTileFeature,
    GeometryTileLayer, PropertyMap, Value,
};

/// A decoded feature stored by value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryFeature {
    /// Geometry type.
    pub feature_type: FeatureType,
    /// Identifier.
    pub id: Option<FeatureId>,
    /// Geometry in tile-local units.
    pub geometry: GeometryCollection,
    /// Attributes.
    pub properties: PropertyMap,
}

impl MemoryFeature {
    /// Creates a feature without id or attributes.
    #[must_use]
    pub fn new(feature_type: FeatureType, geometry: GeometryCollection) -> Self {
        Self {
            feature_type,
            id: None,
            geometry,
            properties: PropertyMap::new(),
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<FeatureId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl GeometryTileFeature for MemoryFeature {
    fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    fn id(&self) -> Option<FeatureId> {
        self.id.clone()
    }

    fn value(&self, key: &str) -> Option<Value> {
        self.properties.get(key).cloned()
    }

    fn properties(&self) -> PropertyMap {
        self.properties.clone()
    }

    fn geometries(&self) -> GeometryCollection {
        self.geometry.clone()
    }
}

/// A named list of [`MemoryFeature`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryLayer {
    name: String,
    features: Vec<MemoryFeature>,
}

impl MemoryLayer {
    /// Creates an empty layer.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }

    /// Appends a feature and returns its index.
    pub fn push(&mut self, feature: MemoryFeature) -> usize {
        self.features.push(feature);
        self.features.len() - 1
    }

    /// Features in index order.
    #[must_use]
    pub fn features(&self) -> &[MemoryFeature] {
        &self.features
    }
}

impl GeometryTileLayer for MemoryLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_count(&self) -> usize {
        self.features.len()
    }

    fn feature(&self, index: usize) -> Option<Box<dyn GeometryTileFeature>> {
        let feature = self.features.get(index)?.clone();
        Some(Box::new(feature))
    }
}

/// Tile data made of [`MemoryLayer`]s keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryTileData {
    layers: HashMap<String, MemoryLayer>,
}

impl MemoryTileData {
    /// Creates tile data without layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer, replacing any layer with the same name.
    pub fn insert_layer(&mut self, layer: MemoryLayer) {
        self.layers.insert(layer.name.clone(), layer);
    }

    /// Returns the layer called `name`, creating it when absent.
    pub fn layer_mut(&mut self, name: &str) -> &mut MemoryLayer {
        self.layers
            .entry(name.into())
            .or_insert_with(|| MemoryLayer::new(name))
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl GeometryTileData for MemoryTileData {
    fn layer(&self, name: &str) -> Option<Box<dyn GeometryTileLayer + '_>> {
        let layer = self.layers.get(name)?;
        Some(Box::new(layer))
    }
}
