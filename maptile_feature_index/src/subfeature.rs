// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles stored in the grid in place of feature geometry.

use alloc::sync::Arc;

/// Position of an indexed ring in paint order.
///
/// Sort indices are handed out by a [`FeatureIndex`](crate::FeatureIndex) in
/// strictly increasing order, one per inserted ring, so comparing them
/// compares insertion order. Collision indices reuse them to report symbol
/// placement order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct SortIndex(u64);

impl SortIndex {
    /// Wraps a raw counter value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Lightweight reference to one indexed ring of a source feature.
///
/// Names are shared [`Arc<str>`] values, so clones are reference-count bumps.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexedSubfeature {
    /// Position of the feature within its source layer.
    pub index: usize,
    /// Name of the source layer in the tile data.
    pub source_layer_name: Arc<str>,
    /// Name of the bucket the feature was rendered into.
    pub bucket_name: Arc<str>,
    /// Paint order of this ring.
    pub sort_index: SortIndex,
}

impl IndexedSubfeature {
    /// Creates a subfeature handle.
    #[must_use]
    pub fn new(
        index: usize,
        source_layer_name: impl Into<Arc<str>>,
        bucket_name: impl Into<Arc<str>>,
        sort_index: SortIndex,
    ) -> Self {
        Self {
            index,
            source_layer_name: source_layer_name.into(),
            bucket_name: bucket_name.into(),
            sort_index,
        }
    }
}
