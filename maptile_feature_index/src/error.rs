// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by [`FeatureIndex::query`](crate::FeatureIndex::query).
//!
//! Only contract violations are errors. Inactive layers, failed intersection
//! tests and filter rejections are ordinary misses and never surface here.

use alloc::string::String;

/// Failure of a rendered-feature query.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// An indexed subfeature names a bucket that was never registered with
    /// [`FeatureIndex::set_bucket_layer_ids`](crate::FeatureIndex::set_bucket_layer_ids).
    #[error("bucket `{bucket}` has no registered layers")]
    UnregisteredBucket {
        /// The bucket name carried by the subfeature.
        bucket: String,
    },
    /// The tile data does not match what was indexed.
    #[error(transparent)]
    CorruptIndex(#[from] CorruptIndex),
}

impl QueryError {
    /// Returns `true` if the index and its tile data disagree.
    #[must_use]
    pub fn is_corrupt_index(&self) -> bool {
        matches!(self, Self::CorruptIndex(_))
    }
}

/// Mismatch between indexed subfeatures and the owned tile data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CorruptIndex {
    /// The source layer recorded at insertion time is absent.
    #[error("corrupt index: source layer `{source_layer}` is missing from the tile data")]
    MissingSourceLayer {
        /// Name of the missing layer.
        source_layer: String,
    },
    /// The source layer exists but has no feature at the recorded index.
    #[error("corrupt index: source layer `{source_layer}` has no feature {index}")]
    MissingFeature {
        /// Name of the source layer.
        source_layer: String,
        /// Feature index recorded at insertion time.
        index: usize,
    },
}
