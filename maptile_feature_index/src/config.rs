// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index sizing.

/// Tile-local coordinate extent of vector tile geometry.
pub const EXTENT: f64 = 8192.0;

/// Grid cells along each side of the tile; `EXTENT / 16` gives 512-unit cells.
pub const GRID_CELLS_PER_SIDE: usize = 16;

/// Sizing of a [`FeatureIndex`](crate::FeatureIndex) grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureIndexConfig {
    /// Side length of the tile-local coordinate square.
    pub extent: f64,
    /// Number of grid cells along each axis.
    pub cells_per_side: usize,
}

impl FeatureIndexConfig {
    /// Edge length of one grid cell in tile units.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.extent / self.cells_per_side.max(1) as f64
    }
}

impl Default for FeatureIndexConfig {
    fn default() -> Self {
        Self {
            extent: EXTENT,
            cells_per_side: GRID_CELLS_PER_SIDE,
        }
    }
}
