// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loose uniform grid backend over a fixed square extent.

use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::backend::Backend;
use crate::types::Aabb2D;

type Cell = SmallVec<[usize; 4]>;

/// Loose uniform grid: an `N×N` array of cells over `[0, extent]²`.
///
/// A slot is recorded in every cell its box overlaps, so a query touching
/// several of those cells visits the slot once per cell. Boxes reaching past
/// the extent (tile buffers) are clamped into the border cells; their stored
/// box is still compared exactly, so results stay a superset of true overlaps.
#[derive(Clone)]
pub struct UniformGrid {
    extent: f64,
    cells_per_side: usize,
    cell_size: f64,
    cells: Vec<Cell>,
    boxes: Vec<Aabb2D>,
}

impl UniformGrid {
    /// Creates an empty grid covering `[0, extent]²` with `cells_per_side²` cells.
    ///
    /// `cells_per_side` is raised to at least one.
    #[must_use]
    pub fn new(extent: f64, cells_per_side: usize) -> Self {
        let cells_per_side = cells_per_side.max(1);
        let mut cells = Vec::new();
        cells.resize_with(cells_per_side * cells_per_side, Cell::new);
        Self {
            extent,
            cells_per_side,
            cell_size: extent / cells_per_side as f64,
            cells,
            boxes: Vec::new(),
        }
    }

    /// Side length of the covered square.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Number of cells along each axis.
    #[must_use]
    pub fn cells_per_side(&self) -> usize {
        self.cells_per_side
    }

    /// Edge length of one cell.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[cfg(test)]
    fn cell_len(&self, col: usize, row: usize) -> usize {
        if col >= self.cells_per_side || row >= self.cells_per_side {
            return 0;
        }
        self.cells[row * self.cells_per_side + col].len()
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "value is positive and clamped to the cell count right after"
    )]
    fn cell_coord(&self, v: f64) -> usize {
        // Negative and NaN coordinates land in the first cell.
        if v.is_nan() || v <= 0.0 {
            return 0;
        }
        ((v / self.cell_size) as usize).min(self.cells_per_side - 1)
    }

    /// Inclusive `(col0, row0, col1, row1)` cell range covered by `aabb`.
    fn cell_range(&self, aabb: &Aabb2D) -> (usize, usize, usize, usize) {
        (
            self.cell_coord(aabb.min_x),
            self.cell_coord(aabb.min_y),
            self.cell_coord(aabb.max_x),
            self.cell_coord(aabb.max_y),
        )
    }
}

impl Debug for UniformGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.cells.iter().filter(|c| !c.is_empty()).count();
        f.debug_struct("UniformGrid")
            .field("extent", &self.extent)
            .field("cells_per_side", &self.cells_per_side)
            .field("occupied_cells", &occupied)
            .field("slots", &self.boxes.len())
            .finish_non_exhaustive()
    }
}

impl Backend for UniformGrid {
    fn insert(&mut self, slot: usize, aabb: Aabb2D) {
        debug_assert_eq!(slot, self.boxes.len(), "slots are inserted densely");
        self.boxes.push(aabb);
        let (c0, r0, c1, r1) = self.cell_range(&aabb);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.cells[row * self.cells_per_side + col].push(slot);
            }
        }
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.boxes.clear();
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D, mut f: F) {
        let (c0, r0, c1, r1) = self.cell_range(&rect);
        for row in r0..=r1 {
            for col in c0..=c1 {
                for &slot in &self.cells[row * self.cells_per_side + col] {
                    if self.boxes[slot].overlaps(&rect) {
                        f(slot);
                    }
                }
            }
        }
    }
}
