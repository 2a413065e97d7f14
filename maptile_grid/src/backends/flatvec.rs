// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
///
/// Every slot is visited at most once per query, which makes this backend a
/// convenient reference when checking bucketed backends.
#[derive(Clone, Default)]
pub struct FlatVec {
    entries: Vec<Aabb2D>,
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("slots", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Backend for FlatVec {
    fn insert(&mut self, slot: usize, aabb: Aabb2D) {
        debug_assert_eq!(slot, self.entries.len(), "slots are inserted densely");
        self.entries.push(aabb);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D, mut f: F) {
        for (i, a) in self.entries.iter().enumerate() {
            if a.overlaps(&rect) {
                f(i);
            }
        }
    }

    fn visit_point<F: FnMut(usize)>(&self, x: f64, y: f64, mut f: F) {
        for (i, a) in self.entries.iter().enumerate() {
            if a.contains_point(x, y) {
                f(i);
            }
        }
    }
}
