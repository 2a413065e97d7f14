// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for the spatial structures behind [`GridIndex`](crate::GridIndex).

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::Aabb2D;

/// Spatial backend abstraction used by [`GridIndex`](crate::GridIndex).
///
/// Backends only know about slots (dense indices into the owning index's
/// entry table) and their boxes. Payloads live in the index.
///
/// Visits are allowed to report a slot more than once for a single query.
/// Bucketed backends do this when a box spans several buckets; callers that
/// need each slot once must deduplicate.
pub trait Backend: Debug {
    /// Insert a new slot into the spatial structure.
    ///
    /// Slots are dense: after construction or [`clear`](Self::clear) the
    /// `n`-th insert uses slot `n`.
    fn insert(&mut self, slot: usize, aabb: Aabb2D);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Visit slots whose box intersects `rect` (inclusive on every edge).
    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D, f: F);

    /// Visit slots whose box contains the point.
    ///
    /// The default implementation visits with a zero-area rectangle.
    fn visit_point<F: FnMut(usize)>(&self, x: f64, y: f64, f: F) {
        self.visit_rect(Aabb2D::new(x, y, x, y), f);
    }

    /// Query slots whose box intersects `rect`. Default: collects `visit_rect`.
    fn query_rect(&self, rect: Aabb2D) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_rect(rect, |i| out.push(i));
        out
    }
}
