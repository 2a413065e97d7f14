// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload-carrying index over a [`Backend`].

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Point;

use crate::backend::Backend;
use crate::backends::uniform::UniformGrid;
use crate::types::Aabb2D;

/// Bounding-box index storing a payload per inserted box.
///
/// Payloads are stored by value in insertion order; the backend only sees
/// slot numbers. The index is append-only: build it once, then query it.
///
/// Query results are a superset of the payloads whose box intersects the
/// query. With bucketed backends such as [`UniformGrid`] the same payload may
/// be reported once per bucket the query touches.
pub struct GridIndex<P, B: Backend = UniformGrid> {
    extent: f64,
    entries: Vec<(P, Aabb2D)>,
    backend: B,
}

impl<P> GridIndex<P, UniformGrid> {
    /// Creates an index backed by a [`UniformGrid`] of `cells_per_side²`
    /// cells over `[0, extent]²`.
    #[must_use]
    pub fn new(extent: f64, cells_per_side: usize) -> Self {
        Self::with_backend(extent, UniformGrid::new(extent, cells_per_side))
    }
}

impl<P, B: Backend> GridIndex<P, B> {
    /// Creates an index over `[0, extent]²` using the given backend.
    #[must_use]
    pub fn with_backend(extent: f64, backend: B) -> Self {
        Self {
            extent,
            entries: Vec::new(),
            backend,
        }
    }

    /// Side length of the covered square.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// The covered square `[0, extent]²`.
    #[must_use]
    pub fn bounds(&self) -> Aabb2D {
        Aabb2D::new(0.0, 0.0, self.extent, self.extent)
    }

    /// Number of inserted boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `payload` keyed by `aabb` and returns its slot.
    pub fn insert(&mut self, payload: P, aabb: Aabb2D) -> usize {
        let slot = self.entries.len();
        self.entries.push((payload, aabb));
        self.backend.insert(slot, aabb);
        slot
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.backend.clear();
    }

    /// Returns the payload and box stored at `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<(&P, Aabb2D)> {
        self.entries.get(slot).map(|(p, a)| (p, *a))
    }

    /// Iterates over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, Aabb2D)> + '_ {
        self.entries.iter().map(|(p, a)| (p, *a))
    }

    /// Calls `f` for every hit whose box intersects `rect`, possibly more than
    /// once per entry.
    pub fn visit_rect<'a, F: FnMut(&'a P, Aabb2D)>(&'a self, rect: Aabb2D, mut f: F) {
        let entries = &self.entries;
        self.backend.visit_rect(rect, |slot| {
            let (payload, aabb) = &entries[slot];
            f(payload, *aabb);
        });
    }

    /// Payloads whose box intersects `rect`. May contain repeats.
    #[must_use]
    pub fn query_rect(&self, rect: Aabb2D) -> Vec<&P> {
        let mut out = Vec::new();
        self.visit_rect(rect, |p, _| out.push(p));
        out
    }

    /// Payloads whose box contains `pt`. May contain repeats.
    #[must_use]
    pub fn query_point(&self, pt: Point) -> Vec<&P> {
        let mut out = Vec::new();
        self.backend
            .visit_point(pt.x, pt.y, |slot| out.push(&self.entries[slot].0));
        out
    }
}

impl<P, B: Backend> Debug for GridIndex<P, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridIndex")
            .field("extent", &self.extent)
            .field("len", &self.entries.len())
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
