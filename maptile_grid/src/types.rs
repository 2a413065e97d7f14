// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes used as grid keys.

use kurbo::Point;

/// Closed axis-aligned bounding box in grid coordinates.
///
/// Unlike `kurbo::Rect`, overlap tests are inclusive on every edge, so a
/// degenerate box (a single point, or a horizontal/vertical segment) still
/// intersects the boxes it touches. Point queries rely on this.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Aabb2D {
    /// Minimum x.
    pub min_x: f64,
    /// Minimum y.
    pub min_y: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Maximum y.
    pub max_y: f64,
}

impl Aabb2D {
    /// Creates a box from its corners. Callers must pass `min <= max` per axis.
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a box from an origin and a size.
    #[must_use]
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Creates a zero-area box at `pt`.
    #[must_use]
    pub const fn from_point(pt: Point) -> Self {
        Self::new(pt.x, pt.y, pt.x, pt.y)
    }

    /// Returns the envelope of `points`, or `None` when the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut it = points.into_iter();
        let first = Self::from_point(it.next()?);
        Some(it.fold(first, |acc, p| acc.union(Self::from_point(p))))
    }

    /// Returns the smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Returns `true` if the point lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Returns `true` if the boxes share at least one point.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}
