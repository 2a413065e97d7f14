// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile identifiers.

use core::fmt;

/// A tile in the canonical `z/x/y` pyramid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalTileId {
    /// Zoom level.
    pub z: u8,
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl CanonicalTileId {
    /// Creates a canonical tile id.
    #[must_use]
    pub const fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

impl fmt::Display for CanonicalTileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// A canonical tile repeated across antimeridian copies of the world.
///
/// `wrap` counts whole-world copies east (positive) or west (negative) of the
/// primary world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnwrappedTileId {
    /// World copy.
    pub wrap: i16,
    /// The tile inside that world copy.
    pub canonical: CanonicalTileId,
}

impl UnwrappedTileId {
    /// Creates an unwrapped tile id.
    #[must_use]
    pub const fn new(wrap: i16, canonical: CanonicalTileId) -> Self {
        Self { wrap, canonical }
    }
}

impl From<CanonicalTileId> for UnwrappedTileId {
    fn from(canonical: CanonicalTileId) -> Self {
        Self::new(0, canonical)
    }
}
