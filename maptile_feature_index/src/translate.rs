// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shifting query geometry to follow a layer's render-time translation.
//!
//! Layers with a translate paint property draw their geometry offset from
//! where it sits in the tile. Hit testing moves the query the opposite way
//! instead of moving every feature.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use kurbo::{Affine, Point, Vec2};

/// Frame a translate offset is expressed in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TranslateAnchor {
    /// Offset follows the map: it rotates with the bearing.
    #[default]
    Map,
    /// Offset is fixed on screen regardless of bearing.
    Viewport,
}

/// Offsets `query_geometry` against a render-time translation.
///
/// `translate` is in pixels and `bearing` in radians. Returns `None` when the
/// offset is zero on both axes, meaning the query geometry can be used
/// as is. Viewport-anchored offsets are rotated by `-bearing` first, since
/// they were specified in screen space.
#[must_use]
pub fn translate_query_geometry(
    query_geometry: &[Point],
    translate: Vec2,
    anchor: TranslateAnchor,
    bearing: f64,
    pixels_to_tile_units: f64,
) -> Option<Vec<Point>> {
    if translate.x == 0.0 && translate.y == 0.0 {
        return None;
    }

    let mut offset = translate * pixels_to_tile_units;
    if anchor == TranslateAnchor::Viewport {
        offset = (Affine::rotate(-bearing) * offset.to_point()).to_vec2();
    }

    Some(query_geometry.iter().map(|&p| p - offset).collect())
}

/// A layer's translate paint property.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayerTranslate {
    /// Offset in pixels.
    pub offset: Vec2,
    /// Frame of `offset`.
    pub anchor: TranslateAnchor,
}

impl LayerTranslate {
    /// Creates a translate property.
    #[must_use]
    pub const fn new(offset: Vec2, anchor: TranslateAnchor) -> Self {
        Self { offset, anchor }
    }

    /// Query geometry as seen by this layer: borrowed when no shift is needed.
    #[must_use]
    pub fn apply<'a>(
        &self,
        query_geometry: &'a [Point],
        bearing: f64,
        pixels_to_tile_units: f64,
    ) -> Cow<'a, [Point]> {
        match translate_query_geometry(
            query_geometry,
            self.offset,
            self.anchor,
            bearing,
            pixels_to_tile_units,
        ) {
            Some(translated) => Cow::Owned(translated),
            None => Cow::Borrowed(query_geometry),
        }
    }
}
