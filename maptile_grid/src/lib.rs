// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Maptile Grid: a loose bounding-box grid over a fixed square extent.
//!
//! This is the broad phase of tile hit testing. Boxes are inserted once while a
//! tile is built and queried many times afterwards. Results are conservative:
//! every entry whose box intersects the query is reported, and a narrow-phase
//! test (owned by the caller) decides the final answer.
//!
//! - [`GridIndex`]: payload table plus a spatial [`Backend`].
//! - [`UniformGrid`]: `N×N` cells over `[0, extent]²`. An entry is recorded in
//!   every cell its box overlaps, so it can be reported more than once.
//! - [`FlatVec`]: linear scan, reports each entry at most once.
//! - [`Aabb2D`]: closed boxes; degenerate boxes (points, segments) still hit.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use maptile_grid::{Aabb2D, GridIndex};
//!
//! // 8192 units split into 16×16 cells of 512.
//! let mut grid = GridIndex::new(8192.0, 16);
//! grid.insert("pond", Aabb2D::new(0.0, 0.0, 100.0, 100.0));
//! grid.insert("river", Aabb2D::new(400.0, 0.0, 700.0, 50.0));
//!
//! assert_eq!(grid.query_point(Point::new(50.0, 50.0)), [&"pond"]);
//!
//! // The river spans two cells, so a query covering both sees it twice.
//! let hits = grid.query_rect(Aabb2D::new(300.0, 0.0, 800.0, 60.0));
//! assert_eq!(hits, [&"river", &"river"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod index;
mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::uniform::UniformGrid;
pub use index::GridIndex;
pub use types::Aabb2D;
