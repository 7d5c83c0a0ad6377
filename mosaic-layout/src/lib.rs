//! Mosaic Layout - justified image-grid layout.
//!
//! Packs a flat, ordered list of items into rows of a fixed column count and
//! scales each row so its items share one height and together fill the
//! container width, keeping every item's aspect ratio.
//!
//! # Architecture
//!
//! ```text
//! items + columns + width -> layout_rows() -> Vec<Row> -> positioned() -> Rects
//! ```
//!
//! The layout is a pure function. It keeps no state between calls, so callers
//! recompute it on every resize or item change and memoize externally if
//! they need to.

pub mod geometry;
pub mod item;
pub mod justified;

pub use geometry::{hit_test, positioned, PositionedItem, Rect};
pub use item::Item;
pub use justified::{layout_rows, JustifiedGrid, PlacedItem, Row, DEFAULT_PLACEHOLDER_RATIO};
