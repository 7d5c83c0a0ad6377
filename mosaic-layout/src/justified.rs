//! Justified grid - fixed-count rows scaled to fill the container width.
//!
//! Items are taken `columns` at a time. Each row gets a single height chosen
//! so that the widths of its items, plus the gaps between them, add up to the
//! container width. A final row with fewer than `columns` items is sized as if
//! the empty slots held placeholders of `placeholder_ratio`, so the last few
//! items keep the height of the rows above instead of blowing up to fill the
//! whole width.

use serde::Serialize;

use crate::item::Item;

/// Aspect ratio assumed for the empty slots of a partial row.
pub const DEFAULT_PLACEHOLDER_RATIO: f64 = 1.0;

// =========================================================================
// Output
// =========================================================================

/// An item with its computed size. Sizes are whole pixels.
///
/// Row arithmetic runs in `f64`; sizes are narrowed only after rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem<'a, P> {
    pub item: &'a Item<P>,
    pub width: f32,
    pub height: f32,
}

/// One row of the grid, items left to right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row<'a, P> {
    pub items: Vec<PlacedItem<'a, P>>,
    height: f32,
    /// Slots sized as placeholders (non-zero only for a partial final row).
    missing: usize,
}

impl<'a, P> Row<'a, P> {
    /// Height shared by every item in the row.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of placeholder slots that took part in sizing this row.
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Whether the row has fewer items than the column count.
    pub fn is_partial(&self) -> bool {
        self.missing > 0
    }

    /// Rendered width: item widths plus the gaps between present items.
    pub fn content_width(&self, gap: f32) -> f32 {
        let widths: f32 = self.items.iter().map(|p| p.width).sum();
        widths + gap * self.items.len().saturating_sub(1) as f32
    }
}

// =========================================================================
// Layout
// =========================================================================

/// Lay out `items` in rows of `columns` items each.
///
/// Returns one row per chunk of `columns` input items, in input order. An
/// empty input or a container width that is not positive yields no rows. A
/// column count of 0 is treated as 1. Nothing is validated beyond that: odd
/// inputs (a gap wider than the container, a negative placeholder ratio)
/// produce odd sizes, never a panic.
pub fn layout_rows<'a, P>(
    items: &'a [Item<P>],
    columns: usize,
    container_width: f32,
    gap: f32,
    placeholder_ratio: f64,
) -> Vec<Row<'a, P>> {
    // Also rejects NaN.
    if items.is_empty() || !(container_width > 0.0) {
        return Vec::new();
    }

    let columns = columns.max(1);
    // Reserved as if every row were full, so a partial row matches the others.
    let reserved_gaps = f64::from(gap) * (columns - 1) as f64;
    let available = f64::from(container_width) - reserved_gaps;

    items
        .chunks(columns)
        .map(|slice| {
            let missing = columns - slice.len();
            let ratio_sum: f64 = slice.iter().map(Item::ratio).sum::<f64>()
                + missing as f64 * placeholder_ratio;

            let height = (available / ratio_sum.max(1.0)).floor();

            let items = slice
                .iter()
                .map(|item| PlacedItem {
                    item,
                    width: (height * item.ratio()).round() as f32,
                    height: height as f32,
                })
                .collect();

            Row {
                items,
                height: height as f32,
                missing,
            }
        })
        .collect()
}

// =========================================================================
// JustifiedGrid
// =========================================================================

/// Builder form of [`layout_rows`] carrying the grid settings.
///
/// ```
/// use mosaic_layout::{Item, JustifiedGrid};
///
/// let items: Vec<Item<()>> = (0..3).map(|i| Item::new(i.to_string(), 1.0, ())).collect();
/// let rows = JustifiedGrid::new().columns(2).gap(8.0).layout(&items, 404.0);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].height(), 198.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JustifiedGrid {
    columns: usize,
    gap: f32,
    row_spacing: Option<f32>,
    placeholder_ratio: f64,
}

impl JustifiedGrid {
    /// Four columns, 8px gaps, square placeholders.
    pub fn new() -> Self {
        Self {
            columns: 4,
            gap: 8.0,
            row_spacing: None,
            placeholder_ratio: DEFAULT_PLACEHOLDER_RATIO,
        }
    }

    /// Set the number of items per row.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Set the horizontal gap between items.
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the vertical spacing between rows (defaults to the gap).
    pub fn row_spacing(mut self, spacing: f32) -> Self {
        self.row_spacing = Some(spacing);
        self
    }

    /// Set the ratio assumed for the empty slots of a partial row.
    pub fn placeholder_ratio(mut self, ratio: f64) -> Self {
        self.placeholder_ratio = ratio;
        self
    }

    pub fn get_columns(&self) -> usize {
        self.columns
    }

    pub fn get_gap(&self) -> f32 {
        self.gap
    }

    pub fn get_row_spacing(&self) -> f32 {
        self.row_spacing.unwrap_or(self.gap)
    }

    /// Compute the rows for a container of the given width.
    pub fn layout<'a, P>(&self, items: &'a [Item<P>], container_width: f32) -> Vec<Row<'a, P>> {
        layout_rows(items, self.columns, container_width, self.gap, self.placeholder_ratio)
    }

    /// Total grid height for the given width: row heights plus row spacing.
    pub fn height_for_width<P>(&self, items: &[Item<P>], container_width: f32) -> f32 {
        let rows = self.layout(items, container_width);
        let heights: f32 = rows.iter().map(Row::height).sum();
        heights + self.get_row_spacing() * rows.len().saturating_sub(1) as f32
    }
}

impl Default for JustifiedGrid {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
