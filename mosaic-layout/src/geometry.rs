//! Absolute placement of laid-out rows.

use serde::Serialize;

use crate::item::Item;
use crate::justified::Row;

/// A rectangle in container coordinates (origin at the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// An item with its absolute rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedItem<'a, P> {
    pub item: &'a Item<P>,
    pub rect: Rect,
    /// Index of the row the item belongs to.
    pub row: usize,
}

/// Assign absolute rectangles to every placed item, rows top to bottom.
pub fn positioned<'a, P>(rows: &[Row<'a, P>], gap: f32, row_spacing: f32) -> Vec<PositionedItem<'a, P>> {
    let mut out = Vec::with_capacity(rows.iter().map(Row::len).sum());
    let mut y = 0.0f32;

    for (row_index, row) in rows.iter().enumerate() {
        let mut x = 0.0f32;
        for placed in &row.items {
            out.push(PositionedItem {
                item: placed.item,
                rect: Rect::new(x, y, placed.width, placed.height),
                row: row_index,
            });
            x += placed.width + gap;
        }
        y += row.height() + row_spacing;
    }

    out
}

/// Find the item under a point, if any.
pub fn hit_test<'p, 'a, P>(placed: &'p [PositionedItem<'a, P>], x: f32, y: f32) -> Option<&'p PositionedItem<'a, P>> {
    placed.iter().find(|p| p.rect.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::justified::layout_rows;

    #[test]
    fn test_positions_follow_rows() {
        let items: Vec<Item<()>> = (0..3).map(|i| Item::new(i.to_string(), 1.0, ())).collect();
        let rows = layout_rows(&items, 2, 404.0, 8.0, 1.0);
        let placed = positioned(&rows, 8.0, 4.0);

        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].rect, Rect::new(0.0, 0.0, 198.0, 198.0));
        assert_eq!(placed[1].rect, Rect::new(206.0, 0.0, 198.0, 198.0));
        assert_eq!(placed[2].rect, Rect::new(0.0, 202.0, 198.0, 198.0));
        assert_eq!(placed[2].row, 1);
    }

    #[test]
    fn test_hit_test() {
        let items: Vec<Item<()>> = (0..2).map(|i| Item::new(i.to_string(), 1.0, ())).collect();
        let rows = layout_rows(&items, 2, 208.0, 8.0, 1.0);
        let placed = positioned(&rows, 8.0, 8.0);

        assert_eq!(hit_test(&placed, 10.0, 10.0).map(|p| p.item.id.as_str()), Some("0"));
        assert_eq!(hit_test(&placed, 150.0, 50.0).map(|p| p.item.id.as_str()), Some("1"));
        // In the gap.
        assert!(hit_test(&placed, 102.0, 50.0).is_none());
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
        assert!(!Rect::ZERO.contains(0.0, 0.0));
    }
}
