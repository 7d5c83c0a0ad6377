//! Property-based tests for the justified grid.
//!
//! Random item lists, column counts, widths and gaps are fed through
//! `layout_rows` and the structural guarantees are checked:
//! 1. Completeness: every item appears once, in input order
//! 2. Row sizes: full rows of `columns`, remainder in the last row
//! 3. Aspect ratios survive up to integer rounding
//! 4. One height per row
//! 5. The placeholder ratio only affects partial rows

use mosaic_layout::{layout_rows, Item};
use proptest::prelude::*;

// -- Strategies --

fn ratio_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => 0.2f64..5.0,
        1 => Just(0.0f64),
        1 => Just(-1.0f64),
    ]
}

fn items_strategy() -> impl Strategy<Value = Vec<Item<usize>>> {
    prop::collection::vec(ratio_strategy(), 0..40).prop_map(|ratios| {
        ratios
            .into_iter()
            .enumerate()
            .map(|(i, r)| Item::new(format!("img_{i}"), r, i))
            .collect()
    })
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_every_item_once_in_order(
        items in items_strategy(),
        columns in 1usize..8,
        width in 1.0f32..4000.0,
        gap in 0.0f32..20.0,
    ) {
        let rows = layout_rows(&items, columns, width, gap, 1.0);
        let order: Vec<usize> = rows
            .iter()
            .flat_map(|row| row.items.iter().map(|p| p.item.payload))
            .collect();
        let expected: Vec<usize> = (0..items.len()).collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn prop_row_sizes(
        items in items_strategy(),
        columns in 1usize..8,
        width in 1.0f32..4000.0,
    ) {
        let rows = layout_rows(&items, columns, width, 8.0, 1.0);

        prop_assert_eq!(rows.len(), items.len().div_ceil(columns));
        if let Some((last, full)) = rows.split_last() {
            for row in full {
                prop_assert_eq!(row.len(), columns);
                prop_assert_eq!(row.missing(), 0);
            }
            let remainder = items.len() % columns;
            let expected_last = if remainder == 0 { columns } else { remainder };
            prop_assert_eq!(last.len(), expected_last);
            prop_assert_eq!(last.missing(), columns - expected_last);
        } else {
            prop_assert!(items.is_empty());
        }
    }

    #[test]
    fn prop_aspect_ratio_preserved(
        items in items_strategy(),
        columns in 1usize..8,
        width in 100.0f32..4000.0,
        gap in 0.0f32..10.0,
    ) {
        let rows = layout_rows(&items, columns, width, gap, 1.0);
        for row in &rows {
            for placed in &row.items {
                let exact = f64::from(placed.height) * placed.item.ratio();
                prop_assert!((f64::from(placed.width) - exact).abs() <= 0.5 + 1e-3,
                    "width {} vs exact {}", placed.width, exact);
            }
        }
    }

    #[test]
    fn prop_uniform_whole_pixel_height(
        items in items_strategy(),
        columns in 1usize..8,
        width in 1.0f32..4000.0,
    ) {
        let rows = layout_rows(&items, columns, width, 4.0, 1.0);
        for row in &rows {
            prop_assert_eq!(row.height().fract(), 0.0);
            for placed in &row.items {
                prop_assert_eq!(placed.height, row.height());
            }
        }
    }

    #[test]
    fn prop_zero_width_is_empty(items in items_strategy(), columns in 1usize..8) {
        prop_assert!(layout_rows(&items, columns, 0.0, 8.0, 1.0).is_empty());
    }

    #[test]
    fn prop_placeholder_only_changes_partial_rows(
        items in items_strategy(),
        columns in 1usize..8,
        width in 100.0f32..4000.0,
        placeholder in 0.1f64..4.0,
    ) {
        let base = layout_rows(&items, columns, width, 8.0, 1.0);
        let other = layout_rows(&items, columns, width, 8.0, placeholder);
        prop_assert_eq!(base.len(), other.len());
        for (a, b) in base.iter().zip(&other) {
            if !a.is_partial() {
                prop_assert_eq!(a, b);
            }
        }
    }
}

#[test]
fn test_degenerate_inputs() {
    let empty: Vec<Item<usize>> = Vec::new();
    assert!(layout_rows(&empty, 4, 800.0, 8.0, 1.0).is_empty());

    let items: Vec<Item<usize>> = (0..5).map(|i| Item::new(i.to_string(), 1.0, i)).collect();
    assert!(layout_rows(&items, 4, 0.0, 8.0, 1.0).is_empty());
}
