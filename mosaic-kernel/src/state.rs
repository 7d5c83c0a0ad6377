//! Gallery state: images, measured ratios, skeletons, filter and selection.
//!
//! This is plain data. It never talks to the network and never lays anything
//! out by itself; [`GalleryState::tiles`] turns it into layout items.

use std::collections::HashMap;

use mosaic_api::{parse_ratio_lenient, GalleryImage, ItemId, Ratio};
use mosaic_layout::{Item, Row};

use crate::GalleryConfig;

/// What a grid tile shows.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Tile {
    /// A skeleton standing in for an image that is still loading or generating.
    Pending { ratio: String },
    /// A loaded gallery image.
    Image(GalleryImage),
}

impl Tile {
    pub fn is_pending(&self) -> bool {
        matches!(self, Tile::Pending { .. })
    }
}

#[derive(Debug, Default)]
pub struct GalleryState {
    images: Vec<GalleryImage>,
    /// First measurement per id wins.
    ratios: HashMap<ItemId, Ratio>,
    /// Skeleton ratios, in display order.
    pending: Vec<String>,
    show_favorites: bool,
    selected: Vec<ItemId>,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Images
    // ---------------------------------------------------------------------

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    /// Replace the image list. Deleted records are dropped and the selection
    /// is cleared. Returns the number of images kept.
    pub fn set_images(&mut self, images: Vec<GalleryImage>) -> usize {
        self.images = images.into_iter().filter(|img| !img.is_deleted).collect();
        self.selected.clear();
        self.images.len()
    }

    /// Prepend freshly generated images, keeping the list newest first.
    pub fn add_generated(&mut self, generated: Vec<GalleryImage>) -> usize {
        let added = generated.len();
        let mut images = generated;
        images.append(&mut self.images);
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.images = images;
        self.selected.clear();
        added
    }

    /// Images currently shown (all of them, or only favourites).
    pub fn displayed(&self) -> impl Iterator<Item = &GalleryImage> {
        let favorites_only = self.show_favorites;
        self.images.iter().filter(move |img| !favorites_only || img.is_favorite)
    }

    /// Set the favourite flag on the given images. Returns how many matched.
    pub fn set_favorite(&mut self, ids: &[ItemId], is_favorite: bool) -> usize {
        let mut matched = 0;
        for image in self.images.iter_mut().filter(|img| ids.contains(&img.id)) {
            image.is_favorite = is_favorite;
            matched += 1;
        }
        matched
    }

    /// Drop the given images and their selection. Returns how many were removed.
    pub fn remove(&mut self, ids: &[ItemId]) -> usize {
        let before = self.images.len();
        self.images.retain(|img| !ids.contains(&img.id));
        self.selected.retain(|id| !ids.contains(id));
        before - self.images.len()
    }

    // ---------------------------------------------------------------------
    // Aspect ratios
    // ---------------------------------------------------------------------

    pub fn ratio(&self, id: &ItemId) -> Option<Ratio> {
        self.ratios.get(id).copied()
    }

    /// Record an image's natural size.
    ///
    /// Returns the reduced ratio when this is the first measurement for `id`;
    /// later measurements and zero sizes are ignored.
    pub fn record_dimensions(&mut self, id: &ItemId, width: u32, height: u32) -> Option<Ratio> {
        if self.ratios.contains_key(id) {
            return None;
        }
        let ratio = Ratio::from_dimensions(width, height)?;
        self.ratios.insert(id.clone(), ratio);
        Some(ratio)
    }

    /// Images that have not been measured yet.
    pub fn unmeasured(&self) -> impl Iterator<Item = &GalleryImage> {
        self.images.iter().filter(|img| !self.ratios.contains_key(&img.id))
    }

    // ---------------------------------------------------------------------
    // Skeletons
    // ---------------------------------------------------------------------

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Show the initial-load skeletons. Returns how many were added.
    pub fn seed_initial_skeletons(&mut self, columns: usize, config: &GalleryConfig) -> usize {
        let count = config.initial_skeleton_count(columns);
        self.pending = vec![config.skeleton_ratio.clone(); count];
        count
    }

    /// Replace the skeletons with `count` tiles of the requested ratio.
    ///
    /// Ratios may use `:` (`"16:9"`); they are stored as `w/h`.
    pub fn begin_generation(&mut self, count: usize, ratio: &str) -> usize {
        let ratio = ratio.replacen(':', "/", 1);
        self.pending = vec![ratio; count];
        count
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    // ---------------------------------------------------------------------
    // Filter & selection
    // ---------------------------------------------------------------------

    pub fn show_favorites(&self) -> bool {
        self.show_favorites
    }

    pub fn set_show_favorites(&mut self, show: bool) {
        self.show_favorites = show;
    }

    pub fn selected(&self) -> &[ItemId] {
        &self.selected
    }

    /// Toggle an image's selection. Skeleton tiles cannot be selected.
    ///
    /// Returns whether the id is selected afterwards.
    pub fn toggle_select(&mut self, id: &ItemId) -> bool {
        if id.is_pending() {
            return false;
        }
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id.clone());
            true
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // ---------------------------------------------------------------------
    // Layout input
    // ---------------------------------------------------------------------

    /// Build the layout items: skeletons first, then the displayed images.
    ///
    /// Unmeasured images are laid out as squares until their ratio arrives.
    pub fn tiles(&self) -> Vec<Item<Tile>> {
        let pending = self.pending.iter().enumerate().map(|(i, ratio)| {
            Item::new(
                ItemId::pending(i),
                parse_ratio_lenient(Some(ratio)),
                Tile::Pending { ratio: ratio.clone() },
            )
        });

        let images = self.displayed().map(|img| {
            let tile = Tile::Image(img.clone());
            match self.ratio(&img.id) {
                Some(ratio) => Item::with_ratio(img.id.clone(), ratio, tile),
                None => Item::unmeasured(img.id.clone(), tile),
            }
        });

        pending.chain(images).collect()
    }
}

/// Lay out tiles for a container width and a requested column count.
///
/// Columns are clamped to the configured range; a zero width yields no rows.
pub fn layout_tiles<'a>(
    tiles: &'a [Item<Tile>],
    container_width: f32,
    columns: usize,
    config: &GalleryConfig,
) -> Vec<Row<'a, Tile>> {
    let grid = config.grid(columns);
    let rows = grid.layout(tiles, container_width);
    tracing::debug!(
        tiles = tiles.len(),
        rows = rows.len(),
        columns = grid.get_columns(),
        width = container_width,
        "Recomputed gallery layout"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn image(id: &str, minute: u32) -> GalleryImage {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, minute, 0).unwrap();
        GalleryImage::new(id, format!("https://cdn.example/{id}.png"), at)
    }

    #[test]
    fn test_set_images_drops_deleted() {
        let mut state = GalleryState::new();
        let kept = state.set_images(vec![image("1", 0), image("2", 1).deleted(true), image("3", 2)]);
        assert_eq!(kept, 2);
        let ids: Vec<&str> = state.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_add_generated_sorts_newest_first() {
        let mut state = GalleryState::new();
        state.set_images(vec![image("old", 5), image("older", 1)]);
        state.add_generated(vec![image("new", 30)]);
        let ids: Vec<&str> = state.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "older"]);
    }

    #[test]
    fn test_first_measurement_wins() {
        let mut state = GalleryState::new();
        let id = ItemId::from("1");
        assert_eq!(state.record_dimensions(&id, 1920, 1080), Some(Ratio::new(16, 9).unwrap()));
        assert_eq!(state.record_dimensions(&id, 100, 100), None);
        assert_eq!(state.ratio(&id).unwrap().to_string(), "16/9");
    }

    #[test]
    fn test_zero_dimensions_ignored() {
        let mut state = GalleryState::new();
        let id = ItemId::from("1");
        assert_eq!(state.record_dimensions(&id, 0, 0), None);
        assert!(state.ratio(&id).is_none());
        assert!(state.record_dimensions(&id, 4, 3).is_some());
    }

    #[test]
    fn test_tiles_put_pending_first() {
        let mut state = GalleryState::new();
        state.set_images(vec![image("a", 0), image("b", 1)]);
        state.record_dimensions(&ItemId::from("b"), 1200, 800);
        state.begin_generation(2, "16:9");

        let tiles = state.tiles();
        let ids: Vec<&str> = tiles.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["pending_0", "pending_1", "a", "b"]);
        assert!((tiles[0].ratio() - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(tiles[2].ratio(), 1.0);
        assert_eq!(tiles[3].ratio(), 1.5);
        assert_eq!(tiles[0].payload, Tile::Pending { ratio: "16/9".to_string() });
    }

    #[test]
    fn test_favorites_filter() {
        let mut state = GalleryState::new();
        state.set_images(vec![image("a", 0), image("b", 1).favorite(true)]);
        state.set_show_favorites(true);
        let ids: Vec<ItemId> = state.displayed().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![ItemId::from("b")]);

        state.set_favorite(&[ItemId::from("a")], true);
        assert_eq!(state.displayed().count(), 2);
    }

    #[test]
    fn test_selection_rules() {
        let mut state = GalleryState::new();
        state.set_images(vec![image("a", 0), image("b", 1)]);
        assert!(state.toggle_select(&ItemId::from("a")));
        assert!(!state.toggle_select(&ItemId::pending(0)));
        assert_eq!(state.selected(), &[ItemId::from("a")]);
        assert!(!state.toggle_select(&ItemId::from("a")));
        assert!(state.selected().is_empty());

        state.toggle_select(&ItemId::from("b"));
        assert_eq!(state.remove(&[ItemId::from("b")]), 1);
        assert!(state.selected().is_empty());
    }

    #[test]
    fn test_initial_skeletons() {
        let mut state = GalleryState::new();
        let config = GalleryConfig::default();
        assert_eq!(state.seed_initial_skeletons(4, &config), 8);
        assert!(state.tiles().iter().all(|t| t.payload.is_pending() && t.ratio() == 1.5));
        state.clear_pending();
        assert_eq!(state.pending_count(), 0);
    }

    #[test]
    fn test_layout_tiles_clamps_columns() {
        let mut state = GalleryState::new();
        state.set_images((0..7).map(|i| image(&i.to_string(), i)).collect());
        let tiles = state.tiles();
        let config = GalleryConfig::default();

        // 12 columns clamps to 5: rows of 5 and 2.
        let rows = layout_tiles(&tiles, 1032.0, 12, &config);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 5);
        assert_eq!(rows[0].height(), 200.0);
        assert_eq!(rows[1].height(), 200.0);

        assert!(layout_tiles(&tiles, 0.0, 4, &config).is_empty());
    }
}
