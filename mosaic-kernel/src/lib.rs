//! Mosaic Kernel - the gallery core that feeds the justified grid.
//!
//! This crate contains:
//! - Gallery state (images, measured ratios, skeleton tiles, filter, selection)
//! - Image measurement through an injected [`DimensionProbe`]
//! - Container width observation ([`Viewport`])
//! - Configuration and persisted preferences
//!
//! The layout itself lives in `mosaic-layout`; the kernel only decides what
//! goes into it and when it has to be recomputed.

pub mod config;
pub mod prefs;
pub mod probe;
pub mod state;
pub mod viewport;

mod error;

pub use config::GalleryConfig;
pub use error::GalleryError;
pub use prefs::{PrefStore, Preferences};
pub use probe::{DimensionProbe, FileProbe, StaticProbe};
pub use state::{layout_tiles, GalleryState, Tile};
pub use viewport::{Viewport, WidthWatcher};

use mosaic_api::{GalleryEvent, GalleryImage, ItemId, Ratio};
use mosaic_layout::{Item, Row};
use tokio::sync::broadcast;

/// The gallery kernel - owns gallery state and tells subscribers when the
/// layout is stale.
pub struct Gallery {
    state: GalleryState,
    config: GalleryConfig,
    event_tx: broadcast::Sender<GalleryEvent>,
    viewport: Viewport,
    /// Preference store (None when the home directory is unavailable).
    store: Option<PrefStore>,
    preferences: Preferences,
}

impl Gallery {
    /// Create a gallery using the default preference store.
    pub fn new(config: GalleryConfig) -> (Self, broadcast::Receiver<GalleryEvent>) {
        // Non-fatal: without a store the column choice just isn't remembered.
        let store = match PrefStore::open_default() {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("Failed to open preference store: {}", e);
                None
            }
        };
        Self::with_store(config, store)
    }

    /// Create a gallery with an explicit (or no) preference store.
    pub fn with_store(
        config: GalleryConfig,
        store: Option<PrefStore>,
    ) -> (Self, broadcast::Receiver<GalleryEvent>) {
        let (event_tx, event_rx) = broadcast::channel(256);
        let (viewport, _) = Viewport::new();

        // Unset fields resolve against the config at use time.
        let preferences = match store.as_ref().map(PrefStore::load) {
            Some(Ok(Some(prefs))) => prefs,
            Some(Ok(None)) | None => Preferences::default(),
            Some(Err(e)) => {
                tracing::warn!("Failed to load preferences: {}", e);
                Preferences::default()
            }
        };

        let gallery = Self {
            state: GalleryState::new(),
            config,
            event_tx,
            viewport,
            store,
            preferences,
        };
        (gallery, event_rx)
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Subscribe to gallery events.
    pub fn subscribe(&self) -> broadcast::Receiver<GalleryEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: GalleryEvent) {
        let _ = self.event_tx.send(event);
    }

    // ---------------------------------------------------------------------
    // Columns & width
    // ---------------------------------------------------------------------

    /// Requested column count: the saved preference, else the configured default.
    pub fn requested_columns(&self) -> usize {
        self.preferences
            .grid_columns
            .unwrap_or(self.config.default_columns)
    }

    /// Column count actually used for layout (the request, clamped).
    pub fn columns(&self) -> usize {
        self.config.clamp_columns(self.requested_columns())
    }

    /// Change the column preference and persist it.
    pub fn set_columns(&mut self, columns: usize) {
        if self.preferences.grid_columns == Some(columns) {
            return;
        }
        self.preferences.grid_columns = Some(columns);
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.preferences) {
                tracing::warn!("Failed to save preferences: {}", e);
            }
        }
        self.emit(GalleryEvent::ColumnsChanged {
            columns: self.columns(),
        });
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Watch the container width.
    pub fn watch_width(&self) -> WidthWatcher {
        self.viewport.watch()
    }

    /// Report a measured container width. Returns whether it changed.
    pub fn report_width(&self, width: f32) -> bool {
        let changed = self.viewport.report(width);
        if changed {
            self.emit(GalleryEvent::WidthChanged { width });
        }
        changed
    }

    // ---------------------------------------------------------------------
    // Images
    // ---------------------------------------------------------------------

    /// Show skeletons while the image list is being fetched.
    pub fn begin_loading(&mut self) {
        let count = self.state.seed_initial_skeletons(self.requested_columns(), &self.config);
        self.emit(GalleryEvent::PendingChanged { count });
    }

    /// Replace the image list once it has been fetched; clears the skeletons.
    pub fn load_images(&mut self, images: Vec<GalleryImage>) {
        let count = self.state.set_images(images);
        self.state.clear_pending();
        tracing::info!("Loaded {} gallery images", count);
        self.emit(GalleryEvent::ImagesChanged { count });
        self.emit(GalleryEvent::PendingChanged { count: 0 });
    }

    /// Show `count` skeletons of the requested ratio while images generate.
    pub fn begin_generation(&mut self, count: usize, ratio: &str) {
        let count = self.state.begin_generation(count, ratio);
        self.emit(GalleryEvent::PendingChanged { count });
    }

    /// Add generated images and drop the generation skeletons.
    pub fn finish_generation(&mut self, images: Vec<GalleryImage>) {
        let added = self.state.add_generated(images);
        self.state.clear_pending();
        tracing::info!("Added {} generated images", added);
        self.emit(GalleryEvent::ImagesChanged {
            count: self.state.images().len(),
        });
        self.emit(GalleryEvent::PendingChanged { count: 0 });
    }

    pub fn set_show_favorites(&mut self, show: bool) {
        if self.state.show_favorites() != show {
            self.state.set_show_favorites(show);
            self.emit(GalleryEvent::FilterChanged { show_favorites: show });
        }
    }

    /// Toggle selection of an image. Returns whether it is now selected.
    pub fn toggle_select(&mut self, id: &ItemId) -> bool {
        let selected = self.state.toggle_select(id);
        self.emit(GalleryEvent::SelectionChanged {
            selected: self.state.selected().len(),
        });
        selected
    }

    pub fn clear_selection(&mut self) {
        if !self.state.selected().is_empty() {
            self.state.clear_selection();
            self.emit(GalleryEvent::SelectionChanged { selected: 0 });
        }
    }

    /// Mark images as favourites (or not) after the service confirmed it.
    pub fn set_favorite(&mut self, ids: &[ItemId], is_favorite: bool) -> usize {
        let matched = self.state.set_favorite(ids, is_favorite);
        if matched > 0 {
            self.emit(GalleryEvent::ImagesChanged {
                count: self.state.images().len(),
            });
        }
        matched
    }

    /// Drop images after the service deleted them.
    pub fn remove(&mut self, ids: &[ItemId]) -> usize {
        let removed = self.state.remove(ids);
        if removed > 0 {
            self.emit(GalleryEvent::ImagesChanged {
                count: self.state.images().len(),
            });
        }
        removed
    }

    // ---------------------------------------------------------------------
    // Measurement
    // ---------------------------------------------------------------------

    /// Record an image's natural size. Only the first measurement counts.
    pub fn record_dimensions(&mut self, id: &ItemId, width: u32, height: u32) -> Option<Ratio> {
        let ratio = self.state.record_dimensions(id, width, height)?;
        self.emit(GalleryEvent::RatioMeasured {
            id: id.clone(),
            ratio,
        });
        Some(ratio)
    }

    /// Measure every image that has no ratio yet.
    ///
    /// Failures are logged and leave the image square. Returns how many
    /// images were measured.
    pub async fn measure_missing(&mut self, probe: &dyn DimensionProbe) -> usize {
        let targets: Vec<(ItemId, String)> = self
            .state
            .unmeasured()
            .map(|img| (img.id.clone(), img.image_url.clone()))
            .collect();

        let mut measured = 0;
        for (id, source) in targets {
            match probe.dimensions(&source).await {
                Ok((width, height)) => {
                    if self.record_dimensions(&id, width, height).is_some() {
                        measured += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to measure {} ({}): {}", id, source, e);
                }
            }
        }
        measured
    }

    // ---------------------------------------------------------------------
    // Layout
    // ---------------------------------------------------------------------

    /// Current layout items (skeletons first).
    pub fn tiles(&self) -> Vec<Item<Tile>> {
        self.state.tiles()
    }

    /// Lay out `tiles` for the current width and column preference.
    pub fn layout<'a>(&self, tiles: &'a [Item<Tile>]) -> Vec<Row<'a, Tile>> {
        layout_tiles(tiles, self.viewport.width(), self.requested_columns(), &self.config)
    }
}
