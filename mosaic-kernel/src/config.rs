//! Gallery configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants to
//! override:
//!
//! ```json
//! { "gap": 4, "max_columns": 6 }
//! ```

use std::path::Path;

use mosaic_layout::JustifiedGrid;
use serde::{Deserialize, Serialize};

use crate::GalleryError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Horizontal gap between tiles, in pixels.
    pub gap: f32,
    /// Vertical gap between rows. Falls back to `gap`.
    pub row_spacing: Option<f32>,
    /// Ratio assumed for the empty slots of the last row.
    pub placeholder_ratio: f64,
    pub min_columns: usize,
    pub max_columns: usize,
    /// Column count used until the user picks one.
    pub default_columns: usize,
    /// Ratio of the skeleton tiles shown while the gallery loads.
    pub skeleton_ratio: String,
    /// Rows worth of skeletons shown on the initial load.
    pub initial_skeleton_rows: usize,
    pub min_initial_skeletons: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            gap: 8.0,
            row_spacing: None,
            placeholder_ratio: 1.0,
            min_columns: 2,
            max_columns: 5,
            default_columns: 4,
            skeleton_ratio: "3/2".to_string(),
            initial_skeleton_rows: 2,
            min_initial_skeletons: 6,
        }
    }
}

impl GalleryConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, GalleryError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Read a JSON config file, falling back to the defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp a requested column count into the configured range.
    pub fn clamp_columns(&self, columns: usize) -> usize {
        let min = self.min_columns.max(1);
        let max = self.max_columns.max(min);
        columns.clamp(min, max)
    }

    pub fn row_spacing(&self) -> f32 {
        self.row_spacing.unwrap_or(self.gap)
    }

    /// Number of skeleton tiles to show before the first load completes.
    pub fn initial_skeleton_count(&self, columns: usize) -> usize {
        (self.clamp_columns(columns) * self.initial_skeleton_rows).max(self.min_initial_skeletons)
    }

    /// Grid settings for the given (unclamped) column count.
    pub fn grid(&self, columns: usize) -> JustifiedGrid {
        JustifiedGrid::new()
            .columns(self.clamp_columns(columns))
            .gap(self.gap)
            .row_spacing(self.row_spacing())
            .placeholder_ratio(self.placeholder_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_columns() {
        let config = GalleryConfig::default();
        assert_eq!(config.clamp_columns(0), 2);
        assert_eq!(config.clamp_columns(3), 3);
        assert_eq!(config.clamp_columns(9), 5);
    }

    #[test]
    fn test_clamp_survives_inverted_range() {
        let config = GalleryConfig {
            min_columns: 6,
            max_columns: 2,
            ..GalleryConfig::default()
        };
        assert_eq!(config.clamp_columns(1), 6);
        assert_eq!(config.clamp_columns(10), 6);
    }

    #[test]
    fn test_initial_skeleton_count() {
        let config = GalleryConfig::default();
        assert_eq!(config.initial_skeleton_count(2), 6);
        assert_eq!(config.initial_skeleton_count(4), 8);
        assert_eq!(config.initial_skeleton_count(12), 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GalleryConfig = serde_json::from_str(r#"{ "gap": 4, "max_columns": 6 }"#).unwrap();
        assert_eq!(config.gap, 4.0);
        assert_eq!(config.max_columns, 6);
        assert_eq!(config.min_columns, 2);
        assert_eq!(config.row_spacing(), 4.0);
        assert_eq!(config.skeleton_ratio, "3/2");
    }

    #[test]
    fn test_grid_uses_clamped_columns() {
        let grid = GalleryConfig::default().grid(9);
        assert_eq!(grid.get_columns(), 5);
        assert_eq!(grid.get_gap(), 8.0);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = GalleryConfig::load_or_default(Path::new("/nonexistent/mosaic.json"));
        assert_eq!(config, GalleryConfig::default());
    }
}
