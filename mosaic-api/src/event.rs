//! Gallery events emitted by the kernel to subscribers (views, loggers, etc.)
//!
//! Every event means the current layout is stale. Subscribers re-run the
//! layout from scratch; the last event wins.

use serde::{Deserialize, Serialize};

use crate::{ItemId, Ratio};

/// Events emitted by the gallery kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GalleryEvent {
    /// The image list was replaced or extended.
    ImagesChanged { count: usize },

    /// An image's natural dimensions were measured for the first time.
    RatioMeasured { id: ItemId, ratio: Ratio },

    /// Pending skeleton tiles were added or cleared.
    PendingChanged { count: usize },

    /// The column preference changed.
    ColumnsChanged { columns: usize },

    /// The observed container width changed.
    WidthChanged { width: f32 },

    /// The favourites filter was toggled.
    FilterChanged { show_favorites: bool },

    /// The selection changed.
    SelectionChanged { selected: usize },
}
