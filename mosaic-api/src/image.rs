//! Gallery image records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ItemId;

/// A generated image as returned by the image service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: ItemId,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, rename = "is_favorite")]
    pub is_favorite: bool,
    #[serde(default, rename = "is_deleted")]
    pub is_deleted: bool,
}

impl GalleryImage {
    pub fn new(id: impl Into<ItemId>, image_url: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            image_url: image_url.into(),
            created_at,
            is_favorite: false,
            is_deleted: false,
        }
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    pub fn deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }
}
