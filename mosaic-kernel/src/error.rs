//! Gallery error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("measurement task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("no dimensions known for {0}")]
    Unmeasurable(String),

    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("width observer closed")]
    ViewportClosed,
}
