//! Image dimension probes.
//!
//! The gallery needs each image's natural pixel size to know its aspect ratio.
//! How that size is obtained depends on where the images live, so it is an
//! injected capability.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::GalleryError;

/// Reports the natural pixel size of an image source.
#[async_trait]
pub trait DimensionProbe: Send + Sync {
    /// Return `(width, height)` in pixels.
    async fn dimensions(&self, source: &str) -> Result<(u32, u32), GalleryError>;
}

// =========================================================================
// FileProbe
// =========================================================================

/// Reads image headers from the local filesystem.
///
/// Sources may be plain paths or `file://` URLs. Relative paths resolve
/// against the probe's root, if it has one.
#[derive(Debug, Clone, Default)]
pub struct FileProbe {
    root: Option<PathBuf>,
}

impl FileProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative sources against `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self { root: Some(root.into()) }
    }

    /// Map a source string to a filesystem path.
    pub fn resolve(&self, source: &str) -> PathBuf {
        let raw = match source.strip_prefix("file://") {
            Some(rest) => urlencoding::decode(rest)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| rest.to_string()),
            None => source.to_string(),
        };

        let path = PathBuf::from(raw);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        }
    }
}

#[async_trait]
impl DimensionProbe for FileProbe {
    async fn dimensions(&self, source: &str) -> Result<(u32, u32), GalleryError> {
        let path = self.resolve(source);
        // Header decoding is blocking file I/O.
        let size = tokio::task::spawn_blocking(move || read_dimensions(&path)).await??;
        Ok(size)
    }
}

fn read_dimensions(path: &Path) -> Result<(u32, u32), GalleryError> {
    Ok(image::image_dimensions(path)?)
}

// =========================================================================
// StaticProbe
// =========================================================================

/// Answers from a fixed table. Useful when sizes are already known
/// (service metadata) and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    sizes: HashMap<String, (u32, u32)>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl Into<String>, width: u32, height: u32) -> Self {
        self.sizes.insert(source.into(), (width, height));
        self
    }
}

#[async_trait]
impl DimensionProbe for StaticProbe {
    async fn dimensions(&self, source: &str) -> Result<(u32, u32), GalleryError> {
        self.sizes
            .get(source)
            .copied()
            .ok_or_else(|| GalleryError::Unmeasurable(source.to_string()))
    }
}
