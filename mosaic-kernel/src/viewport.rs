//! Container width observation.
//!
//! Whatever measures the gallery container (a window resize hook, a terminal
//! size query) reports widths into a [`Viewport`]. Layout code holds a
//! [`WidthWatcher`] and re-runs the layout when the width changes. Only the
//! latest width is kept.

use std::time::Duration;

use tokio::sync::watch;

use crate::GalleryError;

/// Producer side of the width channel.
#[derive(Debug)]
pub struct Viewport {
    tx: watch::Sender<f32>,
}

/// Consumer side of the width channel.
#[derive(Debug, Clone)]
pub struct WidthWatcher {
    rx: watch::Receiver<f32>,
}

impl Viewport {
    /// Create a viewport with an unknown (zero) width.
    pub fn new() -> (Self, WidthWatcher) {
        let (tx, rx) = watch::channel(0.0);
        (Self { tx }, WidthWatcher { rx })
    }

    /// Report a measured width.
    ///
    /// Zero, negative and NaN widths are ignored (the container has not been
    /// laid out yet), as is a width equal to the current one. Returns whether
    /// watchers were notified.
    pub fn report(&self, width: f32) -> bool {
        if !(width > 0.0) {
            return false;
        }
        self.tx.send_if_modified(|current| {
            if *current == width {
                false
            } else {
                *current = width;
                true
            }
        })
    }

    /// Latest reported width (0 until the first report).
    pub fn width(&self) -> f32 {
        *self.tx.borrow()
    }

    /// Create another watcher.
    pub fn watch(&self) -> WidthWatcher {
        WidthWatcher { rx: self.tx.subscribe() }
    }
}

impl WidthWatcher {
    /// Latest width, marking it as seen.
    pub fn current(&mut self) -> f32 {
        *self.rx.borrow_and_update()
    }

    /// Wait for the next width change.
    pub async fn changed(&mut self) -> Result<f32, GalleryError> {
        self.rx.changed().await.map_err(|_| GalleryError::ViewportClosed)?;
        Ok(self.current())
    }

    /// Wait for a width change, then for the width to stay put for `quiet`.
    ///
    /// Collapses a burst of resize reports into one layout pass. If the
    /// viewport goes away mid-burst, the last width seen is returned.
    pub async fn settled(&mut self, quiet: Duration) -> Result<f32, GalleryError> {
        let mut width = self.changed().await?;
        loop {
            match tokio::time::timeout(quiet, self.rx.changed()).await {
                Ok(Ok(())) => width = self.current(),
                Ok(Err(_)) | Err(_) => return Ok(width),
            }
        }
    }
}
