//! Item identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix carried by the ids of pending skeleton tiles.
pub const PENDING_PREFIX: &str = "pending_";

/// Opaque identifier for a gallery item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of the `index`-th pending skeleton tile.
    pub fn pending(index: usize) -> Self {
        Self(format!("{PENDING_PREFIX}{index}"))
    }

    /// Whether this id names a pending skeleton rather than a real image.
    pub fn is_pending(&self) -> bool {
        self.0.starts_with(PENDING_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
