//! Persisted user preferences (~/.mosaic/prefs.json).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::GalleryError;

const PREFS_DIR: &str = ".mosaic";
const PREFS_FILE: &str = "prefs.json";

/// User preferences that survive restarts.
///
/// Unset fields fall back to the gallery configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Requested column count, stored unclamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<usize>,
}

/// JSON-file backed preference store.
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    /// Store at the default location (~/.mosaic/prefs.json).
    pub fn open_default() -> Result<Self, GalleryError> {
        let home = dirs::home_dir().ok_or(GalleryError::NoHomeDir)?;
        Ok(Self::open(home.join(PREFS_DIR).join(PREFS_FILE)))
    }

    /// Store at a specific path. Nothing is touched until the first save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences. `None` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Preferences>, GalleryError> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write preferences, creating the parent directory if needed.
    pub fn save(&self, prefs: &Preferences) -> Result<(), GalleryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("prefs.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_missing_keys_stay_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{}").unwrap();
        let store = PrefStore::open(path);
        assert_eq!(store.load().unwrap(), Some(Preferences { grid_columns: None }));
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("nested").join("prefs.json"));
        store.save(&Preferences { grid_columns: Some(3) }).unwrap();
        assert_eq!(store.load().unwrap().and_then(|p| p.grid_columns), Some(3));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();
        let store = PrefStore::open(path);
        assert!(matches!(store.load(), Err(GalleryError::Json(_))));
    }
}
