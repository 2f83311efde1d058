//! Path-keyed image cache.
//!
//! Tile worlds place the same artwork many times; each path is decoded once
//! and the pixels are shared between blocks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::loader::{load_image, LoadedImage};

#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<PathBuf, LoadedImage>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, or return the previously loaded result.
    ///
    /// Fallback results are cached too, so a missing file is reported once.
    pub fn load(&mut self, path: impl AsRef<Path>) -> LoadedImage {
        let path = path.as_ref();
        if let Some(hit) = self.entries.get(path) {
            return hit.clone();
        }
        let loaded = load_image(path);
        self.entries.insert(path.to_path_buf(), loaded.clone());
        loaded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
