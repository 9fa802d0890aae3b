//! Boundary with the external figure classifier.
//!
//! The classifier is a black box: it receives the raster image of the drawing
//! and a read-only store of bundled resources (reference data, templates) and
//! answers with a label. Its algorithm lives outside this crate.

use std::collections::HashMap;

use image::RgbaImage;

use crate::error::{AssetError, ClassifyError};

/// Read-only store of bundled resources
pub trait AssetStore {
    /// Read the full contents of the named asset
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// Maps a drawing to a textual label
pub trait Classifier {
    fn classify(&self, image: &RgbaImage, assets: &dyn AssetStore) -> Result<String, ClassifyError>;
}

impl<F> Classifier for F
where
    F: Fn(&RgbaImage, &dyn AssetStore) -> Result<String, ClassifyError>,
{
    fn classify(&self, image: &RgbaImage, assets: &dyn AssetStore) -> Result<String, ClassifyError> {
        self(image, assets)
    }
}

/// In-memory asset store, filled once at startup
#[derive(Debug, Clone, Default)]
pub struct BundledAssets {
    assets: HashMap<String, Vec<u8>>,
}

impl BundledAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset, replacing any previous one with the same name
    pub fn with_asset(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.assets.insert(name.into(), bytes.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetStore for BundledAssets {
    fn open(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_owned()))
    }
}
