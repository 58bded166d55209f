//! Dataset configuration and catalog entry types

use std::path::PathBuf;

use crate::hyperspectral::decode::ImageFormat;
use crate::hyperspectral::spectral::WavelengthRange;

/// One catalog row: where a patch comes from and how to shape it.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    /// Encoding of the source image
    pub format: ImageFormat,
    /// Directory holding the source image
    pub dir: PathBuf,
    /// File name (EXR) or band file prefix (PNG); also the cache key
    pub name: String,
    /// Top row of the extraction window in source pixels
    pub row: usize,
    /// Left column of the extraction window in source pixels
    pub col: usize,
    /// Side length of the returned patch
    pub side: usize,
    /// Zoom factor; the window covers `side / scale` source pixels
    pub scale: f64,
    /// Mirror the patch left to right
    pub flip: bool,
}

impl DatasetEntry {
    /// Side of the square source window, `floor(side / scale)`.
    pub fn window_size(&self) -> usize {
        (self.side as f64 / self.scale).floor() as usize
    }
}

/// What happens to decoded images that a reloaded catalog no longer references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheRetention {
    /// Keep every decoded image for the lifetime of the dataset
    #[default]
    RetainAll,
    /// Evict images the new catalog does not reference
    DropUnreferenced,
}

/// Configuration for a hyperspectral patch dataset
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Wavelengths decoded from every source image
    pub wavelengths: WavelengthRange,
    /// Cache policy applied after each reload
    pub cache_retention: CacheRetention,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            wavelengths: WavelengthRange::default(),
            cache_retention: CacheRetention::RetainAll,
        }
    }
}

impl DatasetConfig {
    pub fn builder() -> DatasetConfigBuilder {
        DatasetConfigBuilder::default()
    }
}

/// Builder for DatasetConfig
#[derive(Default)]
pub struct DatasetConfigBuilder {
    wavelengths: Option<WavelengthRange>,
    cache_retention: Option<CacheRetention>,
}

impl DatasetConfigBuilder {
    pub fn wavelengths(mut self, wavelengths: WavelengthRange) -> Self {
        self.wavelengths = Some(wavelengths);
        self
    }

    pub fn cache_retention(mut self, retention: CacheRetention) -> Self {
        self.cache_retention = Some(retention);
        self
    }

    pub fn build(self) -> DatasetConfig {
        let default = DatasetConfig::default();
        DatasetConfig {
            wavelengths: self.wavelengths.unwrap_or(default.wavelengths),
            cache_retention: self.cache_retention.unwrap_or(default.cache_retention),
        }
    }
}
