//! Image buffers and TIFF output configuration

use std::str::FromStr;

use crate::hyperspectral::common::error::HsiError;

/// Single-channel 16-bit image, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct GrayImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Pixel data
    pub data: Vec<u16>,
}

/// 16-bit RGB image, interleaved [R, G, B, R, G, B, ...]
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Pixel data
    pub data: Vec<u16>,
}

impl RgbImageData {
    pub fn pixel(&self, x: usize, y: usize) -> [u16; 3] {
        let i = 3 * (y * self.width + x);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

impl FromStr for TiffCompression {
    type Err = HsiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(TiffCompression::None),
            "lzw" => Ok(TiffCompression::Lzw),
            "deflate-fast" => Ok(TiffCompression::DeflateFast),
            "deflate" | "deflate-balanced" => Ok(TiffCompression::DeflateBalanced),
            "deflate-best" => Ok(TiffCompression::DeflateBest),
            other => Err(HsiError::InvalidConfig(format!(
                "unknown TIFF compression '{}'",
                other
            ))),
        }
    }
}

/// Configuration for TIFF output
#[derive(Debug, Clone)]
pub struct TiffConfig {
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    pub predictor: Option<u16>,
}

impl Default for TiffConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
        }
    }
}

impl TiffConfig {
    pub fn builder() -> TiffConfigBuilder {
        TiffConfigBuilder::default()
    }
}

/// Builder for TiffConfig
#[derive(Default)]
pub struct TiffConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
}

impl TiffConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> TiffConfig {
        let default = TiffConfig::default();
        TiffConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}
