//! On-disk encodings of spectral images

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::hyperspectral::common::error::HsiError;

/// Storage format declared by the catalog `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// One multi-channel floating-point EXR file, channels named `w{nm}nm`
    Exr,
    /// One 16-bit PNG per band, named `{name}_{band:02}.png`
    Png,
}

impl FromStr for ImageFormat {
    type Err = HsiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exr" => Ok(ImageFormat::Exr),
            "png" => Ok(ImageFormat::Png),
            other => Err(HsiError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Exr => write!(f, "exr"),
            ImageFormat::Png => write!(f, "png"),
        }
    }
}
