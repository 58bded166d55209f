//! Hyperspectral imaging pipeline module
//!
//! This module covers the data side of CASSI reconstruction: decoding spectral
//! cubes, serving catalog patches, simulating the coded-aperture sensor, the
//! CPU autoencoder with its training glue, and false-colour TIFF output.

pub mod common;
pub mod spectral;
pub mod decode;
pub mod cassi;
pub mod dataset;
pub mod model;
pub mod training;
pub mod visualize;

#[cfg(test)]
mod test_utils;

pub use common::{
    HsiError,
    Result,
};

pub use spectral::{
    HyperspectralCube,
    WavelengthRange,
};

pub use decode::{
    ExrDecoder,
    ImageDecoder,
    ImageFormat,
    PngDecoder,
};

pub use cassi::{
    CodedApertureMask,
    MaskBlock,
    generate_mask_block,
    image_formation,
    image_formation_adjoint,
};

pub use dataset::{
    CacheRetention,
    DatasetConfig,
    DatasetEntry,
    HyperspectralDataset,
};

pub use model::{
    Autoencoder,
    AutoencoderConfig,
};

pub use training::{
    CheckpointStore,
    TrainingCheckpoint,
    compute_loss,
    validate,
};

pub use visualize::{
    TiffCompression,
    TiffConfig,
    TiffExporter,
    spectral_color,
};
