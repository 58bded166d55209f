//! Spectral data types
//!
//! Wavelength sampling and the in-memory hyperspectral cube shared by the
//! decoders, the dataset and the CASSI simulator.

pub mod types;

pub use types::{HyperspectralCube, WavelengthRange};
