use std::path::Path;

use crate::hyperspectral::common::error::Result;
use crate::hyperspectral::spectral::{HyperspectralCube, WavelengthRange};

pub trait ImageDecoder {
    /// Decodes image `name` stored under `dir` into a cube with one channel per
    /// wavelength of `wavelengths`, in ascending order.
    fn decode(&self, dir: &Path, name: &str, wavelengths: &WavelengthRange) -> Result<HyperspectralCube>;
}
