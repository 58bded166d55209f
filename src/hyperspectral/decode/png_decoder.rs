//! Spectral image reader for per-band 16-bit PNG sequences.
//!
//! Each wavelength band lives in its own grayscale file named
//! `{name}_{band:02}.png` with a 1-based band number (the layout of the CAVE
//! dataset). Pixel values are normalized by `u16::MAX` into `[0, 1]`.

use std::path::Path;

use ndarray::{Array3, ArrayViewMut2, Axis};
use tracing::debug;

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::decode::decoder::ImageDecoder;
use crate::hyperspectral::spectral::{HyperspectralCube, WavelengthRange};

pub struct PngDecoder;

/// File name of band `band` (1-based) of image `name`.
pub(crate) fn band_file_name(name: &str, band: usize) -> String {
    format!("{}_{:02}.png", name, band)
}

fn read_band(path: &Path) -> Result<image::ImageBuffer<image::Luma<u16>, Vec<u16>>> {
    if !path.is_file() {
        return Err(HsiError::InputReadError(format!(
            "{}: file not found",
            path.display()
        )));
    }
    let decoded = image::open(path)
        .map_err(|e| HsiError::DecodeError(format!("{}: {}", path.display(), e)))?;
    Ok(decoded.into_luma16())
}

fn fill_band(mut band: ArrayViewMut2<'_, f32>, pixels: &[u16]) {
    let scale = u16::MAX as f32;
    for (value, &pixel) in band.iter_mut().zip(pixels) {
        *value = pixel as f32 / scale;
    }
}

impl ImageDecoder for PngDecoder {
    fn decode(&self, dir: &Path, name: &str, wavelengths: &WavelengthRange) -> Result<HyperspectralCube> {
        // Band 1 fixes the image size for the whole sequence
        let first = read_band(&dir.join(band_file_name(name, 1)))?;
        let (width, height) = (first.width() as usize, first.height() as usize);
        debug!("PNG sequence {}: {}x{}", name, width, height);

        let mut cube = Array3::<f32>::zeros((wavelengths.channel_count(), height, width));

        for (index, wavelength) in wavelengths.wavelengths().enumerate() {
            let band = wavelengths.band_index(wavelength);
            let path = dir.join(band_file_name(name, band));
            let pixels = if band == 1 { first.clone() } else { read_band(&path)? };

            if pixels.width() as usize != width || pixels.height() as usize != height {
                return Err(HsiError::DecodeError(format!(
                    "{}: band is {}x{}, expected {}x{}",
                    path.display(),
                    pixels.width(),
                    pixels.height(),
                    width,
                    height
                )));
            }

            fill_band(cube.index_axis_mut(Axis(0), index), pixels.as_raw());
        }

        Ok(HyperspectralCube::new(cube))
    }
}
