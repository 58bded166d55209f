//! Spectral image reader for multi-channel OpenEXR files.
//!
//! Each wavelength band is stored as a separate channel named `w{wavelength}nm`
//! (the layout of the KAIST hyperspectral dataset). Samples are rounded through
//! half precision regardless of how they are stored, so cubes decoded from EXR
//! carry the precision of the HALF pixel type they were stored in.

use std::path::Path;

use exr::meta::attribute::Text;
use exr::prelude::*;
use ndarray::{Array3, Axis};
use tracing::debug;

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::decode::decoder::ImageDecoder;
use crate::hyperspectral::spectral::{HyperspectralCube, WavelengthRange};

pub struct ExrDecoder;

/// Channel name under which a wavelength band is stored.
pub(crate) fn channel_name(wavelength: u32) -> String {
    format!("w{}nm", wavelength)
}

impl ImageDecoder for ExrDecoder {
    fn decode(&self, dir: &Path, name: &str, wavelengths: &WavelengthRange) -> Result<HyperspectralCube> {
        let path = dir.join(name);
        debug!("Decoding EXR image {}", path.display());

        if !path.is_file() {
            return Err(HsiError::InputReadError(format!(
                "{}: file not found",
                path.display()
            )));
        }

        let image = read()
            .no_deep_data()
            .largest_resolution_level()
            .all_channels()
            .first_valid_layer()
            .all_attributes()
            .from_file(&path)
            .map_err(|e| HsiError::DecodeError(format!("{}: {}", path.display(), e)))?;

        // The display window is inclusive, so its extent is max + 1 along each axis
        let window = image.attributes.display_window;
        let ncols = (window.position.0 + window.size.0 as i32).max(0) as usize;
        let nrows = (window.position.1 + window.size.1 as i32).max(0) as usize;
        if nrows == 0 || ncols == 0 {
            return Err(HsiError::DecodeError(format!(
                "{}: empty display window",
                path.display()
            )));
        }

        debug!("EXR display window: {}x{}", ncols, nrows);

        let channels = &image.layer_data.channel_data.list;
        let mut cube = Array3::<f32>::zeros((wavelengths.channel_count(), nrows, ncols));

        for (index, wavelength) in wavelengths.wavelengths().enumerate() {
            let wanted = Text::from(channel_name(wavelength).as_str());
            let channel = channels
                .iter()
                .find(|channel| channel.name == wanted)
                .ok_or_else(|| {
                    HsiError::DecodeError(format!(
                        "{}: missing channel {}",
                        path.display(),
                        channel_name(wavelength)
                    ))
                })?;

            let samples = &channel.sample_data;
            if samples.len() != nrows * ncols {
                return Err(HsiError::DecodeError(format!(
                    "{}: channel {} holds {} samples, expected {}x{}",
                    path.display(),
                    channel_name(wavelength),
                    samples.len(),
                    nrows,
                    ncols
                )));
            }

            let mut band = cube.index_axis_mut(Axis(0), index);
            for (flat, value) in band.iter_mut().enumerate() {
                *value = samples.value_by_flat_index(flat).to_f16().to_f32();
            }
        }

        Ok(HyperspectralCube::new(cube))
    }
}
