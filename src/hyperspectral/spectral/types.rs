use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

use crate::hyperspectral::common::error::{HsiError, Result};

/// Discrete wavelength sampling in nanometres, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavelengthRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Default for WavelengthRange {
    fn default() -> Self {
        Self {
            min: 400,
            max: 700,
            step: 10,
        }
    }
}

impl WavelengthRange {
    pub fn new(min: u32, max: u32, step: u32) -> Result<Self> {
        let range = Self { min, max, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(HsiError::InvalidConfig(
                "wavelength step must be positive".to_string(),
            ));
        }
        if self.max < self.min {
            return Err(HsiError::InvalidConfig(format!(
                "wavelength range is empty: {}..={} nm",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Number of sampled bands, `(max - min) / step + 1`.
    pub fn channel_count(&self) -> usize {
        ((self.max - self.min) / self.step) as usize + 1
    }

    /// Wavelengths in ascending order.
    pub fn wavelengths(&self) -> impl Iterator<Item = u32> + use<> {
        (self.min..=self.max).step_by(self.step as usize)
    }

    /// 1-based band number used by per-band file sequences.
    pub fn band_index(&self, wavelength: u32) -> usize {
        ((wavelength - self.min) / self.step + 1) as usize
    }
}

/// A decoded spectral image in (channel, row, column) order.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperspectralCube {
    data: Array3<f32>,
}

impl HyperspectralCube {
    pub fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    pub fn channels(&self) -> usize {
        self.data.dim().0
    }

    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    pub fn view(&self) -> ArrayView3<'_, f32> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array3<f32> {
        self.data
    }

    /// Memory held by the sample buffer.
    pub fn nbytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }
}
