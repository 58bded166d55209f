//! Coded aperture and sheared mask block.
//!
//! The physical mask is wider than the sensor by `channels - 1` columns so that
//! every dispersed copy still covers the sensor. Channel `i` sees the mask
//! shifted by `i - (channels - 1) / 2` columns (zero fill, no wrap), cropped to
//! the centred `width`-wide window starting at [`crop_start`].

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, s};
use rand::Rng;
use tracing::debug;

use crate::hyperspectral::common::error::{HsiError, Result};

/// Random binary aperture of shape `(height, width + channels - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CodedApertureMask {
    data: Array2<f32>,
}

impl CodedApertureMask {
    /// Draws every cell from Bernoulli(0.5), one `rng` draw per cell in
    /// row-major order. Seed `rng` for reproducible masks.
    pub fn random<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        channels: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if height == 0 || width == 0 || channels == 0 {
            return Err(HsiError::InvalidDimensions(format!(
                "mask needs non-zero height, width and channels (got {}x{}x{})",
                height, width, channels
            )));
        }
        let data = Array2::from_shape_fn((height, width + channels - 1), |_| {
            if rng.random_bool(0.5) { 1.0 } else { 0.0 }
        });
        Ok(Self { data })
    }

    /// Wraps an existing aperture pattern.
    pub fn from_array(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }
}

/// Per-channel sheared and cropped mask, shape `(channels, height, width)`.
/// Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBlock {
    data: Array3<f32>,
}

impl MaskBlock {
    /// Shears `mask` once per channel and crops each copy to `width` columns.
    pub fn from_mask(mask: &CodedApertureMask, width: usize, channels: usize) -> Result<Self> {
        if width == 0 || channels == 0 {
            return Err(HsiError::InvalidDimensions(format!(
                "mask block needs non-zero width and channels (got {}x{})",
                width, channels
            )));
        }
        let mask_width = width + channels - 1;
        if mask.width() != mask_width {
            return Err(HsiError::ShapeMismatch(format!(
                "mask is {} columns wide, expected width + channels - 1 = {}",
                mask.width(),
                mask_width
            )));
        }

        let start = crop_start(width, channels);
        if start + width > mask_width {
            return Err(HsiError::InvalidDimensions(format!(
                "crop window [{}, {}) does not fit a mask {} columns wide; use more channels",
                start,
                start + width,
                mask_width
            )));
        }

        let height = mask.height();
        let source = mask.view();
        let mut data = Array3::<f32>::zeros((channels, height, width));

        for channel in 0..channels {
            // Output column x reads mask column start + x - shift
            let offset = start as isize - channel_shift(channel, channels);
            let lo = (-offset).clamp(0, width as isize);
            let hi = (mask_width as isize - offset).clamp(0, width as isize);
            if lo >= hi {
                continue;
            }
            let (lo, hi) = (lo as usize, hi as usize);
            let src_lo = (lo as isize + offset) as usize;
            let src_hi = (hi as isize + offset) as usize;
            data.slice_mut(s![channel, .., lo..hi])
                .assign(&source.slice(s![.., src_lo..src_hi]));
        }

        debug!(channels, height, width, start, "Built mask block");
        Ok(Self { data })
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
}

/// Horizontal shift of channel `index`: `index - (channels - 1) / 2`.
pub fn channel_shift(index: usize, channels: usize) -> isize {
    index as isize - ((channels - 1) / 2) as isize
}

/// First mask column of the sensor window, `(width + channels + 1) / 2 - width / 2`
/// with truncating division, i.e. `ceil((width + channels) / 2) - floor(width / 2)`.
pub fn crop_start(width: usize, channels: usize) -> usize {
    (width + channels + 1) / 2 - width / 2
}

/// Generates a fresh random aperture and derives its mask block.
pub fn generate_mask_block<R: Rng + ?Sized>(
    height: usize,
    width: usize,
    channels: usize,
    rng: &mut R,
) -> Result<MaskBlock> {
    let mask = CodedApertureMask::random(height, width, channels, rng)?;
    MaskBlock::from_mask(&mask, width, channels)
}
