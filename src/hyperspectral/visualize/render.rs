use ndarray::{ArrayView2, ArrayView3, ArrayView4, Axis};

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::visualize::color::spectral_color;
use crate::hyperspectral::visualize::types::{GrayImageData, RgbImageData};

/// Panel grid `(rows, columns)` for a montage of `channels` panels.
pub fn grid_layout(channels: usize) -> (usize, usize) {
    (4, channels / 4 + 1)
}

fn to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16
}

/// Maps `band` linearly onto `[0, 1]`; a constant band maps to 0.
fn normalizer(band: ArrayView2<'_, f32>) -> impl Fn(f32) -> f32 + use<> {
    let (lo, hi) = band
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = hi - lo;
    move |v| if range > 0.0 { (v - lo) / range } else { 0.0 }
}

/// False-colour montage of a `(C, H, W)` cube: each channel is stretched to its
/// own value range and tinted with the colour of `wavelengths[c]`. Panels fill
/// a 4-row grid row by row.
pub fn render_channels(cube: ArrayView3<'_, f32>, wavelengths: &[f32]) -> Result<RgbImageData> {
    let (channels, height, width) = cube.dim();
    if wavelengths.len() < channels {
        return Err(HsiError::ShapeMismatch(format!(
            "{} wavelengths for {} channels",
            wavelengths.len(),
            channels
        )));
    }
    if channels == 0 || height == 0 || width == 0 {
        return Err(HsiError::InvalidDimensions(format!(
            "cannot render an empty cube {:?}",
            cube.dim()
        )));
    }

    let (rows, cols) = grid_layout(channels);
    let (out_width, out_height) = (cols * width, rows * height);
    let mut data = vec![0u16; 3 * out_width * out_height];

    for (c, band) in cube.axis_iter(Axis(0)).enumerate() {
        let color = spectral_color(wavelengths[c]);
        let norm = normalizer(band);
        let (top, left) = ((c / cols) * height, (c % cols) * width);
        for ((y, x), &v) in band.indexed_iter() {
            let t = norm(v);
            let offset = 3 * ((top + y) * out_width + left + x);
            for k in 0..3 {
                data[offset + k] = to_u16(t * color[k]);
            }
        }
    }

    Ok(RgbImageData {
        width: out_width,
        height: out_height,
        data,
    })
}

/// [`render_channels`] for a single-item `(1, C, H, W)` batch.
pub fn render_batch_channels(cube: ArrayView4<'_, f32>, wavelengths: &[f32]) -> Result<RgbImageData> {
    if cube.dim().0 != 1 {
        return Err(HsiError::ShapeMismatch(format!(
            "expected a batch of one, got {:?}",
            cube.dim()
        )));
    }
    render_channels(cube.index_axis(Axis(0), 0), wavelengths)
}

/// Stretches a `(1, 1, H, W)` sensor frame to the full 16-bit range.
pub fn measurement_to_gray(measurement: ArrayView4<'_, f32>) -> Result<GrayImageData> {
    let (batch, channels, height, width) = measurement.dim();
    if (batch, channels) != (1, 1) {
        return Err(HsiError::ShapeMismatch(format!(
            "expected a (1, 1, H, W) measurement, got {:?}",
            measurement.dim()
        )));
    }

    let frame = measurement.slice(ndarray::s![0, 0, .., ..]);
    let norm = normalizer(frame);
    Ok(GrayImageData {
        width,
        height,
        data: frame.iter().map(|&v| to_u16(norm(v))).collect(),
    })
}
