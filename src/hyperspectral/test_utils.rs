//! Fixture writers shared by the decoder and dataset tests.

use std::path::Path;

use exr::prelude::*;
use image::{ImageBuffer, Luma};

use crate::hyperspectral::decode::exr_decoder_channel_name;
use crate::hyperspectral::decode::png_band_file_name;
use crate::hyperspectral::spectral::WavelengthRange;

/// Writes a HALF-precision EXR with one `w{nm}nm` channel per wavelength.
/// `value(channel, row, col)` supplies the samples.
pub fn write_exr_cube(
    dir: &Path,
    name: &str,
    range: &WavelengthRange,
    height: usize,
    width: usize,
    value: impl Fn(usize, usize, usize) -> f32,
) {
    let channels: Vec<AnyChannel<FlatSamples>> = range
        .wavelengths()
        .enumerate()
        .map(|(c, wavelength)| {
            let samples: Vec<f16> = (0..height * width)
                .map(|i| f16::from_f32(value(c, i / width, i % width)))
                .collect();
            AnyChannel::new(
                exr_decoder_channel_name(wavelength).as_str(),
                FlatSamples::F16(samples),
            )
        })
        .collect();

    let layer = Layer::new(
        (width, height),
        LayerAttributes::named("spectral"),
        Encoding::UNCOMPRESSED,
        AnyChannels::sort(channels.into()),
    );
    Image::from_layer(layer)
        .write()
        .to_file(dir.join(name))
        .unwrap();
}

/// Writes one 16-bit grayscale PNG per band of `range`.
/// `value(channel, row, col)` supplies the raw 16-bit pixels.
pub fn write_png_cube(
    dir: &Path,
    name: &str,
    range: &WavelengthRange,
    height: usize,
    width: usize,
    value: impl Fn(usize, usize, usize) -> u16,
) {
    for (c, wavelength) in range.wavelengths().enumerate() {
        let band: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
                Luma([value(c, y as usize, x as usize)])
            });
        band.save(dir.join(png_band_file_name(name, range.band_index(wavelength))))
            .unwrap();
    }
}
