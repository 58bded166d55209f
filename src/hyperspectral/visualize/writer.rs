use std::io::Write;

use crate::hyperspectral::common::error::Result;
use crate::hyperspectral::visualize::types::{GrayImageData, RgbImageData, TiffConfig};

pub trait TiffWriter {
    fn write_tiff(&self, image: &GrayImageData, output: &mut dyn Write, config: &TiffConfig) -> Result<()>;
    fn write_rgb_tiff(&self, image: &RgbImageData, output: &mut dyn Write, config: &TiffConfig) -> Result<()>;
}
