use std::io::{Cursor, Write};

use tiff::encoder::colortype::{ColorType, Gray16, RGB16};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::visualize::types::{GrayImageData, RgbImageData, TiffCompression, TiffConfig};
use crate::hyperspectral::visualize::writer::TiffWriter;

pub struct StandardTiffWriter;

fn compression(config: &TiffConfig) -> Compression {
    match config.compression {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    }
}

fn encode<C: ColorType<Inner = u16>>(
    width: usize,
    height: usize,
    data: &[u16],
    output: &mut dyn Write,
    config: &TiffConfig,
) -> Result<()> {
    let mut buffer = Vec::new();

    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
        .map_err(|e| HsiError::EncodeError(e.to_string()))?
        .with_compression(compression(config));

    if let Some(predictor_val) = config.predictor {
        let predictor = match predictor_val {
            2 => Predictor::Horizontal,
            _ => Predictor::None,
        };
        encoder = encoder.with_predictor(predictor);
    }

    encoder
        .write_image::<C>(width as u32, height as u32, data)
        .map_err(|e| HsiError::EncodeError(e.to_string()))?;

    output.write_all(&buffer)?;
    Ok(())
}

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, image: &GrayImageData, output: &mut dyn Write, config: &TiffConfig) -> Result<()> {
        debug!("Encoding gray TIFF image: {}x{}", image.width, image.height);
        encode::<Gray16>(image.width, image.height, &image.data, output, config)?;
        debug!("TIFF encoding complete");
        Ok(())
    }

    fn write_rgb_tiff(&self, image: &RgbImageData, output: &mut dyn Write, config: &TiffConfig) -> Result<()> {
        debug!("Encoding RGB TIFF image: {}x{}", image.width, image.height);
        encode::<RGB16>(image.width, image.height, &image.data, output, config)?;
        debug!("TIFF encoding complete");
        Ok(())
    }
}
