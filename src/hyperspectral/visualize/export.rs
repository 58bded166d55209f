use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::ArrayView4;
use tracing::{info, instrument};

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::visualize::render::{measurement_to_gray, render_batch_channels};
use crate::hyperspectral::visualize::standard_tiff_writer::StandardTiffWriter;
use crate::hyperspectral::visualize::types::TiffConfig;
use crate::hyperspectral::visualize::writer::TiffWriter;

/// Renders simulation arrays and writes them as TIFF files.
pub struct TiffExporter<W: TiffWriter> {
    writer: W,
    config: TiffConfig,
}

impl TiffExporter<StandardTiffWriter> {
    pub fn new(config: TiffConfig) -> Self {
        Self {
            writer: StandardTiffWriter,
            config,
        }
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .map_err(|e| HsiError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
    Ok(BufWriter::new(file))
}

impl<W: TiffWriter> TiffExporter<W> {
    pub fn with_custom(writer: W, config: TiffConfig) -> Self {
        Self { writer, config }
    }

    /// Writes a `(1, 1, H, W)` measurement as a stretched Gray16 TIFF.
    #[instrument(skip(self, measurement, output))]
    pub fn write_measurement(&self, measurement: ArrayView4<'_, f32>, output: &mut dyn Write) -> Result<()> {
        let image = {
            let _span = tracing::info_span!("render_measurement").entered();
            measurement_to_gray(measurement)?
        };
        {
            let _span = tracing::info_span!("encode_tiff", width = image.width, height = image.height).entered();
            self.writer.write_tiff(&image, output, &self.config)?;
        }
        Ok(())
    }

    /// Writes the false-colour montage of a `(1, C, H, W)` cube as an RGB16 TIFF.
    #[instrument(skip(self, cube, wavelengths, output), fields(channels = cube.dim().1))]
    pub fn write_channels(
        &self,
        cube: ArrayView4<'_, f32>,
        wavelengths: &[f32],
        output: &mut dyn Write,
    ) -> Result<()> {
        let image = {
            let _span = tracing::info_span!("render_channels").entered();
            render_batch_channels(cube, wavelengths)?
        };
        {
            let _span = tracing::info_span!("encode_tiff", width = image.width, height = image.height).entered();
            self.writer.write_rgb_tiff(&image, output, &self.config)?;
        }
        Ok(())
    }

    pub fn export_measurement<P: AsRef<Path>>(&self, measurement: ArrayView4<'_, f32>, path: P) -> Result<()> {
        let path = path.as_ref();
        info!(output = %path.display(), "Writing measurement");
        let mut output = create_output(path)?;
        self.write_measurement(measurement, &mut output)?;
        output.flush()?;
        Ok(())
    }

    pub fn export_channels<P: AsRef<Path>>(
        &self,
        cube: ArrayView4<'_, f32>,
        wavelengths: &[f32],
        path: P,
    ) -> Result<()> {
        let path = path.as_ref();
        info!(output = %path.display(), "Writing channel montage");
        let mut output = create_output(path)?;
        self.write_channels(cube, wavelengths, &mut output)?;
        output.flush()?;
        Ok(())
    }

    pub fn config(&self) -> &TiffConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TiffConfig) {
        self.config = config;
    }
}
