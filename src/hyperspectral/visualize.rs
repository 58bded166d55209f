//! Visualization module
//!
//! Wavelength-to-colour mapping, false-colour channel montages and 16-bit TIFF
//! output for cubes and simulated sensor frames.

mod color;
mod render;
mod writer;
mod standard_tiff_writer;
mod export;
pub mod types;


pub use color::spectral_color;
pub use render::{render_batch_channels, render_channels, grid_layout, measurement_to_gray};
pub use writer::TiffWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use export::TiffExporter;
pub use types::{GrayImageData, RgbImageData, TiffCompression, TiffConfig, TiffConfigBuilder};
