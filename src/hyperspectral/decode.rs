//! Spectral image decoding module
//!
//! This module turns a catalog reference (directory + name) into a
//! [`HyperspectralCube`](crate::hyperspectral::HyperspectralCube). Each on-disk
//! encoding has its own [`ImageDecoder`] implementation, selected through
//! [`ImageFormat`].

mod decoder;
mod exr_decoder;
mod png_decoder;
pub mod types;


pub use decoder::ImageDecoder;
pub use exr_decoder::ExrDecoder;
pub use png_decoder::PngDecoder;
pub use types::ImageFormat;

#[cfg(test)]
pub(crate) use exr_decoder::channel_name as exr_decoder_channel_name;
#[cfg(test)]
pub(crate) use png_decoder::band_file_name as png_band_file_name;
