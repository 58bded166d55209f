//! Convolutional autoencoder module
//!
//! A CPU implementation of the reconstruction network: a stack of same-padded
//! convolutions that encodes a spectral patch into a wider feature map and
//! decodes it back to the input channels.

mod conv;
mod autoencoder;

pub use conv::Conv2d;
pub use autoencoder::{Autoencoder, AutoencoderConfig};
