//! Symmetric convolutional autoencoder.
//!
//! Layer layout for `layers = L`:
//!
//! ```text
//! encoder: conv(in -> out) [relu, conv(out -> out)] x (L - 1)
//! decoder: [relu, conv(out -> out)] x (L - 1), relu, conv(out -> in), relu
//! ```
//!
//! Parameter names follow the position of each convolution in its stage
//! (`encoder.0.weight`, `encoder.2.weight`, ..., `decoder.1.weight`, ...).

use ndarray::{Array4, ArrayView4, ArrayViewD};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::model::conv::Conv2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoencoderConfig {
    /// Patch height the network is built for
    pub height: usize,
    /// Patch width the network is built for
    pub width: usize,
    /// Spectral channels of the input and of the reconstruction
    pub in_channels: usize,
    /// Feature channels of every hidden layer
    pub out_channels: usize,
    /// Odd convolution kernel size
    pub filter_size: usize,
    /// Convolutions per stage
    pub layers: usize,
}

impl AutoencoderConfig {
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            self.height,
            self.width,
            self.in_channels,
            self.out_channels,
            self.filter_size,
            self.layers,
        ];
        if sizes.contains(&0) {
            return Err(HsiError::InvalidConfig(format!(
                "autoencoder sizes must be non-zero: {:?}",
                self
            )));
        }
        if self.filter_size % 2 == 0 {
            return Err(HsiError::InvalidConfig(format!(
                "filter size must be odd for same padding, got {}",
                self.filter_size
            )));
        }
        Ok(())
    }
}

fn relu(mut x: Array4<f32>) -> Array4<f32> {
    x.mapv_inplace(|v| v.max(0.0));
    x
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Autoencoder {
    config: AutoencoderConfig,
    encoder: Vec<Conv2d>,
    decoder: Vec<Conv2d>,
}

impl Autoencoder {
    pub fn new<R: Rng + ?Sized>(config: AutoencoderConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let AutoencoderConfig {
            in_channels,
            out_channels,
            filter_size,
            layers,
            ..
        } = config;

        let mut encoder = vec![Conv2d::new(in_channels, out_channels, filter_size, rng)?];
        for _ in 1..layers {
            encoder.push(Conv2d::new(out_channels, out_channels, filter_size, rng)?);
        }

        let mut decoder = Vec::with_capacity(layers);
        for _ in 1..layers {
            decoder.push(Conv2d::new(out_channels, out_channels, filter_size, rng)?);
        }
        decoder.push(Conv2d::new(out_channels, in_channels, filter_size, rng)?);

        debug!(?config, "Built autoencoder");
        Ok(Self {
            config,
            encoder,
            decoder,
        })
    }

    pub fn config(&self) -> &AutoencoderConfig {
        &self.config
    }

    fn check_input(&self, input: &ArrayView4<'_, f32>, channels: usize) -> Result<()> {
        let (_, c, h, w) = input.dim();
        if (c, h, w) != (channels, self.config.height, self.config.width) {
            return Err(HsiError::ShapeMismatch(format!(
                "expected (N, {}, {}, {}), got {:?}",
                channels,
                self.config.height,
                self.config.width,
                input.dim()
            )));
        }
        Ok(())
    }

    /// `(N, in, H, W) -> (N, out, H, W)` feature map.
    pub fn encode(&self, input: ArrayView4<'_, f32>) -> Result<Array4<f32>> {
        self.check_input(&input, self.config.in_channels)?;
        let (first, rest) = self.encoder.split_first().ok_or_else(|| {
            HsiError::InvalidConfig("encoder has no layers".to_string())
        })?;
        let mut x = first.forward(input)?;
        for conv in rest {
            x = conv.forward(relu(x).view())?;
        }
        Ok(x)
    }

    /// `(N, out, H, W) -> (N, in, H, W)`, nonnegative.
    pub fn decode(&self, code: ArrayView4<'_, f32>) -> Result<Array4<f32>> {
        self.check_input(&code, self.config.out_channels)?;
        let mut x = code.to_owned();
        for conv in &self.decoder {
            x = conv.forward(relu(x).view())?;
        }
        Ok(relu(x))
    }

    pub fn forward(&self, input: ArrayView4<'_, f32>) -> Result<Array4<f32>> {
        let code = self.encode(input)?;
        self.decode(code.view())
    }

    /// Every weight and bias tensor, named by stage and layer position.
    pub fn named_parameters(&self) -> Vec<(String, ArrayViewD<'_, f32>)> {
        let mut params = Vec::with_capacity(2 * (self.encoder.len() + self.decoder.len()));
        let stages = [("encoder", &self.encoder, 0), ("decoder", &self.decoder, 1)];
        for (stage, convs, first) in stages {
            for (i, conv) in convs.iter().enumerate() {
                let position = first + 2 * i;
                params.push((format!("{}.{}.weight", stage, position), conv.weight().into_dyn()));
                params.push((format!("{}.{}.bias", stage, position), conv.bias().into_dyn()));
            }
        }
        params
    }

    pub fn parameter_count(&self) -> usize {
        self.named_parameters().iter().map(|(_, p)| p.len()).sum()
    }
}
