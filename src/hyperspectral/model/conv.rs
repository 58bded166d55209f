use ndarray::{Array1, Array4, ArrayView1, ArrayView4, s};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hyperspectral::common::error::{HsiError, Result};

/// Stride-1 2D cross-correlation with zero "same" padding and a per-output bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conv2d {
    /// Kernel weights, `(out_channels, in_channels, k, k)`
    weight: Array4<f32>,
    /// Per-output-channel bias
    bias: Array1<f32>,
}

impl Conv2d {
    /// Uniform initialization in `±1/sqrt(in_channels * k * k)`.
    pub fn new<R: Rng + ?Sized>(
        in_channels: usize,
        out_channels: usize,
        kernel_size: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if in_channels == 0 || out_channels == 0 || kernel_size == 0 {
            return Err(HsiError::InvalidConfig(format!(
                "convolution needs non-zero sizes (in={}, out={}, k={})",
                in_channels, out_channels, kernel_size
            )));
        }
        let bound = 1.0 / ((in_channels * kernel_size * kernel_size) as f32).sqrt();
        let weight = Array4::from_shape_fn(
            (out_channels, in_channels, kernel_size, kernel_size),
            |_| rng.random_range(-bound..=bound),
        );
        let bias = Array1::from_shape_fn(out_channels, |_| rng.random_range(-bound..=bound));
        Self::from_parts(weight, bias)
    }

    pub fn from_parts(weight: Array4<f32>, bias: Array1<f32>) -> Result<Self> {
        let (out_channels, _, kh, kw) = weight.dim();
        if kh != kw || kh % 2 == 0 {
            return Err(HsiError::InvalidConfig(format!(
                "kernel must be square with odd size, got {}x{}",
                kh, kw
            )));
        }
        if bias.len() != out_channels {
            return Err(HsiError::ShapeMismatch(format!(
                "bias has {} entries for {} output channels",
                bias.len(),
                out_channels
            )));
        }
        Ok(Self { weight, bias })
    }

    pub fn in_channels(&self) -> usize {
        self.weight.dim().1
    }

    pub fn out_channels(&self) -> usize {
        self.weight.dim().0
    }

    pub fn kernel_size(&self) -> usize {
        self.weight.dim().2
    }

    pub fn weight(&self) -> ArrayView4<'_, f32> {
        self.weight.view()
    }

    pub fn bias(&self) -> ArrayView1<'_, f32> {
        self.bias.view()
    }

    /// `(N, in, H, W) -> (N, out, H, W)`.
    pub fn forward(&self, input: ArrayView4<'_, f32>) -> Result<Array4<f32>> {
        let (batch, in_channels, height, width) = input.dim();
        if in_channels != self.in_channels() {
            return Err(HsiError::ShapeMismatch(format!(
                "convolution expects {} input channels, got {}",
                self.in_channels(),
                in_channels
            )));
        }

        let k = self.kernel_size();
        let pad = (k - 1) / 2;
        let mut padded = Array4::<f32>::zeros((batch, in_channels, height + 2 * pad, width + 2 * pad));
        padded
            .slice_mut(s![.., .., pad..pad + height, pad..pad + width])
            .assign(&input);

        let mut output = Array4::<f32>::zeros((batch, self.out_channels(), height, width));
        for b in 0..batch {
            for co in 0..self.out_channels() {
                let mut plane = output.slice_mut(s![b, co, .., ..]);
                plane.fill(self.bias[co]);
                for ci in 0..in_channels {
                    for ky in 0..k {
                        for kx in 0..k {
                            let tap = self.weight[[co, ci, ky, kx]];
                            plane.scaled_add(tap, &padded.slice(s![b, ci, ky..ky + height, kx..kx + width]));
                        }
                    }
                }
            }
        }
        Ok(output)
    }
}
