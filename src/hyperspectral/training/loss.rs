use ndarray::ArrayView4;

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::model::Autoencoder;

/// Mean squared error over every element.
pub fn mse(output: ArrayView4<'_, f32>, target: ArrayView4<'_, f32>) -> Result<f32> {
    if output.dim() != target.dim() {
        return Err(HsiError::ShapeMismatch(format!(
            "output {:?} vs target {:?}",
            output.dim(),
            target.dim()
        )));
    }
    if output.is_empty() {
        return Err(HsiError::ShapeMismatch("empty batch".to_string()));
    }
    let sum: f32 = output
        .iter()
        .zip(target.iter())
        .map(|(o, t)| (o - t) * (o - t))
        .sum();
    Ok(sum / output.len() as f32)
}

/// Sum of squared L2 norms of every `*weight*` parameter; biases are not penalized.
pub fn weight_penalty(model: &Autoencoder) -> f32 {
    model
        .named_parameters()
        .iter()
        .filter(|(name, _)| name.contains("weight"))
        .map(|(_, param)| param.iter().map(|w| w * w).sum::<f32>())
        .sum()
}

/// `0.5 * mse(output, target) + lambda * weight_penalty(model)`.
pub fn compute_loss(
    output: ArrayView4<'_, f32>,
    target: ArrayView4<'_, f32>,
    lambda: f32,
    model: &Autoencoder,
) -> Result<f32> {
    Ok(0.5 * mse(output, target)? + lambda * weight_penalty(model))
}
