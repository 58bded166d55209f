use ndarray::{Array3, Array4, Axis};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::dataset::HyperspectralDataset;
use crate::hyperspectral::decode::ImageDecoder;
use crate::hyperspectral::model::Autoencoder;
use crate::hyperspectral::training::loss::compute_loss;

/// Loads the patches at `indices` and stacks them into `(N, C, side, side)`.
pub fn stack_batch<E: ImageDecoder, P: ImageDecoder>(
    dataset: &HyperspectralDataset<E, P>,
    indices: &[usize],
) -> Result<Array4<f32>> {
    let patches = indices
        .iter()
        .map(|&index| dataset.get(index))
        .collect::<Result<Vec<Array3<f32>>>>()?;
    let views: Vec<_> = patches.iter().map(|p| p.view()).collect();
    ndarray::stack(Axis(0), &views)
        .map_err(|e| HsiError::ShapeMismatch(format!("patches cannot be batched: {}", e)))
}

/// Reconstruction loss of `model` on up to `batch_size` distinct random patches.
#[instrument(skip(model, dataset, rng), fields(entries = dataset.len()))]
pub fn validate<E: ImageDecoder, P: ImageDecoder, R: Rng + ?Sized>(
    model: &Autoencoder,
    dataset: &HyperspectralDataset<E, P>,
    lambda: f32,
    batch_size: usize,
    rng: &mut R,
) -> Result<f32> {
    if dataset.is_empty() || batch_size == 0 {
        return Err(HsiError::InvalidConfig(format!(
            "validation needs a non-empty dataset and batch (entries={}, batch_size={})",
            dataset.len(),
            batch_size
        )));
    }

    let mut indices: Vec<usize> = (0..dataset.len()).collect();
    indices.shuffle(rng);
    indices.truncate(batch_size);

    let batch = stack_batch(dataset, &indices)?;
    let output = model.forward(batch.view())?;
    let loss = compute_loss(output.view(), batch.view(), lambda, model)?;
    debug!(?indices, loss, "Validation batch");
    Ok(loss)
}
