//! Training utilities module
//!
//! Loss computation, validation on a random dataset batch and best-only
//! checkpoint persistence. The optimization loop itself lives with the caller.

mod checkpoint;
mod loss;
mod validate;

pub use checkpoint::{CheckpointStore, TrainingCheckpoint};
pub use loss::{compute_loss, mse, weight_penalty};
pub use validate::{stack_batch, validate};
