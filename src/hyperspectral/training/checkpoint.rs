use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::model::Autoencoder;

/// State persisted between training sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingCheckpoint {
    pub epoch: usize,
    /// Best validation loss so far; must be finite to round-trip through JSON
    pub best_loss: f32,
    pub model: Autoencoder,
}

/// Writes a JSON checkpoint only when the caller reports an improvement,
/// unless `always_save` is set.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
    always_save: bool,
}

impl CheckpointStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            always_save: false,
        }
    }

    pub fn always_save(mut self, always_save: bool) -> Self {
        self.always_save = always_save;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether `state` was written.
    #[instrument(skip(self, state), fields(path = %self.path.display()))]
    pub fn save<T: Serialize>(&self, state: &T, is_best: bool) -> Result<bool> {
        if !is_best && !self.always_save {
            info!("Validation loss did not improve, checkpoint not saved");
            return Ok(false);
        }

        info!("Saving checkpoint");
        // Stage beside the target, then rename over it
        let staging = self.path.with_extension("partial");
        {
            let file = File::create(&staging).map_err(|e| {
                HsiError::OutputWriteError(format!("{}: {}", staging.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, state)
                .map_err(|e| HsiError::EncodeError(e.to_string()))?;
            writer.flush()?;
        }
        fs::rename(&staging, &self.path).map_err(|e| {
            HsiError::OutputWriteError(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(true)
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let file = File::open(&self.path).map_err(|e| {
            HsiError::InputReadError(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| HsiError::DecodeError(format!("{}: {}", self.path.display(), e)))
    }
}
