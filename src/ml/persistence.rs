use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::ml::predictors::{LinearRiskRegressor, TreeEnsembleRegressor};

/// File name of the persisted tree-ensemble artifact
const TREE_ENSEMBLE_FILE: &str = "tree_ensemble.bin";

/// File name of the persisted linear-regressor artifact
const LINEAR_FILE: &str = "linear.bin";

/// Best-effort file store for trained model artifacts.
///
/// Two named blobs in a fixed directory, loaded at startup when present and
/// overwritten on successful (re)training. The in-memory models stay
/// authoritative: every failure here is non-fatal for serving.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn tree_path(&self) -> PathBuf {
        self.dir.join(TREE_ENSEMBLE_FILE)
    }

    fn linear_path(&self) -> PathBuf {
        self.dir.join(LINEAR_FILE)
    }

    /// Load both persisted artifacts. Errors if either is missing or
    /// undecodable; the caller falls through to bootstrap training.
    pub fn load(&self) -> Result<(TreeEnsembleRegressor, LinearRiskRegressor)> {
        let tree = Self::read_blob(&self.tree_path())?;
        let linear = Self::read_blob(&self.linear_path())?;
        Ok((tree, linear))
    }

    /// Persist both artifacts, returning the first error. Callers log and
    /// continue serving the in-memory models on failure.
    pub fn save(
        &self,
        tree: &TreeEnsembleRegressor,
        linear: &LinearRiskRegressor,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Self::write_blob(&self.tree_path(), tree)?;
        Self::write_blob(&self.linear_path(), linear)?;
        Ok(())
    }

    fn read_blob<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
        let bytes = fs::read(path)?;
        bincode::deserialize(&bytes).map_err(|e| {
            AppError::Serialization(format!("Failed to decode {}: {e}", path.display()))
        })
    }

    fn write_blob<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
        let bytes = bincode::serialize(value).map_err(|e| {
            AppError::Serialization(format!("Failed to encode {}: {e}", path.display()))
        })?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
