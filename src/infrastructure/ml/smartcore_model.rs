use super::read_artifact;
use crate::domain::errors::{ArtifactError, PredictionError};
use crate::domain::ports::PriceModel;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::Path;
use tracing::info;

pub type ForestRegressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Random forest regressor persisted with serde_json, together with the
/// number of input columns it was fitted on.
#[derive(Serialize, Deserialize)]
pub struct SmartCoreModel {
    n_features: usize,
    forest: ForestRegressor,
}

impl SmartCoreModel {
    pub fn new(forest: ForestRegressor, n_features: usize) -> Self {
        Self { n_features, forest }
    }

    /// Input width the forest was trained on
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let buffer = read_artifact(path)?;

        let model: SmartCoreModel =
            serde_json::from_slice(&buffer).map_err(|e| ArtifactError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("failed to deserialize ML model: {}", e),
            })?;

        info!(
            "Successfully loaded ML model from {:?} ({} input features)",
            path, model.n_features
        );
        Ok(model)
    }
}

impl PriceModel for SmartCoreModel {
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, PredictionError> {
        let Some(first) = features.first() else {
            return Ok(Vec::new());
        };
        let width = first.len();
        if width != self.n_features {
            return Err(PredictionError::internal(format!(
                "feature matrix has {} columns, model expects {}",
                width, self.n_features
            )));
        }
        if let Some(bad) = features.iter().position(|row| row.len() != width) {
            return Err(PredictionError::internal(format!(
                "ragged feature matrix: row {} has {} columns, expected {}",
                bad,
                features[bad].len(),
                width
            )));
        }

        let matrix = DenseMatrix::from_2d_vec(&features.to_vec())
            .map_err(|e| PredictionError::internal(format!("Matrix creation failed: {}", e)))?;

        let predictions = self
            .forest
            .predict(&matrix)
            .map_err(|e| PredictionError::internal(format!("Prediction failed: {}", e)))?;

        if predictions.len() != features.len() {
            return Err(PredictionError::internal(format!(
                "model returned {} predictions for {} rows",
                predictions.len(),
                features.len()
            )));
        }
        Ok(predictions)
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }
}
