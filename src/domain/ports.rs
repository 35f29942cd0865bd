use crate::domain::errors::{ArtifactError, PredictionError};
use crate::domain::ml::feature_registry::FeatureRow;
use std::path::Path;

/// Maps raw feature rows into the numeric space the model was trained on.
pub trait Preprocessor: Send + Sync {
    fn transform(&self, rows: &[FeatureRow<'_>]) -> Result<Vec<Vec<f64>>, PredictionError>;

    /// Width of each transformed row
    fn output_width(&self) -> usize;
}

/// Trained regression model.
pub trait PriceModel: Send + Sync {
    /// One estimate per input row, in input order.
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;
}

/// A model and the preprocessor it was fitted with. Only ever constructed as a pair.
pub struct ModelArtifacts {
    pub model: Box<dyn PriceModel>,
    pub preprocessor: Box<dyn Preprocessor>,
}

/// Where model artifacts come from.
pub trait ArtifactSource: Send + Sync {
    /// Read and deserialize both artifacts. Must not publish anything on failure.
    fn load(&self) -> Result<ModelArtifacts, ArtifactError>;

    fn model_path(&self) -> &Path;

    fn preprocessor_path(&self) -> &Path;
}
