use super::{ColumnTransformer, SmartCoreModel};
use crate::config::ArtifactEnvConfig;
use crate::domain::errors::ArtifactError;
use crate::domain::ports::{ArtifactSource, ModelArtifacts, Preprocessor};
use std::path::{Path, PathBuf};

/// Loads the model and preprocessor from two JSON files on disk.
#[derive(Debug, Clone)]
pub struct FileArtifactSource {
    model_path: PathBuf,
    preprocessor_path: PathBuf,
}

impl FileArtifactSource {
    pub fn new(model_path: impl Into<PathBuf>, preprocessor_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            preprocessor_path: preprocessor_path.into(),
        }
    }

    pub fn from_config(config: &ArtifactEnvConfig) -> Self {
        Self::new(config.model_path.clone(), config.preprocessor_path.clone())
    }
}

impl ArtifactSource for FileArtifactSource {
    fn load(&self) -> Result<ModelArtifacts, ArtifactError> {
        // Preprocessor first: it is small and carries the schema check.
        let preprocessor = ColumnTransformer::from_file(&self.preprocessor_path)?;
        let model = SmartCoreModel::from_file(&self.model_path)?;

        if model.n_features() != preprocessor.output_width() {
            return Err(ArtifactError::SchemaMismatch {
                reason: format!(
                    "model expects {} input features but preprocessor {:?} produces {}",
                    model.n_features(),
                    self.preprocessor_path,
                    preprocessor.output_width()
                ),
            });
        }

        Ok(ModelArtifacts {
            model: Box::new(model),
            preprocessor: Box::new(preprocessor),
        })
    }

    fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn preprocessor_path(&self) -> &Path {
        &self.preprocessor_path
    }
}
