pub mod column_transformer;
pub mod file_artifacts;
pub mod smartcore_model;

pub use column_transformer::{
    CategoricalEncoding, ColumnTransformer, ColumnTransformerSpec, NumericScaling,
};
pub use file_artifacts::FileArtifactSource;
pub use smartcore_model::{ForestRegressor, SmartCoreModel};

use crate::domain::errors::ArtifactError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads an artifact file fully into memory.
pub(crate) fn read_artifact(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing {
            path: path.to_path_buf(),
        });
    }

    let mut file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(buffer)
}
