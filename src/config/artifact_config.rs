//! Model artifact locations.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "models/trained/house_price_model.json";
pub const DEFAULT_PREPROCESSOR_PATH: &str = "models/trained/preprocessor.json";

/// Artifact environment configuration
#[derive(Debug, Clone)]
pub struct ArtifactEnvConfig {
    pub model_path: PathBuf,
    pub preprocessor_path: PathBuf,
}

impl Default for ArtifactEnvConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            preprocessor_path: PathBuf::from(DEFAULT_PREPROCESSOR_PATH),
        }
    }
}

impl ArtifactEnvConfig {
    pub fn from_env() -> Self {
        Self {
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH)),
            preprocessor_path: env::var("PREPROCESSOR_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PREPROCESSOR_PATH)),
        }
    }
}
