use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading model artifacts from their source
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact file not found: {path:?}")]
    Missing { path: PathBuf },

    #[error("Failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt artifact {path:?}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Preprocessor schema mismatch: {reason}")]
    SchemaMismatch { reason: String },
}

/// Model artifacts could not be loaded. Retryable: the next request attempts
/// the load again.
#[derive(Debug, Clone, Error)]
#[error(
    "Model artifacts are not available. Expected files: {model_path:?} and {preprocessor_path:?}. Load error: {reason}"
)]
pub struct ArtifactsUnavailable {
    pub reason: String,
    pub model_path: PathBuf,
    pub preprocessor_path: PathBuf,
}

/// Errors surfaced by the inference pipeline
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Unavailable(#[from] ArtifactsUnavailable),

    #[error("Invalid input for '{field}': {reason}")]
    MalformedInput { field: String, reason: String },

    #[error("Inference failed: {reason}")]
    Internal { reason: String },
}

impl PredictionError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// True when the caller may retry the same request later and expect success.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_names_both_paths() {
        let error = ArtifactsUnavailable {
            reason: "No such file or directory".to_string(),
            model_path: PathBuf::from("models/trained/house_price_model.json"),
            preprocessor_path: PathBuf::from("models/trained/preprocessor.json"),
        };

        let msg = error.to_string();
        assert!(msg.contains("house_price_model.json"));
        assert!(msg.contains("preprocessor.json"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_only_unavailable_is_retryable() {
        let unavailable = PredictionError::from(ArtifactsUnavailable {
            reason: "missing".to_string(),
            model_path: PathBuf::from("m"),
            preprocessor_path: PathBuf::from("p"),
        });
        assert!(unavailable.is_retryable());
        assert!(!PredictionError::malformed("bathrooms", "must be > 0").is_retryable());
        assert!(!PredictionError::internal("boom").is_retryable());
    }

    #[test]
    fn test_malformed_input_formatting() {
        let error = PredictionError::malformed("bathrooms", "must be greater than 0");
        assert_eq!(
            error.to_string(),
            "Invalid input for 'bathrooms': must be greater than 0"
        );
    }
}
