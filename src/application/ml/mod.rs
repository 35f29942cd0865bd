pub mod artifact_loader;
pub mod inference_service;

pub use artifact_loader::{ArtifactLoader, LoadedArtifacts};
pub use inference_service::{InferenceService, SERVICE_NAME};
