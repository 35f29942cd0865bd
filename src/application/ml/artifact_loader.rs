//! Lazy, retrying loader for the model/preprocessor pair.
//!
//! Artifacts are published at most once through a `OnceLock`, so readers see
//! either nothing or the complete pair. Load attempts are serialized by the
//! mutex that also holds the last failure diagnostic; concurrent first callers
//! wait for the in-flight attempt instead of reading the files again.

use crate::domain::errors::ArtifactsUnavailable;
use crate::domain::ports::{ArtifactSource, ModelArtifacts, Preprocessor, PriceModel};
use chrono::{DateTime, Local};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Instant;
use tracing::{info, warn};

/// Artifacts held in memory for the lifetime of the process.
pub struct LoadedArtifacts {
    artifacts: ModelArtifacts,
    loaded_at: DateTime<Local>,
}

impl LoadedArtifacts {
    pub fn model(&self) -> &dyn PriceModel {
        self.artifacts.model.as_ref()
    }

    pub fn preprocessor(&self) -> &dyn Preprocessor {
        self.artifacts.preprocessor.as_ref()
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }
}

pub struct ArtifactLoader {
    source: Box<dyn ArtifactSource>,
    artifacts: OnceLock<LoadedArtifacts>,
    last_error: Mutex<Option<String>>,
}

impl ArtifactLoader {
    pub fn new(source: Box<dyn ArtifactSource>) -> Self {
        Self {
            source,
            artifacts: OnceLock::new(),
            last_error: Mutex::new(None),
        }
    }

    /// Best-effort load. Never fails; on error the diagnostic is kept for
    /// `require_loaded` and `last_error`.
    pub fn ensure_loaded(&self) {
        if self.artifacts.get().is_some() {
            return;
        }

        let mut last_error = self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have published while we waited for the lock.
        if self.artifacts.get().is_some() {
            return;
        }

        let start = Instant::now();
        match self.source.load() {
            Ok(artifacts) => {
                let model_name = artifacts.model.name().to_string();
                let width = artifacts.preprocessor.output_width();
                let _ = self.artifacts.set(LoadedArtifacts {
                    artifacts,
                    loaded_at: Local::now(),
                });
                *last_error = None;
                info!(
                    "Model artifacts loaded in {:.2}ms: {} ({} input features)",
                    start.elapsed().as_secs_f64() * 1000.0,
                    model_name,
                    width
                );
            }
            Err(e) => {
                warn!("Model artifacts not available: {}", e);
                *last_error = Some(e.to_string());
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.artifacts.get().is_some()
    }

    /// Re-attempts the load, then hands out the artifacts or explains why not.
    pub fn require_loaded(&self) -> Result<&LoadedArtifacts, ArtifactsUnavailable> {
        self.ensure_loaded();
        self.artifacts.get().ok_or_else(|| ArtifactsUnavailable {
            reason: self
                .last_error()
                .unwrap_or_else(|| "artifacts have not been loaded".to_string()),
            model_path: self.source.model_path().to_path_buf(),
            preprocessor_path: self.source.preprocessor_path().to_path_buf(),
        })
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn loaded(&self) -> Option<&LoadedArtifacts> {
        self.artifacts.get()
    }
}
