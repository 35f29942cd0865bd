use super::artifact_loader::{ArtifactLoader, LoadedArtifacts};
use crate::domain::errors::PredictionError;
use crate::domain::ml::feature_registry::{FEATURE_COUNT, FeatureRow};
use crate::domain::ports::ArtifactSource;
use crate::domain::valuation::{HealthResponse, PredictionRequest, PredictionResponse, ServiceInfo};
use chrono::{DateTime, Datelike, Local};
use std::collections::HashMap;
use tracing::{debug, error};
use uuid::Uuid;

pub const SERVICE_NAME: &str = "House Price Prediction API";

/// Prediction operations over lazily loaded artifacts.
pub struct InferenceService {
    loader: ArtifactLoader,
}

impl InferenceService {
    pub fn new(source: Box<dyn ArtifactSource>) -> Self {
        Self {
            loader: ArtifactLoader::new(source),
        }
    }

    pub fn loader(&self) -> &ArtifactLoader {
        &self.loader
    }

    /// Always healthy; doubles as a warm-up probe for the artifacts.
    pub fn health_check(&self) -> HealthResponse {
        self.loader.ensure_loaded();
        HealthResponse::healthy(self.loader.is_loaded())
    }

    pub fn predict_one(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        self.predict_one_at(request, Local::now())
    }

    /// `predict_one` evaluated as of `now`.
    pub fn predict_one_at(
        &self,
        request: &PredictionRequest,
        now: DateTime<Local>,
    ) -> Result<PredictionResponse, PredictionError> {
        let artifacts = self.loader.require_loaded()?;
        request.validate(now.year())?;

        let predictions = self.run_pipeline(artifacts, std::slice::from_ref(request), now)?;
        let raw = predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::internal("No prediction returned"))?;

        Ok(PredictionResponse::from_estimate(raw, now))
    }

    /// Raw, unrounded estimates for every request, in order.
    pub fn predict_batch(
        &self,
        requests: &[PredictionRequest],
    ) -> Result<Vec<f64>, PredictionError> {
        self.predict_batch_at(requests, Local::now())
    }

    pub fn predict_batch_at(
        &self,
        requests: &[PredictionRequest],
        now: DateTime<Local>,
    ) -> Result<Vec<f64>, PredictionError> {
        let artifacts = self.loader.require_loaded()?;
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        for (i, request) in requests.iter().enumerate() {
            request.validate(now.year()).map_err(|e| match e {
                PredictionError::MalformedInput { field, reason } => {
                    PredictionError::malformed(format!("[{}].{}", i, field), reason)
                }
                other => other,
            })?;
        }

        self.run_pipeline(artifacts, requests, now)
    }

    pub fn service_info(&self) -> ServiceInfo {
        self.loader.ensure_loaded();
        let loaded = self.loader.loaded();

        let endpoints = [
            ("health", "/health"),
            ("predict", "/predict (POST)"),
            ("batch_predict", "/batch-predict (POST)"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>();

        ServiceInfo {
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model_loaded: loaded.is_some(),
            model_name: loaded.map(|a| a.model().name().to_string()),
            loaded_at: loaded.map(LoadedArtifacts::loaded_at),
            last_load_error: self.loader.last_error(),
            endpoints,
        }
    }

    /// Derive features, then one transform call and one predict call for the whole batch.
    fn run_pipeline(
        &self,
        artifacts: &LoadedArtifacts,
        requests: &[PredictionRequest],
        now: DateTime<Local>,
    ) -> Result<Vec<f64>, PredictionError> {
        let request_id = Uuid::new_v4();
        let current_year = now.year();

        let rows = requests
            .iter()
            .map(|request| FeatureRow::assemble(request, current_year))
            .collect::<Result<Vec<_>, _>>()?;

        let features = artifacts.preprocessor().transform(&rows).inspect_err(|e| {
            error!(
                %request_id,
                rows = rows.len(),
                columns = FEATURE_COUNT,
                model_loaded = self.loader.is_loaded(),
                "Preprocessing failed: {}", e
            );
        })?;

        let predictions = artifacts.model().predict(&features).inspect_err(|e| {
            error!(
                %request_id,
                rows = features.len(),
                columns = artifacts.preprocessor().output_width(),
                model = artifacts.model().name(),
                "Prediction failed: {}", e
            );
        })?;

        debug!(%request_id, rows = predictions.len(), "Prediction complete");
        Ok(predictions)
    }
}
