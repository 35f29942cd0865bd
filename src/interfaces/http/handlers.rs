use super::error::AppError;
use crate::application::ml::InferenceService;
use crate::domain::errors::PredictionError;
use crate::domain::valuation::{HealthResponse, PredictionRequest, PredictionResponse, ServiceInfo};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use std::sync::Arc;

pub type SharedService = Arc<InferenceService>;

/// Artifact loading and inference are synchronous; keep them off the async workers.
async fn blocking<T, F>(service: &SharedService, f: F) -> Result<T, AppError>
where
    F: FnOnce(&InferenceService) -> Result<T, PredictionError> + Send + 'static,
    T: Send + 'static,
{
    let service = Arc::clone(service);
    let result = tokio::task::spawn_blocking(move || f(&service)).await?;
    Ok(result?)
}

pub async fn root(State(service): State<SharedService>) -> Result<Json<ServiceInfo>, AppError> {
    let info = blocking(&service, |s| Ok(s.service_info())).await?;
    Ok(Json(info))
}

pub async fn health(
    State(service): State<SharedService>,
) -> Result<Json<HealthResponse>, AppError> {
    let health = blocking(&service, |s| Ok(s.health_check())).await?;
    Ok(Json(health))
}

pub async fn predict(
    State(service): State<SharedService>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, AppError> {
    let Json(request) = payload?;
    let response = blocking(&service, move |s| s.predict_one(&request)).await?;
    Ok(Json(response))
}

pub async fn batch_predict(
    State(service): State<SharedService>,
    payload: Result<Json<Vec<PredictionRequest>>, JsonRejection>,
) -> Result<Json<Vec<f64>>, AppError> {
    let Json(requests) = payload?;
    let predictions = blocking(&service, move |s| s.predict_batch(&requests)).await?;
    Ok(Json(predictions))
}
