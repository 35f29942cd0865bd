use crate::domain::errors::PredictionError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

/// Transport-level error. Every variant renders as `{"detail": "..."}`.
#[derive(Debug)]
pub enum AppError {
    /// Artifacts are not loaded yet; the client may retry.
    ServiceUnavailable(String),
    /// The request body or one of its fields is invalid.
    InvalidRequest(StatusCode, String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvalidRequest(status, _) => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::ServiceUnavailable(msg) => msg,
            AppError::InvalidRequest(_, msg) => msg,
            AppError::Internal(msg) => {
                error!("Request failed: {}", msg);
                msg
            }
        };

        let body = Json(json!({
            "detail": message,
        }));

        (status, body).into_response()
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::Unavailable(e) => AppError::ServiceUnavailable(e.to_string()),
            e @ PredictionError::MalformedInput { .. } => {
                AppError::InvalidRequest(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            e @ PredictionError::Internal { .. } => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.status(), rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Inference task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ArtifactsUnavailable;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        let unavailable = AppError::from(PredictionError::from(ArtifactsUnavailable {
            reason: "missing".to_string(),
            model_path: PathBuf::from("m.json"),
            preprocessor_path: PathBuf::from("p.json"),
        }));
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let malformed = AppError::from(PredictionError::malformed("bathrooms", "zero"));
        assert_eq!(malformed.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let internal = AppError::from(PredictionError::internal("boom"));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
