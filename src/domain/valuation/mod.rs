// Request/response contract of the prediction service
pub mod types;

pub use types::{
    CONFIDENCE_BAND, HealthResponse, PredictionRequest, PredictionResponse, ServiceInfo,
    confidence_interval, round_to_cents,
};
