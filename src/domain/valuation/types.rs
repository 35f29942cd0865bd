use crate::domain::errors::PredictionError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Relative half-width of the heuristic confidence band (±10%).
pub const CONFIDENCE_BAND: f64 = 0.10;

/// Oldest construction year accepted by validation.
pub const MIN_YEAR_BUILT: i32 = 1800;

/// Attributes of the house to price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub sqft: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub location: String,
    pub year_built: i32,
    pub condition: String,
}

impl PredictionRequest {
    /// Structural and range checks. Everything rejected here is a client error.
    pub fn validate(&self, current_year: i32) -> Result<(), PredictionError> {
        if !self.sqft.is_finite() || self.sqft <= 0.0 {
            return Err(PredictionError::malformed(
                "sqft",
                format!("must be a positive number, got {}", self.sqft),
            ));
        }
        if self.bedrooms == 0 {
            return Err(PredictionError::malformed("bedrooms", "must be at least 1"));
        }
        if !self.bathrooms.is_finite() || self.bathrooms <= 0.0 {
            return Err(PredictionError::malformed(
                "bathrooms",
                format!("must be greater than 0, got {}", self.bathrooms),
            ));
        }
        if self.year_built < MIN_YEAR_BUILT || self.year_built > current_year {
            return Err(PredictionError::malformed(
                "year_built",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_YEAR_BUILT, current_year, self.year_built
                ),
            ));
        }
        if self.location.trim().is_empty() {
            return Err(PredictionError::malformed("location", "must not be empty"));
        }
        if self.condition.trim().is_empty() {
            return Err(PredictionError::malformed("condition", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
    pub confidence_interval: [f64; 2],
    pub features_importance: HashMap<String, f64>,
    pub prediction_time: DateTime<Local>,
}

impl PredictionResponse {
    /// Shapes a raw model output into the response contract.
    pub fn from_estimate(raw_price: f64, prediction_time: DateTime<Local>) -> Self {
        let predicted_price = round_to_cents(raw_price);
        Self {
            predicted_price,
            confidence_interval: confidence_interval(predicted_price),
            features_importance: HashMap::new(),
            prediction_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

impl HealthResponse {
    pub fn healthy(model_loaded: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            model_loaded,
        }
    }
}

/// Service metadata served on the root route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub model_loaded: bool,
    pub model_name: Option<String>,
    pub loaded_at: Option<DateTime<Local>>,
    pub last_load_error: Option<String>,
    pub endpoints: HashMap<String, String>,
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// `[round(p * 0.9), round(p * 1.1)]`, ordered lower bound first.
pub fn confidence_interval(price: f64) -> [f64; 2] {
    let a = round_to_cents(price * (1.0 - CONFIDENCE_BAND));
    let b = round_to_cents(price * (1.0 + CONFIDENCE_BAND));
    if a <= b { [a, b] } else { [b, a] }
}
