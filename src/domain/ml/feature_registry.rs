use crate::domain::errors::PredictionError;
use crate::domain::valuation::PredictionRequest;

/// How a column is fed to the preprocessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Numeric,
    Categorical,
}

/// Number of raw columns handed to the preprocessor.
pub const FEATURE_COUNT: usize = 9;

/// Ordered column layout of a raw feature row.
/// This order MUST match the column list the preprocessor artifact was fitted on;
/// the artifact loader rejects preprocessors that declare anything else.
pub const FEATURE_COLUMNS: &[(&str, FeatureKind)] = &[
    ("sqft", FeatureKind::Numeric),
    ("bedrooms", FeatureKind::Numeric),
    ("bathrooms", FeatureKind::Numeric),
    ("location", FeatureKind::Categorical),
    ("year_built", FeatureKind::Numeric),
    ("condition", FeatureKind::Categorical),
    ("house_age", FeatureKind::Numeric),
    ("bed_bath_ratio", FeatureKind::Numeric),
    ("price_per_sqft", FeatureKind::Numeric),
];

/// Position of a column in the raw feature row.
pub fn column_index(name: &str) -> Option<usize> {
    FEATURE_COLUMNS.iter().position(|(column, _)| *column == name)
}

/// Column names in layout order.
pub fn column_names() -> impl Iterator<Item = &'static str> {
    FEATURE_COLUMNS.iter().map(|(name, _)| *name)
}

/// A single raw cell, before preprocessing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Numeric(f64),
    Categorical(&'a str),
}

/// Features computed from the request and the evaluation date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub house_age: i32,
    pub bed_bath_ratio: f64,
    /// Reserved for compatibility with the training-time column set. Always 0.
    pub price_per_sqft: f64,
}

impl DerivedFeatures {
    pub fn compute(
        request: &PredictionRequest,
        current_year: i32,
    ) -> Result<Self, PredictionError> {
        if request.bathrooms == 0.0 {
            return Err(PredictionError::malformed(
                "bathrooms",
                "must be non-zero to compute bed_bath_ratio",
            ));
        }

        let bed_bath_ratio = f64::from(request.bedrooms) / request.bathrooms;
        if !bed_bath_ratio.is_finite() {
            return Err(PredictionError::malformed(
                "bathrooms",
                format!("bed_bath_ratio is not finite ({})", bed_bath_ratio),
            ));
        }

        Ok(Self {
            house_age: current_year - request.year_built,
            bed_bath_ratio,
            price_per_sqft: 0.0,
        })
    }
}

/// One request plus its derived features, laid out as `FEATURE_COLUMNS`.
#[derive(Debug, Clone)]
pub struct FeatureRow<'a> {
    request: &'a PredictionRequest,
    derived: DerivedFeatures,
}

impl<'a> FeatureRow<'a> {
    pub fn assemble(
        request: &'a PredictionRequest,
        current_year: i32,
    ) -> Result<Self, PredictionError> {
        let derived = DerivedFeatures::compute(request, current_year)?;
        Ok(Self { request, derived })
    }

    pub fn derived(&self) -> &DerivedFeatures {
        &self.derived
    }

    pub fn values(&self) -> [FeatureValue<'a>; FEATURE_COUNT] {
        let r = self.request;
        [
            FeatureValue::Numeric(r.sqft),
            FeatureValue::Numeric(f64::from(r.bedrooms)),
            FeatureValue::Numeric(r.bathrooms),
            FeatureValue::Categorical(r.location.as_str()),
            FeatureValue::Numeric(f64::from(r.year_built)),
            FeatureValue::Categorical(r.condition.as_str()),
            FeatureValue::Numeric(f64::from(self.derived.house_age)),
            FeatureValue::Numeric(self.derived.bed_bath_ratio),
            FeatureValue::Numeric(self.derived.price_per_sqft),
        ]
    }
}
