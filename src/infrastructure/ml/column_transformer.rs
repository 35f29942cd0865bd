//! Fitted column transformer persisted as JSON.
//!
//! Output layout: standardized numeric columns in declared order, followed by
//! one one-hot block per categorical column. Unknown categories encode as all
//! zeros. Columns not named by any encoder are dropped.

use super::read_artifact;
use crate::domain::errors::{ArtifactError, PredictionError};
use crate::domain::ml::feature_registry::{
    FEATURE_COLUMNS, FeatureKind, FeatureRow, FeatureValue, column_index, column_names,
};
use crate::domain::ports::Preprocessor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericScaling {
    pub column: String,
    pub mean: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalEncoding {
    pub column: String,
    pub categories: Vec<String>,
}

/// On-disk form of the preprocessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTransformerSpec {
    /// Raw input columns, in the order the transformer was fitted on.
    pub columns: Vec<String>,
    #[serde(default)]
    pub numeric: Vec<NumericScaling>,
    #[serde(default)]
    pub categorical: Vec<CategoricalEncoding>,
}

#[derive(Debug, Clone)]
enum Step {
    Scale { index: usize, mean: f64, scale: f64 },
    OneHot { index: usize, categories: Vec<String> },
}

/// Preprocessor with every column resolved against the compile-time layout.
#[derive(Debug, Clone)]
pub struct ColumnTransformer {
    steps: Vec<Step>,
    width: usize,
}

impl ColumnTransformer {
    /// Checks the spec against `FEATURE_COLUMNS` and resolves column positions.
    pub fn compile(spec: ColumnTransformerSpec) -> Result<Self, ArtifactError> {
        let expected: Vec<&str> = column_names().collect();
        if spec.columns.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(mismatch(format!(
                "expected columns {:?}, artifact declares {:?}",
                expected, spec.columns
            )));
        }

        let mut seen = HashSet::new();
        let mut steps = Vec::with_capacity(spec.numeric.len() + spec.categorical.len());

        for scaling in spec.numeric {
            let index = resolve(&scaling.column, FeatureKind::Numeric, &mut seen)?;
            if !scaling.mean.is_finite() || !scaling.scale.is_finite() {
                return Err(mismatch(format!(
                    "non-finite scaling parameters for '{}'",
                    scaling.column
                )));
            }
            // Constant columns were fitted with zero variance.
            let scale = if scaling.scale == 0.0 { 1.0 } else { scaling.scale };
            steps.push(Step::Scale {
                index,
                mean: scaling.mean,
                scale,
            });
        }

        for encoding in spec.categorical {
            let index = resolve(&encoding.column, FeatureKind::Categorical, &mut seen)?;
            steps.push(Step::OneHot {
                index,
                categories: encoding.categories,
            });
        }

        if steps.is_empty() {
            return Err(mismatch("transformer encodes no columns".to_string()));
        }

        let width = steps
            .iter()
            .map(|step| match step {
                Step::Scale { .. } => 1,
                Step::OneHot { categories, .. } => categories.len(),
            })
            .sum();

        Ok(Self { steps, width })
    }

    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let buffer = read_artifact(path)?;
        let spec: ColumnTransformerSpec =
            serde_json::from_slice(&buffer).map_err(|e| ArtifactError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("failed to deserialize preprocessor: {}", e),
            })?;

        let transformer = Self::compile(spec)?;
        info!(
            "Successfully loaded preprocessor from {:?} ({} output features)",
            path, transformer.width
        );
        Ok(transformer)
    }

    fn transform_row(&self, row: &FeatureRow<'_>) -> Result<Vec<f64>, PredictionError> {
        let values = row.values();
        let mut out = Vec::with_capacity(self.width);

        for step in &self.steps {
            match step {
                Step::Scale { index, mean, scale } => match values[*index] {
                    FeatureValue::Numeric(v) => out.push((v - mean) / scale),
                    FeatureValue::Categorical(_) => {
                        return Err(kind_error(*index, FeatureKind::Numeric));
                    }
                },
                Step::OneHot { index, categories } => match values[*index] {
                    FeatureValue::Categorical(value) => {
                        out.extend(
                            categories
                                .iter()
                                .map(|c| if c == value { 1.0 } else { 0.0 }),
                        );
                    }
                    FeatureValue::Numeric(_) => {
                        return Err(kind_error(*index, FeatureKind::Categorical));
                    }
                },
            }
        }

        Ok(out)
    }
}

impl Preprocessor for ColumnTransformer {
    fn transform(&self, rows: &[FeatureRow<'_>]) -> Result<Vec<Vec<f64>>, PredictionError> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    fn output_width(&self) -> usize {
        self.width
    }
}

fn resolve(
    column: &str,
    kind: FeatureKind,
    seen: &mut HashSet<usize>,
) -> Result<usize, ArtifactError> {
    let index = column_index(column)
        .ok_or_else(|| mismatch(format!("unknown column '{}'", column)))?;
    let (_, actual) = FEATURE_COLUMNS[index];
    if actual != kind {
        return Err(mismatch(format!(
            "column '{}' is {:?}, encoder expects {:?}",
            column, actual, kind
        )));
    }
    if !seen.insert(index) {
        return Err(mismatch(format!("column '{}' is encoded twice", column)));
    }
    Ok(index)
}

fn mismatch(reason: String) -> ArtifactError {
    ArtifactError::SchemaMismatch { reason }
}

fn kind_error(index: usize, expected: FeatureKind) -> PredictionError {
    PredictionError::internal(format!(
        "column '{}' does not hold a {:?} value",
        FEATURE_COLUMNS[index].0, expected
    ))
}
