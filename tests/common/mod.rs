#![allow(dead_code)]

use house_price_api::application::ml::InferenceService;
use house_price_api::domain::ml::feature_registry::{FeatureRow, column_names};
use house_price_api::domain::ports::Preprocessor;
use house_price_api::domain::valuation::PredictionRequest;
use house_price_api::infrastructure::ml::{
    CategoricalEncoding, ColumnTransformer, ColumnTransformerSpec, FileArtifactSource,
    NumericScaling, SmartCoreModel,
};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::PathBuf;
use tempfile::TempDir;

const TRAINING_YEAR: i32 = 2024;
const LOCATIONS: [&str; 5] = ["urban", "suburban", "rural", "waterfront", "mountain"];
const CONDITIONS: [&str; 4] = ["Poor", "Fair", "Good", "Excellent"];

pub fn sample_request() -> PredictionRequest {
    PredictionRequest {
        sqft: 1800.0,
        bedrooms: 3,
        bathrooms: 2.0,
        location: "suburban".to_string(),
        year_built: 2000,
        condition: "Good".to_string(),
    }
}

pub fn preprocessor_spec() -> ColumnTransformerSpec {
    let scale = |column: &str, mean: f64, scale: f64| NumericScaling {
        column: column.to_string(),
        mean,
        scale,
    };
    let encode = |column: &str, categories: &[&str]| CategoricalEncoding {
        column: column.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
    };

    ColumnTransformerSpec {
        columns: column_names().map(str::to_string).collect(),
        numeric: vec![
            scale("sqft", 2000.0, 800.0),
            scale("bedrooms", 3.0, 1.0),
            scale("bathrooms", 2.0, 0.75),
            scale("house_age", 40.0, 20.0),
            scale("bed_bath_ratio", 1.5, 0.5),
            scale("price_per_sqft", 0.0, 0.0),
        ],
        categorical: vec![encode("location", &LOCATIONS[..]), encode("condition", &CONDITIONS[..])],
    }
}

fn fit(x: &Vec<Vec<f64>>, y: &Vec<f64>) -> SmartCoreModel {
    let matrix = DenseMatrix::from_2d_vec(x).unwrap();
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(10)
        .with_max_depth(6)
        .with_min_samples_split(2);
    let forest = RandomForestRegressor::fit(&matrix, y, params).unwrap();
    SmartCoreModel::new(forest, x[0].len())
}

/// Fits a small forest on synthetic houses in the preprocessor's output space.
fn fitted_model() -> SmartCoreModel {
    let transformer = ColumnTransformer::compile(preprocessor_spec()).unwrap();

    let houses: Vec<PredictionRequest> = (0..60usize)
        .map(|i| PredictionRequest {
            sqft: 800.0 + 50.0 * i as f64,
            bedrooms: 1 + (i % 5) as u32,
            bathrooms: 1.0 + 0.5 * (i % 4) as f64,
            location: LOCATIONS[i % LOCATIONS.len()].to_string(),
            year_built: 1950 + i as i32,
            condition: CONDITIONS[i % CONDITIONS.len()].to_string(),
        })
        .collect();
    let rows: Vec<FeatureRow<'_>> = houses
        .iter()
        .map(|house| FeatureRow::assemble(house, TRAINING_YEAR).unwrap())
        .collect();

    let x = transformer.transform(&rows).unwrap();
    let y: Vec<f64> = houses
        .iter()
        .map(|h| 50_000.0 + 150.0 * h.sqft + 10_000.0 * f64::from(h.bedrooms))
        .collect();

    fit(&x, &y)
}

/// A forest trained on `width` unrelated columns.
fn model_with_width(width: usize) -> SmartCoreModel {
    let x: Vec<Vec<f64>> = (0..30)
        .map(|i| (0..width).map(|j| ((i * (j + 1)) % 7) as f64).collect())
        .collect();
    let y: Vec<f64> = (0..30).map(|i| 100_000.0 + 1_000.0 * i as f64).collect();
    fit(&x, &y)
}

/// A temporary artifact directory that starts empty.
pub struct ArtifactFixture {
    dir: TempDir,
}

impl ArtifactFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.path().join("house_price_model.json")
    }

    pub fn preprocessor_path(&self) -> PathBuf {
        self.dir.path().join("preprocessor.json")
    }

    pub fn source(&self) -> FileArtifactSource {
        FileArtifactSource::new(self.model_path(), self.preprocessor_path())
    }

    pub fn service(&self) -> InferenceService {
        InferenceService::new(Box::new(self.source()))
    }

    /// Writes both artifacts, as a training job or a volume mount would.
    pub fn install(&self) {
        std::fs::write(
            self.preprocessor_path(),
            serde_json::to_vec_pretty(&preprocessor_spec()).unwrap(),
        )
        .unwrap();
        std::fs::write(
            self.model_path(),
            serde_json::to_vec(&fitted_model()).unwrap(),
        )
        .unwrap();
    }

    /// Replaces the model with one fitted on a different number of columns.
    pub fn write_model_with_width(&self, width: usize) {
        self.write_model_bytes(&serde_json::to_vec(&model_with_width(width)).unwrap());
    }

    pub fn write_preprocessor(&self, spec: &ColumnTransformerSpec) {
        std::fs::write(self.preprocessor_path(), serde_json::to_vec(spec).unwrap()).unwrap();
    }

    pub fn write_model_bytes(&self, bytes: &[u8]) {
        std::fs::write(self.model_path(), bytes).unwrap();
    }

    pub fn remove(&self) {
        let _ = std::fs::remove_file(self.model_path());
        let _ = std::fs::remove_file(self.preprocessor_path());
    }
}
