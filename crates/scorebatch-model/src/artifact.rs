//! JSON model artifact: a logistic scorer exported from training.

use std::path::Path;

use polars::prelude::DataFrame;
use serde::Deserialize;
use tracing::info;

use crate::classifier::Classifier;
use crate::error::{ModelError, Result};
use crate::polars_utils::any_to_f64;

fn default_threshold() -> f64 {
    0.5
}

fn default_probability() -> bool {
    true
}

/// A binary logistic-regression scorer loaded from a JSON artifact.
///
/// The artifact carries the trained weight vector and intercept, the
/// decision threshold, and two optional capability declarations: the
/// ordered feature names the model was trained on, and whether the
/// exporting estimator supported probability estimation.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    /// Human-readable model name for logs and summaries.
    #[serde(default)]
    pub name: String,
    /// One weight per feature column, in training order.
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Positive-class probability above which a row is labeled 1.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Ordered feature names, when the exporter recorded them.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// Whether the exporting estimator exposed probability estimation.
    #[serde(default = "default_probability")]
    pub probability: bool,
}

impl LinearModel {
    /// Load a model artifact from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ModelError::ArtifactRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let model: Self = serde_json::from_str(&raw).map_err(|e| ModelError::ArtifactParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!(
            model = %model.name,
            features = model.weights.len(),
            probability = model.probability,
            "model artifact loaded"
        );
        Ok(model)
    }

    /// Parse a model artifact from a JSON string.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Positive-class probability for every row of the feature table.
    fn score_rows(&self, features: &DataFrame) -> Result<Vec<f64>> {
        if features.width() != self.weights.len() {
            return Err(ModelError::FeatureShape {
                expected: self.weights.len(),
                actual: features.width(),
            });
        }

        let columns = features.get_columns();
        let mut scores = Vec::with_capacity(features.height());
        for row in 0..features.height() {
            let mut z = self.intercept;
            for (col, weight) in columns.iter().zip(&self.weights) {
                let value = col.get(row)?;
                let x = any_to_f64(value).ok_or_else(|| ModelError::NonNumericFeature {
                    column: col.name().to_string(),
                    row,
                })?;
                z += weight * x;
            }
            scores.push(sigmoid(z));
        }
        Ok(scores)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LinearModel {
    fn predict(&self, features: &DataFrame) -> Result<Vec<i64>> {
        let scores = self.score_rows(features)?;
        Ok(scores
            .into_iter()
            .map(|p| i64::from(p >= self.threshold))
            .collect())
    }

    fn predict_proba(&self, features: &DataFrame) -> Option<Result<Vec<[f64; 2]>>> {
        if !self.probability {
            return None;
        }
        Some(
            self.score_rows(features)
                .map(|scores| scores.into_iter().map(|p| [1.0 - p, p]).collect()),
        )
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use std::io::Write;

    fn model_json(probability: bool) -> String {
        format!(
            r#"{{
                "name": "churn-v1",
                "weights": [2.0, -1.0],
                "intercept": 0.0,
                "threshold": 0.5,
                "feature_names": ["a", "b"],
                "probability": {probability}
            }}"#
        )
    }

    fn feature_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("a".into(), vec![2.0f64, -2.0]),
            Column::new("b".into(), vec![0.0f64, 0.0]),
        ])
        .unwrap()
    }

    #[test]
    fn predict_applies_threshold() {
        let model = LinearModel::from_json(&model_json(true)).unwrap();
        let labels = model.predict(&feature_frame()).unwrap();
        // z = 4 -> p ~ 0.982 -> 1; z = -4 -> p ~ 0.018 -> 0
        assert_eq!(labels, vec![1, 0]);
    }

    #[test]
    fn predict_proba_positive_class_at_index_one() {
        let model = LinearModel::from_json(&model_json(true)).unwrap();
        let matrix = model.predict_proba(&feature_frame()).unwrap().unwrap();
        assert_eq!(matrix.len(), 2);
        assert!(matrix[0][1] > 0.9);
        assert!((matrix[0][0] + matrix[0][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn probability_capability_can_be_absent() {
        let model = LinearModel::from_json(&model_json(false)).unwrap();
        assert!(model.predict_proba(&feature_frame()).is_none());
    }

    #[test]
    fn feature_shape_mismatch_is_an_error() {
        let model = LinearModel::from_json(&model_json(true)).unwrap();
        let narrow = DataFrame::new(vec![Column::new("a".into(), vec![1.0f64])]).unwrap();
        let err = model.predict(&narrow).unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureShape {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn non_numeric_feature_is_an_error() {
        let model = LinearModel::from_json(&model_json(true)).unwrap();
        let bad = DataFrame::new(vec![
            Column::new("a".into(), vec!["oops"]),
            Column::new("b".into(), vec![1.0f64]),
        ])
        .unwrap();
        let err = model.predict(&bad).unwrap_err();
        assert!(matches!(err, ModelError::NonNumericFeature { .. }));
    }

    #[test]
    fn from_path_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", model_json(true)).unwrap();
        let model = LinearModel::from_path(file.path()).unwrap();
        assert_eq!(model.name, "churn-v1");
        assert_eq!(model.feature_names().unwrap(), ["a", "b"]);
    }

    #[test]
    fn from_path_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = LinearModel::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ModelError::ArtifactParse { .. }));
    }
}
