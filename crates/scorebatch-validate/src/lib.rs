//! Feature-schema validation.
//!
//! Resolves the feature subset a classifier expects from a loaded dataset.
//! A model that declares feature names gets exactly those columns, in
//! declaration order; a model without a declared schema gets the whole
//! dataset.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use thiserror::Error;
use tracing::debug;

use scorebatch_model::{Classifier, ScoreFrame};

/// Errors raised while checking a dataset against a model's contract.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Declared feature columns are absent from the input.
    ///
    /// `missing` lists the absent names in the model's declaration order so
    /// the message is deterministic and reproducible.
    #[error("input is missing required feature columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The input has no columns at all.
    #[error("input '{source_name}' has no feature columns")]
    NoColumns { source_name: String },

    /// Column selection failed after the presence check passed.
    #[error("feature selection failed: {message}")]
    Selection { message: String },
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;

/// Resolve the feature subset the model expects from the loaded dataset.
///
/// When the model declares no feature list, the entire dataset is the
/// feature set and the only check is that at least one column exists.
/// Otherwise the dataset must contain every declared column; the result is
/// the dataset restricted to exactly the declared columns in the model's
/// declared order, since column order passed to the model must match what
/// it was trained on.
pub fn resolve_features(model: &dyn Classifier, frame: &ScoreFrame) -> Result<DataFrame> {
    let Some(declared) = model.feature_names() else {
        if frame.column_count() == 0 {
            return Err(ValidateError::NoColumns {
                source_name: frame.source.clone(),
            });
        }
        debug!(
            file = %frame.source,
            columns = frame.column_count(),
            "model declares no feature schema; using full dataset"
        );
        return Ok(frame.data.clone());
    };

    let present: BTreeSet<&str> = frame
        .data
        .get_column_names()
        .into_iter()
        .map(|n| n.as_str())
        .collect();

    let missing: Vec<String> = declared
        .iter()
        .filter(|name| !present.contains(name.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ValidateError::MissingColumns { missing });
    }

    let features = frame
        .data
        .select(declared.iter().map(String::as_str))
        .map_err(|e| ValidateError::Selection {
            message: e.to_string(),
        })?;
    debug!(
        file = %frame.source,
        features = features.width(),
        "feature subset resolved in declaration order"
    );
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use scorebatch_model::{Classifier, ModelError};

    struct FakeModel {
        features: Option<Vec<String>>,
    }

    impl Classifier for FakeModel {
        fn predict(&self, features: &DataFrame) -> std::result::Result<Vec<i64>, ModelError> {
            Ok(vec![0; features.height()])
        }

        fn feature_names(&self) -> Option<&[String]> {
            self.features.as_deref()
        }
    }

    fn frame() -> ScoreFrame {
        let df = DataFrame::new(vec![
            Column::new("b".into(), vec![1i64, 2]),
            Column::new("a".into(), vec![3i64, 4]),
            Column::new("segment".into(), vec!["x", "y"]),
        ])
        .unwrap();
        ScoreFrame::new("input.csv", df)
    }

    #[test]
    fn no_declared_schema_uses_full_dataset() {
        let model = FakeModel { features: None };
        let features = resolve_features(&model, &frame()).unwrap();
        assert_eq!(features.width(), 3);
        assert_eq!(features.height(), 2);
    }

    #[test]
    fn declared_order_wins_over_dataset_order() {
        let model = FakeModel {
            features: Some(vec!["a".to_string(), "b".to_string()]),
        };
        let features = resolve_features(&model, &frame()).unwrap();
        let names: Vec<&str> = features
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn missing_columns_reported_in_declaration_order() {
        let model = FakeModel {
            features: Some(vec![
                "z_last".to_string(),
                "a".to_string(),
                "a_first".to_string(),
            ]),
        };
        let err = resolve_features(&model, &frame()).unwrap_err();
        match err {
            ValidateError::MissingColumns { missing } => {
                // Declaration order, not alphabetical order.
                assert_eq!(missing, vec!["z_last", "a_first"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_dataset_without_schema_is_rejected() {
        let model = FakeModel { features: None };
        let empty = ScoreFrame::new("empty.csv", DataFrame::empty());
        let err = resolve_features(&model, &empty).unwrap_err();
        assert!(matches!(err, ValidateError::NoColumns { .. }));
    }
}
