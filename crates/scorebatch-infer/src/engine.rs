//! The inference engine: labels always, probabilities when available.

use polars::prelude::DataFrame;
use tracing::{debug, info};

use scorebatch_model::{Classifier, Scores};

use crate::error::{InferError, Result};

/// Score every row of the validated feature subset.
///
/// Label prediction must succeed; a failure is surfaced as
/// [`InferError::Inference`] with the underlying cause and is never
/// retried. Probability estimation runs only when the model exposes the
/// capability; of the (rows, 2) matrix only the positive-class column
/// (index 1) is retained. A model without the capability yields
/// `probabilities: None`, never a placeholder of 0 or NaN.
pub fn predict(model: &dyn Classifier, features: &DataFrame) -> Result<Scores> {
    let rows = features.height();

    let labels = model
        .predict(features)
        .map_err(|source| InferError::Inference { source })?;
    if labels.len() != rows {
        return Err(InferError::LabelShape {
            expected: rows,
            actual: labels.len(),
        });
    }

    let probabilities = match model.predict_proba(features) {
        Some(result) => {
            let matrix = result.map_err(|source| InferError::Inference { source })?;
            if matrix.len() != rows {
                return Err(InferError::ProbabilityShape {
                    expected: rows,
                    actual: matrix.len(),
                });
            }
            Some(matrix.into_iter().map(|classes| classes[1]).collect())
        }
        None => {
            debug!("model exposes no probability estimation");
            None
        }
    };

    info!(
        rows,
        with_probabilities = probabilities.is_some(),
        "batch inference complete"
    );
    Ok(Scores {
        labels,
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use scorebatch_model::ModelError;

    struct StubModel {
        labels: Vec<i64>,
        matrix: Option<Vec<[f64; 2]>>,
        fail: bool,
    }

    impl Classifier for StubModel {
        fn predict(
            &self,
            _features: &DataFrame,
        ) -> std::result::Result<Vec<i64>, ModelError> {
            if self.fail {
                return Err(ModelError::FeatureShape {
                    expected: 2,
                    actual: 1,
                });
            }
            Ok(self.labels.clone())
        }

        fn predict_proba(
            &self,
            _features: &DataFrame,
        ) -> Option<std::result::Result<Vec<[f64; 2]>, ModelError>> {
            self.matrix.clone().map(Ok)
        }
    }

    fn features(rows: usize) -> DataFrame {
        let values: Vec<f64> = (0..rows).map(|i| i as f64).collect();
        DataFrame::new(vec![Column::new("x".into(), values)]).unwrap()
    }

    #[test]
    fn positive_class_column_is_retained() {
        let model = StubModel {
            labels: vec![1, 0],
            matrix: Some(vec![[0.1, 0.9], [0.8, 0.2]]),
            fail: false,
        };
        let scores = predict(&model, &features(2)).unwrap();
        assert_eq!(scores.labels, vec![1, 0]);
        assert_eq!(scores.probabilities, Some(vec![0.9, 0.2]));
    }

    #[test]
    fn absent_capability_yields_none_not_zero() {
        let model = StubModel {
            labels: vec![0, 1],
            matrix: None,
            fail: false,
        };
        let scores = predict(&model, &features(2)).unwrap();
        assert!(scores.probabilities.is_none());
    }

    #[test]
    fn prediction_failure_is_wrapped() {
        let model = StubModel {
            labels: vec![],
            matrix: None,
            fail: true,
        };
        let err = predict(&model, &features(2)).unwrap_err();
        assert!(matches!(err, InferError::Inference { .. }));
    }

    #[test]
    fn short_label_vector_is_rejected() {
        let model = StubModel {
            labels: vec![1],
            matrix: None,
            fail: false,
        };
        let err = predict(&model, &features(3)).unwrap_err();
        assert!(matches!(
            err,
            InferError::LabelShape {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn short_probability_matrix_is_rejected() {
        let model = StubModel {
            labels: vec![0, 0],
            matrix: Some(vec![[0.5, 0.5]]),
            fail: false,
        };
        let err = predict(&model, &features(2)).unwrap_err();
        assert!(matches!(err, InferError::ProbabilityShape { .. }));
    }
}
