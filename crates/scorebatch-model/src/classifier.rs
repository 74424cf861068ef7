//! The boundary trait for an externally trained binary classifier.

use polars::prelude::DataFrame;

use crate::error::Result;

/// Output of a scoring run: one label per input row and, when the model
/// supports probability estimation, one positive-class probability per row.
///
/// `probabilities` is `None` exactly when the model lacks the capability.
/// Missing probabilities are never represented as 0 or NaN.
#[derive(Debug, Clone)]
pub struct Scores {
    /// Discrete class labels, one of {0, 1} per row.
    pub labels: Vec<i64>,
    /// Positive-class probability per row, in [0, 1].
    pub probabilities: Option<Vec<f64>>,
}

/// An opaque, externally trained binary classifier.
///
/// The trait models the classifier as a capability set rather than a class
/// hierarchy: label prediction is mandatory, probability estimation and a
/// declared feature schema are optional capabilities probed at runtime.
/// Implementations are immutable after load and safe to share across
/// threads.
pub trait Classifier: Send + Sync {
    /// Predict one binary label (0 or 1) per row of the feature table.
    ///
    /// The feature table columns must match the model's training contract;
    /// a mismatch is a caller error surfaced through the returned error,
    /// never retried.
    fn predict(&self, features: &DataFrame) -> Result<Vec<i64>>;

    /// Class probabilities, shape (rows, 2) with the positive class at
    /// index 1. Returns `None` when the model does not expose probability
    /// estimation.
    fn predict_proba(&self, features: &DataFrame) -> Option<Result<Vec<[f64; 2]>>> {
        let _ = features;
        None
    }

    /// Ordered list of feature column names the model was trained on, or
    /// `None` when the artifact does not declare one.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}
