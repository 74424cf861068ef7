//! Error types for the inference stage.

use thiserror::Error;

use scorebatch_model::ModelError;

/// Errors raised while scoring a feature subset.
#[derive(Debug, Error)]
pub enum InferError {
    /// The model's prediction call failed on an apparently valid feature
    /// subset (dtype mismatch, unseen category, shape mismatch).
    #[error("model prediction failed: {source}")]
    Inference {
        #[source]
        source: ModelError,
    },

    /// The model returned a label vector that does not cover every row.
    #[error("model returned {actual} labels for {expected} rows")]
    LabelShape { expected: usize, actual: usize },

    /// The model returned a probability matrix that does not cover every row.
    #[error("model returned {actual} probability rows for {expected} input rows")]
    ProbabilityShape { expected: usize, actual: usize },

    /// The model artifact could not be loaded.
    #[error("model load failed: {source}")]
    Load {
        #[source]
        source: ModelError,
    },
}

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferError>;
