//! Error types for the model boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by classifier artifacts.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read the model artifact file.
    #[error("failed to read model artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact file is not a valid model description.
    #[error("failed to parse model artifact {path}: {source}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The feature table width does not match the trained weight vector.
    #[error("model expects {expected} feature columns, got {actual}")]
    FeatureShape { expected: usize, actual: usize },

    /// A feature cell could not be interpreted as a number.
    #[error("non-numeric value in feature column '{column}' at row {row}")]
    NonNumericFeature { column: String, row: usize },

    /// Underlying DataFrame access failed.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ModelError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
