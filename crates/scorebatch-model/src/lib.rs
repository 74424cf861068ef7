//! Shared data model for the scorebatch pipeline.
//!
//! This crate defines the types that flow between pipeline stages:
//!
//! - [`ScoreFrame`]: a named tabular dataset backed by a Polars `DataFrame`
//! - [`Classifier`]: the boundary trait for an externally trained binary
//!   classifier with optional probability and feature-schema capabilities
//! - [`LinearModel`]: a JSON-serialized logistic scorer implementing
//!   [`Classifier`]
//! - Polars `AnyValue` conversion helpers shared by ingest, report and
//!   output stages

mod artifact;
mod classifier;
mod error;
mod frame;
pub mod polars_utils;

pub use artifact::LinearModel;
pub use classifier::{Classifier, Scores};
pub use error::{ModelError, Result};
pub use frame::ScoreFrame;

/// Column name appended for the discrete prediction.
pub const PREDICTION_COLUMN: &str = "prediction";

/// Column name appended for the positive-class probability.
pub const PROBABILITY_COLUMN: &str = "probability_positive";

/// Column name appended for the human-readable label.
pub const LABEL_COLUMN: &str = "prediction_label";

/// Optional input column used for per-segment aggregation.
pub const SEGMENT_COLUMN: &str = "segment";

/// Display label for the positive class (label 1).
pub const POSITIVE_LABEL: &str = "positive";

/// Display label for the negative class (label 0).
pub const NEGATIVE_LABEL: &str = "negative";
