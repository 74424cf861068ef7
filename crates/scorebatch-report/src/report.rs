//! Enriched report construction by row-position alignment.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use thiserror::Error;
use tracing::info;

use scorebatch_model::{
    LABEL_COLUMN, NEGATIVE_LABEL, POSITIVE_LABEL, PREDICTION_COLUMN, PROBABILITY_COLUMN,
    ScoreFrame, Scores,
};

/// Errors raised while assembling the enriched report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Scores do not cover every row of the dataset.
    #[error("scores cover {actual} rows but the dataset has {expected}")]
    RowMismatch { expected: usize, actual: usize },

    /// DataFrame column append failed.
    #[error("report enrichment failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for ReportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// The input dataset enriched with prediction-derived columns.
///
/// Row *i* of the dataset receives prediction *i*: alignment is strictly
/// positional, which relies on the loader and the inference engine
/// preserving row order end to end. Enrichment appends columns and never
/// reorders or drops rows.
#[derive(Debug, Clone)]
pub struct EnrichedReport {
    /// Source file name, carried through for summaries and exports.
    pub source: String,
    /// The enriched table: input columns plus `prediction`, optionally
    /// `probability_positive`, and `prediction_label`.
    pub frame: DataFrame,
    /// Discrete labels, one per row, in row order.
    pub labels: Vec<i64>,
    /// Positive-class probabilities when the model provided them.
    pub probabilities: Option<Vec<f64>>,
}

impl EnrichedReport {
    /// Merge scores into the dataset by row position.
    pub fn build(frame: ScoreFrame, scores: Scores) -> Result<Self> {
        let rows = frame.record_count();
        if scores.labels.len() != rows {
            return Err(ReportError::RowMismatch {
                expected: rows,
                actual: scores.labels.len(),
            });
        }
        if let Some(probabilities) = &scores.probabilities
            && probabilities.len() != rows
        {
            return Err(ReportError::RowMismatch {
                expected: rows,
                actual: probabilities.len(),
            });
        }

        let mut data = frame.data;
        data.with_column(Series::new(PREDICTION_COLUMN.into(), scores.labels.clone()))?;
        if let Some(probabilities) = &scores.probabilities {
            data.with_column(Series::new(PROBABILITY_COLUMN.into(), probabilities.clone()))?;
        }
        let display: Vec<&str> = scores
            .labels
            .iter()
            .map(|&label| {
                if label == 1 {
                    POSITIVE_LABEL
                } else {
                    NEGATIVE_LABEL
                }
            })
            .collect();
        data.with_column(Series::new(LABEL_COLUMN.into(), display).into_column())?;

        info!(
            file = %frame.source,
            rows,
            with_probabilities = scores.probabilities.is_some(),
            "report enriched"
        );
        Ok(Self {
            source: frame.source,
            frame: data,
            labels: scores.labels,
            probabilities: scores.probabilities,
        })
    }

    pub fn record_count(&self) -> usize {
        self.frame.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame() -> ScoreFrame {
        let df = DataFrame::new(vec![
            Column::new("amount".into(), vec![10i64, 20, 30]),
            Column::new("segment".into(), vec!["x", "y", "x"]),
        ])
        .unwrap();
        ScoreFrame::new("input.csv", df)
    }

    #[test]
    fn enrichment_preserves_rows_and_appends_columns() {
        let scores = Scores {
            labels: vec![1, 0, 1],
            probabilities: Some(vec![0.9, 0.2, 0.7]),
        };
        let report = EnrichedReport::build(frame(), scores).unwrap();
        assert_eq!(report.record_count(), 3);
        let names: Vec<&str> = report
            .frame
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "amount",
                "segment",
                PREDICTION_COLUMN,
                PROBABILITY_COLUMN,
                LABEL_COLUMN
            ]
        );
        // Positional alignment: row 0 keeps its own score.
        let prediction = report.frame.column(PREDICTION_COLUMN).unwrap();
        assert_eq!(prediction.get(0).unwrap(), AnyValue::Int64(1));
        assert_eq!(prediction.get(1).unwrap(), AnyValue::Int64(0));
    }

    #[test]
    fn no_probability_column_without_the_capability() {
        let scores = Scores {
            labels: vec![0, 0, 1],
            probabilities: None,
        };
        let report = EnrichedReport::build(frame(), scores).unwrap();
        assert!(
            !report
                .frame
                .get_column_names()
                .iter()
                .any(|n| n.as_str() == PROBABILITY_COLUMN)
        );
    }

    #[test]
    fn label_column_maps_both_classes() {
        let scores = Scores {
            labels: vec![1, 0, 1],
            probabilities: None,
        };
        let report = EnrichedReport::build(frame(), scores).unwrap();
        let labels = report.frame.column(LABEL_COLUMN).unwrap();
        assert_eq!(labels.get(0).unwrap(), AnyValue::String(POSITIVE_LABEL));
        assert_eq!(labels.get(1).unwrap(), AnyValue::String(NEGATIVE_LABEL));
    }

    #[test]
    fn short_score_vector_is_rejected() {
        let scores = Scores {
            labels: vec![1],
            probabilities: None,
        };
        let err = EnrichedReport::build(frame(), scores).unwrap_err();
        assert!(matches!(
            err,
            ReportError::RowMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }
}
