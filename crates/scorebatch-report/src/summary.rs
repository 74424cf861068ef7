//! Derived views over the enriched report.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, IdxCa};

use scorebatch_model::SEGMENT_COLUMN;
use scorebatch_model::polars_utils::any_to_string;

use crate::report::{EnrichedReport, Result};

/// Number of rows in the default top ranking.
pub const DEFAULT_TOP_K: usize = 20;

/// Overall counts for a scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    /// Percentage of rows labeled 1; 0 when the report is empty.
    pub positive_pct: f64,
    /// Percentage of rows labeled 0; 0 when the report is empty.
    pub negative_pct: f64,
}

/// Fraction of a segment's rows predicted positive.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentShare {
    pub segment: String,
    /// Mean of the binary prediction over the segment, in [0, 1].
    pub fraction_positive: f64,
    pub rows: usize,
}

impl EnrichedReport {
    /// Total, positive and negative counts with percentages.
    pub fn summary(&self) -> ScoreSummary {
        let total = self.labels.len();
        let positive = self.labels.iter().filter(|&&l| l == 1).count();
        let negative = self.labels.iter().filter(|&&l| l == 0).count();
        let (positive_pct, negative_pct) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                positive as f64 / total as f64 * 100.0,
                negative as f64 / total as f64 * 100.0,
            )
        };
        ScoreSummary {
            total,
            positive,
            negative,
            positive_pct,
            negative_pct,
        }
    }

    /// Count of rows per predicted label value, in ascending label order.
    pub fn class_histogram(&self) -> BTreeMap<i64, usize> {
        let mut histogram = BTreeMap::new();
        for &label in &self.labels {
            *histogram.entry(label).or_insert(0) += 1;
        }
        histogram
    }

    /// Per-segment positive share, sorted descending by fraction.
    ///
    /// Returns `None` when the input had no `segment` column. Segments
    /// with equal fractions keep alphabetical order (the grouping is a
    /// sorted map and the descending sort is stable).
    pub fn segment_summary(&self) -> Result<Option<Vec<SegmentShare>>> {
        let Ok(column) = self.frame.column(SEGMENT_COLUMN) else {
            return Ok(None);
        };

        let mut groups: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for (row, &label) in self.labels.iter().enumerate() {
            let segment = any_to_string(column.get(row)?);
            let entry = groups.entry(segment).or_insert((0, 0));
            entry.0 += usize::from(label == 1);
            entry.1 += 1;
        }

        let mut shares: Vec<SegmentShare> = groups
            .into_iter()
            .map(|(segment, (positive, rows))| SegmentShare {
                segment,
                fraction_positive: positive as f64 / rows as f64,
                rows,
            })
            .collect();
        shares.sort_by(|a, b| {
            b.fraction_positive
                .partial_cmp(&a.fraction_positive)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(Some(shares))
    }

    /// The `k` rows with the highest positive-class probability.
    ///
    /// Returns `None` when the model provided no probabilities. Rows are
    /// sorted descending by probability with ties keeping their original
    /// relative order (stable sort), and fewer than `k` rows are returned
    /// when the report is shorter.
    pub fn top_ranking(&self, k: usize) -> Result<Option<DataFrame>> {
        let Some(probabilities) = &self.probabilities else {
            return Ok(None);
        };

        let mut order: Vec<u32> = (0..probabilities.len() as u32).collect();
        order.sort_by(|&a, &b| {
            probabilities[b as usize]
                .partial_cmp(&probabilities[a as usize])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order.truncate(k);

        let indices = IdxCa::from_vec("top".into(), order);
        let top = self.frame.take(&indices)?;
        Ok(Some(top))
    }
}
