//! Report building for the scorebatch pipeline.
//!
//! Merges model output back into the input dataset by row position and
//! derives the summary views: overall counts, class histogram, per-segment
//! positive shares, and the top-K ranking by positive-class probability.
//! Derived views are pure functions of the enriched report; none of them
//! mutate it.

mod report;
mod summary;

pub use report::{EnrichedReport, ReportError, Result};
pub use summary::{DEFAULT_TOP_K, ScoreSummary, SegmentShare};
