use polars::prelude::DataFrame;

/// A named tabular dataset flowing through the pipeline.
///
/// The `DataFrame` guarantees the structural invariants the pipeline relies
/// on: unique column names and a uniform row count across columns. The
/// source name is kept for diagnostics and error messages.
#[derive(Debug, Clone)]
pub struct ScoreFrame {
    /// Name of the file this frame was loaded from.
    pub source: String,
    pub data: DataFrame,
}

impl ScoreFrame {
    pub fn new(source: impl Into<String>, data: DataFrame) -> Self {
        Self {
            source: source.into(),
            data,
        }
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn column_count(&self) -> usize {
        self.data.width()
    }

    /// Column names in dataset order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// True if the dataset contains a column with the given name.
    pub fn has_column(&self, name: &str) -> bool {
        self.data.get_column_names().iter().any(|c| c.as_str() == name)
    }
}
