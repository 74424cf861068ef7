//! Report export.
//!
//! Serializes an [`EnrichedReport`] to a portable byte representation:
//! UTF-8 comma-separated text with a header row, or a single-sheet
//! spreadsheet. Neither format writes a row index, and both preserve the
//! report's column and row order exactly.

use polars::prelude::{AnyValue, CsvWriter, SerWriter};
use rust_xlsxwriter::Workbook;
use thiserror::Error;
use tracing::info;

use scorebatch_model::polars_utils::{any_to_f64, any_to_string};
use scorebatch_report::EnrichedReport;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// UTF-8, comma-separated, header row, no row index.
    Csv,
    /// Single-sheet spreadsheet holding the full report, no row index.
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Xlsx => "XLSX",
        }
    }
}

/// Errors raised while serializing a report.
///
/// A failed export does not invalidate the report itself, which remains
/// inspectable by the caller.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize report as {format}: {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Serialize the enriched report to bytes in the requested format.
pub fn export(report: &EnrichedReport, format: ExportFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Csv => export_csv(report)?,
        ExportFormat::Xlsx => export_xlsx(report)?,
    };
    info!(
        file = %report.source,
        format = format.name(),
        rows = report.record_count(),
        bytes = bytes.len(),
        "report serialized"
    );
    Ok(bytes)
}

fn export_csv(report: &EnrichedReport) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut frame = report.frame.clone();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| OutputError::Serialize {
            format: "CSV",
            message: e.to_string(),
        })?;
    Ok(buffer)
}

fn export_xlsx(report: &EnrichedReport) -> Result<Vec<u8>> {
    let serialize_err = |e: &dyn std::fmt::Display| OutputError::Serialize {
        format: "XLSX",
        message: e.to_string(),
    };

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in report.frame.get_column_names().iter().enumerate() {
        sheet
            .write_string(0, col as u16, name.as_str())
            .map_err(|e| serialize_err(&e))?;
    }

    for (col, column) in report.frame.get_columns().iter().enumerate() {
        for row in 0..report.frame.height() {
            let value = column.get(row).map_err(|e| serialize_err(&e))?;
            if matches!(value, AnyValue::Null) {
                continue;
            }
            let target = (row + 1) as u32;
            if let Some(number) = numeric_cell(&value) {
                sheet
                    .write_number(target, col as u16, number)
                    .map_err(|e| serialize_err(&e))?;
            } else {
                sheet
                    .write_string(target, col as u16, any_to_string(value))
                    .map_err(|e| serialize_err(&e))?;
            }
        }
    }

    workbook.save_to_buffer().map_err(|e| serialize_err(&e))
}

/// Numbers are written as spreadsheet numbers; string cells (even numeric
/// looking ones) stay text so the export mirrors the report exactly.
fn numeric_cell(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::String(_) | AnyValue::StringOwned(_) | AnyValue::Boolean(_) => None,
        other => any_to_f64(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use scorebatch_model::{ScoreFrame, Scores};

    fn sample_report() -> EnrichedReport {
        let df = DataFrame::new(vec![
            Column::new("amount".into(), vec![10.5f64, 20.0, 7.25]),
            Column::new("segment".into(), vec!["x", "y", "x"]),
        ])
        .unwrap();
        EnrichedReport::build(
            ScoreFrame::new("input.csv", df),
            Scores {
                labels: vec![1, 0, 1],
                probabilities: Some(vec![0.9, 0.2, 0.7]),
            },
        )
        .unwrap()
    }

    #[test]
    fn csv_export_has_header_and_all_rows() {
        let report = sample_report();
        let bytes = export(&report, ExportFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert_eq!(
            header,
            "amount,segment,prediction,probability_positive,prediction_label"
        );
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn xlsx_export_produces_a_workbook() {
        let report = sample_report();
        let bytes = export(&report, ExportFormat::Xlsx).unwrap();
        // XLSX containers are ZIP archives.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn extensions_match_formats() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Xlsx.extension(), "xlsx");
    }
}
