//! Spreadsheet (`.xlsx`/`.xls`) loading through calamine.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use polars::prelude::{Column, DataFrame};
use tracing::info;

use scorebatch_model::ScoreFrame;
use scorebatch_model::polars_utils::parse_f64;

use crate::error::{IngestError, Result};

/// Parse a spreadsheet byte stream into a [`ScoreFrame`].
///
/// The first sheet is used; its first row is the header. Columns where
/// every non-empty cell is numeric become `Float64`, everything else is
/// kept as text.
pub fn load_spreadsheet(filename: &str, bytes: &[u8]) -> Result<ScoreFrame> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| IngestError::Spreadsheet {
            filename: filename.to_string(),
            message: e.to_string(),
        })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptySpreadsheet {
            filename: filename.to_string(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Spreadsheet {
            filename: filename.to_string(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| IngestError::EmptySpreadsheet {
        filename: filename.to_string(),
    })?;

    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::NoHeader {
            filename: filename.to_string(),
        });
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (idx, column) in cells.iter_mut().enumerate() {
            let value = row.get(idx).map(cell_to_string).unwrap_or_default();
            column.push(value);
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(&cells)
        .map(|(name, values)| build_column(name, values))
        .collect();

    let df = DataFrame::new(columns).map_err(|e| IngestError::Spreadsheet {
        filename: filename.to_string(),
        message: e.to_string(),
    })?;

    info!(
        file = filename,
        sheet = %sheet_name,
        rows = df.height(),
        columns = df.width(),
        "spreadsheet parsed"
    );
    Ok(ScoreFrame::new(filename, df))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Numeric column when every non-empty cell parses as a number; text
/// otherwise. Empty cells become nulls.
fn build_column(name: &str, values: &[String]) -> Column {
    let non_empty: Vec<&String> = values.iter().filter(|v| !v.trim().is_empty()).collect();
    let all_numeric =
        !non_empty.is_empty() && non_empty.iter().all(|v| parse_f64(v).is_some());

    if all_numeric {
        let parsed: Vec<Option<f64>> = values.iter().map(|v| parse_f64(v)).collect();
        Column::new(name.into(), parsed)
    } else {
        let parsed: Vec<Option<&str>> = values
            .iter()
            .map(|v| if v.trim().is_empty() { None } else { Some(v.as_str()) })
            .collect();
        Column::new(name.into(), parsed)
    }
}
