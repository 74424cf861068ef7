//! Error types for file ingestion.

use thiserror::Error;

/// Errors that can occur while loading an uploaded file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// No parsing strategy succeeded for the byte stream.
    ///
    /// The message enumerates what was tried so the user can re-save the
    /// file in a supported form.
    #[error(
        "could not read '{filename}': tried UTF-8 and Latin-1 text with comma and semicolon \
         delimiters; re-save the file as UTF-8 CSV or as a spreadsheet (.xlsx). \
         Last parse error: {last_error}"
    )]
    Unreadable { filename: String, last_error: String },

    /// Spreadsheet container could not be parsed.
    #[error("failed to read spreadsheet '{filename}': {message}")]
    Spreadsheet { filename: String, message: String },

    /// The spreadsheet has no sheets or the first sheet is empty.
    #[error("spreadsheet '{filename}' contains no data")]
    EmptySpreadsheet { filename: String },

    /// The parsed table has no usable header/columns.
    #[error("no header row detected in '{filename}'")]
    NoHeader { filename: String },

    /// Upload exceeds the size limit.
    #[error("file '{filename}' is too large: {size} bytes (max {max_size})")]
    TooLarge {
        filename: String,
        size: u64,
        max_size: u64,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
