//! Delimited-text loading with a fixed encoding/delimiter fallback ladder.

use std::borrow::Cow;
use std::io::Cursor;

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info};

use scorebatch_model::ScoreFrame;

use crate::error::{IngestError, Result};
use crate::spreadsheet;

/// Maximum accepted upload size (500 MB).
pub const MAX_UPLOAD_SIZE: u64 = 500 * 1024 * 1024;

/// Candidate delimiters, also used to detect a wrong-delimiter parse.
const DELIMITERS: [u8; 2] = [b',', b';'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextEncoding {
    Utf8,
    Latin1,
}

impl TextEncoding {
    fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }
}

/// Strategy order: the common case first, then progressively more
/// permissive combinations. Latin-1 + semicolon covers Spanish-locale
/// spreadsheet exports.
const STRATEGIES: [(TextEncoding, u8); 4] = [
    (TextEncoding::Utf8, b','),
    (TextEncoding::Utf8, b';'),
    (TextEncoding::Latin1, b','),
    (TextEncoding::Latin1, b';'),
];

/// Parse an uploaded byte stream into a [`ScoreFrame`].
///
/// Spreadsheet extensions (`.xlsx`/`.xls`) are parsed as a single sheet
/// with the first row as header. Anything else is treated as delimited
/// text and run through the strategy ladder; the first strategy that
/// parses without a decoding or structural error wins. Every attempt
/// starts from the beginning of the buffer, so earlier failures cannot
/// leave a partially consumed stream behind.
pub fn load(filename: &str, bytes: &[u8]) -> Result<ScoreFrame> {
    if bytes.len() as u64 > MAX_UPLOAD_SIZE {
        return Err(IngestError::TooLarge {
            filename: filename.to_string(),
            size: bytes.len() as u64,
            max_size: MAX_UPLOAD_SIZE,
        });
    }

    if has_spreadsheet_extension(filename) {
        return spreadsheet::load_spreadsheet(filename, bytes);
    }

    let mut last_error = String::from("empty input");
    for (encoding, delimiter) in STRATEGIES {
        let text = match decode(bytes, encoding) {
            Ok(text) => text,
            Err(message) => {
                debug!(
                    file = filename,
                    encoding = encoding.name(),
                    error = %message,
                    "decoding attempt failed"
                );
                last_error = message;
                continue;
            }
        };
        match parse_delimited(&text, delimiter) {
            Ok(df) => {
                info!(
                    file = filename,
                    encoding = encoding.name(),
                    delimiter = %(delimiter as char),
                    rows = df.height(),
                    columns = df.width(),
                    "delimited text parsed"
                );
                return Ok(ScoreFrame::new(filename, df));
            }
            Err(message) => {
                debug!(
                    file = filename,
                    encoding = encoding.name(),
                    delimiter = %(delimiter as char),
                    error = %message,
                    "parse attempt failed"
                );
                last_error = message;
            }
        }
    }

    Err(IngestError::Unreadable {
        filename: filename.to_string(),
        last_error,
    })
}

fn has_spreadsheet_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

fn decode(bytes: &[u8], encoding: TextEncoding) -> std::result::Result<Cow<'_, str>, String> {
    match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(|s| Cow::Borrowed(s.strip_prefix('\u{feff}').unwrap_or(s)))
            .map_err(|e| format!("invalid UTF-8: {e}")),
        // Latin-1 maps every byte to a code point, so decoding cannot fail.
        TextEncoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes)),
    }
}

fn parse_delimited(text: &str, delimiter: u8) -> std::result::Result<DataFrame, String> {
    if text.trim().is_empty() {
        return Err("input contains no header row".to_string());
    }

    let cursor = Cursor::new(text.as_bytes().to_vec());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .with_parse_options(CsvParseOptions::default().with_separator(delimiter))
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| e.to_string())?;

    if df.width() == 0 {
        return Err("parsed table has no columns".to_string());
    }

    // A single parsed column whose header still contains a rival candidate
    // delimiter means the wrong separator was chosen for this file; reject
    // so the next strategy gets a chance.
    if df.width() == 1 {
        let header_line = text.lines().next().unwrap_or("");
        let rival = DELIMITERS
            .iter()
            .find(|&&d| d != delimiter && header_line.contains(d as char));
        if let Some(&rival) = rival {
            return Err(format!(
                "single column parsed but header contains '{}'",
                rival as char
            ));
        }
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_comma_is_the_first_strategy() {
        let frame = load("input.csv", b"a,b,segment\n1,2,x\n3,4,y\n").unwrap();
        assert_eq!(frame.record_count(), 2);
        assert_eq!(frame.column_names(), vec!["a", "b", "segment"]);
    }

    #[test]
    fn semicolon_delimited_utf8_falls_through() {
        let frame = load("input.csv", b"a;b\n1;2\n3;4\n").unwrap();
        assert_eq!(frame.record_count(), 2);
        assert_eq!(frame.column_count(), 2);
    }

    #[test]
    fn latin1_semicolon_export_is_recovered() {
        // "año;región" in Latin-1 plus numeric rows; invalid as UTF-8.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"a\xf1o;regi\xf3n\n");
        bytes.extend_from_slice(b"1;2\n3;4\n5;6\n");
        let frame = load("ventas.csv", &bytes).unwrap();
        assert_eq!(frame.record_count(), 3);
        assert_eq!(frame.column_count(), 2);
        assert_eq!(frame.column_names(), vec!["a\u{f1}o", "regi\u{f3}n"]);
    }

    #[test]
    fn single_column_file_without_rival_delimiter_parses() {
        let frame = load("one.csv", b"value\n1\n2\n").unwrap();
        assert_eq!(frame.column_count(), 1);
        assert_eq!(frame.record_count(), 2);
    }

    #[test]
    fn empty_input_is_unreadable() {
        let err = load("empty.csv", b"").unwrap_err();
        assert!(matches!(err, IngestError::Unreadable { .. }));
    }

    #[test]
    fn oversized_input_is_rejected_before_parsing() {
        // Fabricate the size check without allocating 500 MB.
        let err = IngestError::TooLarge {
            filename: "big.csv".to_string(),
            size: MAX_UPLOAD_SIZE + 1,
            max_size: MAX_UPLOAD_SIZE,
        };
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn header_only_file_yields_empty_frame() {
        let frame = load("header.csv", b"a,b\n").unwrap();
        assert_eq!(frame.record_count(), 0);
        assert_eq!(frame.column_count(), 2);
    }
}
