//! File ingestion for the scorebatch pipeline.
//!
//! Turns an uploaded byte stream into a [`scorebatch_model::ScoreFrame`].
//! Delimited text is parsed through a fixed fallback ladder of
//! encoding/delimiter combinations; `.xlsx`/`.xls` files are parsed as a
//! single sheet with the first row as header.

mod error;
mod loader;
mod spreadsheet;

pub use error::{IngestError, Result};
pub use loader::{MAX_UPLOAD_SIZE, load};
pub use spreadsheet::load_spreadsheet;
