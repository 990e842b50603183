//! Spreadsheet codec.

/// Workbook reader and report writer.
pub mod xlsx;

use thiserror::Error;

/// Unreadable input or unwritable output workbook.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input bytes are not a readable workbook.
    #[error("failed to read workbook: {0}")]
    Read(#[from] calamine::XlsxError),
    /// Workbook has no worksheet to import from.
    #[error("workbook has no sheets")]
    NoSheets,
    /// Report workbook could not be produced.
    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

/// Result alias for codec calls.
pub type CodecResult<T> = Result<T, CodecError>;
