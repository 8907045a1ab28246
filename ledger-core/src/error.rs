//! Error type shared by the ledger crates.

use thiserror::Error;

use crate::ledger::SCHEMA_WIDTH;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The concatenated raw table is narrower than the fixed ledger schema.
    #[error("raw table has {columns} columns; the ledger schema needs {width}", width = SCHEMA_WIDTH)]
    Schema { columns: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
