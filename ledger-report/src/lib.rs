//! ledger-report: publishes a cleaned ledger and its debit/credit views as
//! a workbook (`Cleaned`, `Debit`, `Credit`) or as per-sheet CSV files.

pub mod csv_sheets;
pub mod naming;
pub mod preview;
pub mod sheets;
pub mod workbook;

use ledger_core::{Ledger, LedgerView, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use naming::{default_output_dir, output_stem, workbook_path};
pub use preview::render_preview;
pub use sheets::{statement_sheets, Sheet, SheetCell};

/// On-disk shape of the published sheets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single `.xlsx` workbook with three sheets
    #[default]
    Xlsx,
    /// Three `.csv` files sharing the output stem
    Csv,
}

/// Write the three sheets for `source_name` into `dir`; returns the files written.
pub fn publish(
    dir: &Path,
    source_name: &str,
    format: OutputFormat,
    ledger: &Ledger,
    debit: &LedgerView,
    credit: &LedgerView,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let sheets = statement_sheets(ledger, debit, credit);

    let written = match format {
        OutputFormat::Xlsx => {
            let path = workbook_path(dir, source_name);
            workbook::write_workbook(&path, &sheets)?;
            vec![path]
        }
        OutputFormat::Csv => csv_sheets::write_csv_sheets(dir, &output_stem(source_name), &sheets)?,
    };

    tracing::info!(source = source_name, files = written.len(), ?format, "published sheets");
    Ok(written)
}
