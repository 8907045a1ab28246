//! CSV output: one file per sheet, `<stem>_<Sheet>.csv`.

use ledger_core::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::sheets::{Sheet, SheetCell};

/// Write one sheet (header row first) to any writer.
pub fn write_csv_sheet<W: Write>(writer: W, sheet: &Sheet) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        wtr.write_record(row.iter().map(SheetCell::to_text))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write every sheet next to each other in `dir`; returns the paths in sheet order.
pub fn write_csv_sheets(dir: &Path, stem: &str, sheets: &[Sheet]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let path = dir.join(format!("{stem}_{}.csv", sheet.name));
        let file = std::fs::File::create(&path)?;
        write_csv_sheet(std::io::BufWriter::new(file), sheet)?;
        tracing::debug!(path = %path.display(), rows = sheet.rows.len(), "wrote CSV sheet");
        paths.push(path);
    }
    Ok(paths)
}
