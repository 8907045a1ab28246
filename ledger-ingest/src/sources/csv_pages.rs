//! CSV page source: one headerless CSV file per extracted table.
//!
//! This is the shape table extractors export when asked for CSV, e.g.
//!   "1","01/02/2024","100","REF1","Acme","Payment","1","50.00","",""
//! Rows keep whatever width the extractor produced.

use ledger_core::Result;
use std::io::Read;
use std::path::Path;

use crate::types::RawTable;

/// Read one page from any reader.
pub fn read_csv_page<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(rows))
}

/// Read one page from a CSV file on disk.
pub fn load_csv_page(path: impl AsRef<Path>) -> Result<RawTable> {
    let file = std::fs::File::open(path.as_ref())?;
    read_csv_page(std::io::BufReader::new(file))
}
