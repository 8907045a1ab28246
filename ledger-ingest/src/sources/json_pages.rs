//! JSON page source: a whole document's tables in one file.
//!
//! Shape: `[[["cell", ...], ...], ...]`, pages of rows of cells.

use ledger_core::Result;
use std::io::Read;
use std::path::Path;

use crate::types::RawTable;

pub fn read_json_pages<R: Read>(reader: R) -> Result<Vec<RawTable>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_json_pages(path: impl AsRef<Path>) -> Result<Vec<RawTable>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_json_pages(std::io::BufReader::new(file))
}
