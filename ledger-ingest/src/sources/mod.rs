//! Raw page sources: files written by the table-extraction collaborator.

pub mod csv_pages;
pub mod json_pages;

use ledger_core::Result;
use std::path::Path;

use crate::types::RawTable;

/// Load pages from files, in argument order.
///
/// A `.json` file contributes all of its pages; any other file is read as a
/// single CSV page.
pub fn load_pages<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RawTable>> {
    let mut pages = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            let loaded = json_pages::load_json_pages(path)?;
            tracing::debug!(path = %path.display(), pages = loaded.len(), "loaded JSON pages");
            pages.extend(loaded);
        } else {
            let page = csv_pages::load_csv_page(path)?;
            if page.is_empty() {
                tracing::warn!(path = %path.display(), "CSV page has no rows");
            }
            tracing::debug!(path = %path.display(), rows = page.len(), "loaded CSV page");
            pages.push(page);
        }
    }
    Ok(pages)
}
