//! Row-level cleaning stages, applied in order by [`crate::cleaner::Cleaner`].
//!
//! Every stage works on the untyped working table (`Vec<Cells>`); type
//! coercion happens only once the rows are final.

use ledger_core::ledger::{ADDITIONAL_INFO_COLUMN, NO_COLUMN};
use ledger_core::{LedgerError, Result, SCHEMA_WIDTH};
use regex::{Regex, RegexBuilder};

use crate::types::{Cells, RawTable};

/// Flatten pages into one table, padding ragged rows with `None` to the
/// widest row, then keep only the schema's leading columns.
///
/// Fails with [`LedgerError::Schema`] if the widest row is too narrow.
pub fn concatenate(pages: &[RawTable]) -> Result<Vec<Cells>> {
    let width = pages.iter().map(RawTable::width).max().unwrap_or(0);
    if width < SCHEMA_WIDTH {
        return Err(LedgerError::Schema { columns: width });
    }

    let rows = pages
        .iter()
        .flat_map(|page| page.rows.iter())
        .map(|row| {
            let mut cells: Cells = row.iter().take(SCHEMA_WIDTH).cloned().map(Some).collect();
            cells.resize(SCHEMA_WIDTH, None);
            cells
        })
        .collect();

    Ok(rows)
}

fn is_empty_cell(cell: &Option<String>) -> bool {
    cell.as_deref().is_none_or(|c| c.trim().is_empty())
}

/// Case-insensitive literal phrase matcher.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    re: Regex,
}

impl PhraseMatcher {
    pub fn new(phrase: &str) -> Result<Self> {
        if phrase.trim().is_empty() {
            return Err(LedgerError::InvalidInput("noise phrase must not be empty".to_string()));
        }
        let re = RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .build()
            .map_err(|e| LedgerError::InvalidInput(format!("phrase {phrase:?}: {e}")))?;
        Ok(Self { re })
    }

    pub fn is_match(&self, cell: &Option<String>) -> bool {
        cell.as_deref().is_some_and(|c| self.re.is_match(c))
    }
}

/// Drop page-break marker rows (any cell contains the marker). Returns the count removed.
pub fn drop_page_markers(rows: &mut Vec<Cells>, marker: &PhraseMatcher) -> usize {
    let before = rows.len();
    rows.retain(|row| !row.iter().any(|c| marker.is_match(c)));
    before - rows.len()
}

/// Drop rows whose cells are all null or whitespace.
pub fn drop_blank_rows(rows: &mut Vec<Cells>) -> usize {
    let before = rows.len();
    rows.retain(|row| !row.iter().all(is_empty_cell));
    before - rows.len()
}

/// Drop repeated header fragments: the `No.` cell contains the header phrase.
pub fn drop_header_fragments(rows: &mut Vec<Cells>, header: &PhraseMatcher) -> usize {
    let before = rows.len();
    rows.retain(|row| !header.is_match(&row[NO_COLUMN]));
    before - rows.len()
}

/// A continuation row carries text only in the Additional Information column.
pub fn is_continuation(row: &Cells) -> bool {
    let mut filled = row
        .iter()
        .enumerate()
        .filter(|(_, c)| !is_empty_cell(c))
        .map(|(i, _)| i);
    filled.next() == Some(ADDITIONAL_INFO_COLUMN) && filled.next().is_none()
}

/// Fold continuation rows into the note of the last row kept so far.
///
/// The first row is never treated as a continuation. Consecutive
/// continuation rows all land on the same surviving row, in order.
/// Returns the surviving rows and the number merged.
pub fn merge_continuations(rows: Vec<Cells>) -> (Vec<Cells>, usize) {
    let mut kept: Vec<Cells> = Vec::with_capacity(rows.len());
    let mut merged = 0;

    for (i, row) in rows.into_iter().enumerate() {
        if i > 0 && is_continuation(&row) {
            if let Some(target) = kept.last_mut() {
                append_note(&mut target[ADDITIONAL_INFO_COLUMN], &row[ADDITIONAL_INFO_COLUMN]);
                merged += 1;
                continue;
            }
        }
        kept.push(row);
    }

    (kept, merged)
}

fn append_note(target: &mut Option<String>, fragment: &Option<String>) {
    let fragment = fragment.as_deref().unwrap_or_default().trim();
    let joined = match target.as_deref().map(str::trim_end) {
        Some(prev) if !prev.is_empty() => format!("{prev} {fragment}"),
        _ => fragment.to_string(),
    };
    *target = Some(joined);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Cells {
        let mut cells: Cells = values.iter().map(|v| Some(v.to_string())).collect();
        cells.resize(SCHEMA_WIDTH, Some(String::new()));
        cells
    }

    fn note_only(text: &str) -> Cells {
        row(&["", "", "", "", "", text])
    }

    #[test]
    fn test_concatenate_pads_and_truncates() {
        let wide = RawTable::from_rows([(0..12).map(|i| i.to_string()).collect::<Vec<_>>()]);
        let narrow = RawTable::from_rows([vec!["x", "y"]]);
        let rows = concatenate(&[wide, narrow]).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == SCHEMA_WIDTH));
        assert_eq!(rows[0][9].as_deref(), Some("9"));
        assert_eq!(rows[1][1].as_deref(), Some("y"));
        assert_eq!(rows[1][2], None);
    }

    #[test]
    fn test_concatenate_rejects_narrow_tables() {
        let page = RawTable::from_rows([vec!["a"; 9]]);
        let err = concatenate(&[page]).unwrap_err();
        assert!(matches!(err, LedgerError::Schema { columns: 9 }));
        assert!(matches!(concatenate(&[]), Err(LedgerError::Schema { columns: 0 })));
    }

    #[test]
    fn test_page_markers_match_any_cell_any_case() {
        let marker = PhraseMatcher::new("table from page").unwrap();
        let mut rows = vec![
            row(&["1", "a"]),
            row(&["", "", "", "", "", "", "", "", "", "Table From Page 3 of 9"]),
            row(&["TABLE FROM PAGE 4"]),
        ];
        assert_eq!(drop_page_markers(&mut rows, &marker), 2);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_empty_phrase_is_rejected() {
        assert!(matches!(PhraseMatcher::new("  "), Err(LedgerError::InvalidInput(_))));
    }

    #[test]
    fn test_blank_rows_include_padding_and_whitespace() {
        let mut rows = vec![row(&["1"]), row(&[" ", "\t"]), vec![None; SCHEMA_WIDTH], row(&["2"])];
        assert_eq!(drop_blank_rows(&mut rows), 2);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_header_fragments_only_checked_in_first_column() {
        let header = PhraseMatcher::new("Additional").unwrap();
        let mut rows = vec![
            row(&["No. Additional"]),
            row(&["1", "", "", "", "", "Additional charge"]),
        ];
        assert_eq!(drop_header_fragments(&mut rows, &header), 1);
        assert_eq!(rows[0][0].as_deref(), Some("1"));
    }

    #[test]
    fn test_continuation_detection() {
        assert!(is_continuation(&note_only("more")));
        assert!(!is_continuation(&row(&["1", "", "", "", "", "more"])));
        assert!(!is_continuation(&row(&["", "", "", "", "only participant"])));
        let mut padded = vec![None; SCHEMA_WIDTH];
        padded[ADDITIONAL_INFO_COLUMN] = Some("x".into());
        assert!(is_continuation(&padded));
    }

    #[test]
    fn test_consecutive_continuations_merge_into_nearest_survivor() {
        let rows = vec![
            row(&["1", "", "", "", "", "Payment"]),
            note_only("note"),
            note_only("continued"),
            row(&["2", "", "", "", "", ""]),
            note_only("second"),
        ];
        let (kept, merged) = merge_continuations(rows);
        assert_eq!(merged, 3);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0][5].as_deref(), Some("Payment note continued"));
        assert_eq!(kept[1][5].as_deref(), Some("second"));
    }

    #[test]
    fn test_first_row_is_never_a_continuation() {
        let (kept, merged) = merge_continuations(vec![note_only("orphan"), note_only("tail")]);
        assert_eq!(merged, 1);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0][5].as_deref(), Some("orphan tail"));
    }
}
