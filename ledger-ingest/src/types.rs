use serde::{Deserialize, Serialize};

/// One table as handed over by the extraction collaborator: rows of text cells.
///
/// Rows may be ragged; the cleaner pads short rows with null cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a table from anything string-like, e.g. `&[&[&str]]` literals.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row in the table
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A working-table row: one optional cell per column. `None` is padding
/// introduced when a page was narrower than the widest page.
pub type Cells = Vec<Option<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_is_widest_row() {
        let t = RawTable::from_rows([vec!["a", "b"], vec!["c", "d", "e"], vec![]]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.width(), 3);
        assert_eq!(RawTable::default().width(), 0);
    }

    #[test]
    fn test_json_shape_is_plain_rows() {
        let t: RawTable = serde_json::from_str(r#"[["1","x"],["2",""]]"#).unwrap();
        assert_eq!(t.rows[1], vec!["2".to_string(), String::new()]);
    }
}
