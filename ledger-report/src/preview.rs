//! Plain-text preview of the first rows of a sheet.

use crate::sheets::{Sheet, SheetCell};

const MAX_CELL_WIDTH: usize = 24;

fn clip(text: &str) -> String {
    let text = text.replace(['\n', '\r'], " ");
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text;
    }
    let mut clipped: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}

/// Render the header and up to `limit` rows as an aligned, `|`-separated table.
pub fn render_preview(sheet: &Sheet, limit: usize) -> String {
    let header: Vec<String> = sheet.headers.iter().map(|h| clip(h)).collect();
    let body: Vec<Vec<String>> = sheet
        .rows
        .iter()
        .take(limit)
        .map(|row| row.iter().map(|c| clip(&SheetCell::to_text(c))).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&header));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &body {
        out.push_str(&line(row));
        out.push('\n');
    }
    if sheet.rows.len() > limit {
        out.push_str(&format!("… {} more rows\n", sheet.rows.len() - limit));
    }
    out
}
