//! Tabular rendering of the ledger and its views, shared by every writer.

use chrono::NaiveDate;
use ledger_core::coerce::format_day_first;
use ledger_core::{Ledger, LedgerRow, LedgerView, ViewRow, COLUMNS, TRAILER_LABEL};

pub const CLEANED_SHEET: &str = "Cleaned";

/// A typed spreadsheet cell. `Empty` is how nulls are published.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
    Date(NaiveDate),
}

impl SheetCell {
    /// Plain-text rendering used by CSV output and previews.
    pub fn to_text(&self) -> String {
        match self {
            SheetCell::Empty => String::new(),
            SheetCell::Text(s) => s.clone(),
            SheetCell::Integer(v) => v.to_string(),
            SheetCell::Number(v) => v.to_string(),
            SheetCell::Date(d) => format_day_first(*d),
        }
    }
}

fn int(v: Option<i64>) -> SheetCell {
    v.map_or(SheetCell::Empty, SheetCell::Integer)
}

fn num(v: Option<f64>) -> SheetCell {
    v.map_or(SheetCell::Empty, SheetCell::Number)
}

fn date(v: Option<NaiveDate>) -> SheetCell {
    v.map_or(SheetCell::Empty, SheetCell::Date)
}

fn text(v: &str) -> SheetCell {
    SheetCell::Text(v.to_string())
}

/// One named sheet: header row plus data rows, no index column.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<SheetCell>>,
}

impl Sheet {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            name: CLEANED_SHEET,
            headers: COLUMNS.to_vec(),
            rows: ledger.iter().map(ledger_cells).collect(),
        }
    }

    /// View rows followed by the `TOTAL` trailer.
    pub fn from_view(view: &LedgerView) -> Self {
        let mut rows: Vec<Vec<SheetCell>> = view.rows.iter().map(view_cells).collect();

        let mut trailer = vec![SheetCell::Empty; 8];
        trailer[0] = text(TRAILER_LABEL);
        trailer[6] = SheetCell::Integer(view.trailer.count as i64);
        trailer[7] = SheetCell::Number(view.trailer.total);
        rows.push(trailer);

        Self {
            name: view.side.sheet_name(),
            headers: view.headers().to_vec(),
            rows,
        }
    }
}

fn ledger_cells(r: &LedgerRow) -> Vec<SheetCell> {
    vec![
        int(r.no),
        date(r.value_date),
        int(r.tran_type),
        text(&r.tran_ref),
        text(&r.participant),
        text(&r.additional_information),
        num(r.dr),
        num(r.amount_dr),
        num(r.cr),
        num(r.amount_cr),
    ]
}

fn view_cells(r: &ViewRow) -> Vec<SheetCell> {
    vec![
        int(r.no),
        date(r.value_date),
        int(r.tran_type),
        text(&r.tran_ref),
        text(&r.participant),
        text(&r.additional_information),
        num(r.marker),
        num(r.amount),
    ]
}

/// The three published sheets, in workbook order: Cleaned, Debit, Credit.
pub fn statement_sheets(ledger: &Ledger, debit: &LedgerView, credit: &LedgerView) -> Vec<Sheet> {
    vec![
        Sheet::from_ledger(ledger),
        Sheet::from_view(debit),
        Sheet::from_view(credit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Ledger {
        Ledger::new(vec![
            LedgerRow {
                no: Some(1),
                value_date: NaiveDate::from_ymd_opt(2024, 2, 1),
                participant: "Acme".into(),
                dr: Some(1.0),
                amount_dr: Some(50.0),
                ..Default::default()
            },
            LedgerRow {
                no: Some(2),
                cr: Some(1.0),
                amount_cr: Some(12.5),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_cleaned_sheet_has_full_schema() {
        let sheet = Sheet::from_ledger(&ledger());
        assert_eq!(sheet.name, "Cleaned");
        assert_eq!(sheet.headers.len(), 10);
        assert_eq!(sheet.rows[0][1].to_text(), "01/02/2024");
        assert_eq!(sheet.rows[1][7], SheetCell::Empty);
    }

    #[test]
    fn test_view_sheet_ends_with_total_trailer() {
        let l = ledger();
        let sheets = statement_sheets(&l, &LedgerView::debit(&l), &LedgerView::credit(&l));
        assert_eq!(sheets.iter().map(|s| s.name).collect::<Vec<_>>(), ["Cleaned", "Debit", "Credit"]);

        let debit = &sheets[1];
        assert_eq!(debit.headers[6..], ["DR", "Amount_DR"]);
        let trailer = debit.rows.last().unwrap();
        assert_eq!(trailer[0], SheetCell::Text("TOTAL".into()));
        assert_eq!(trailer[6], SheetCell::Integer(1));
        assert_eq!(trailer[7], SheetCell::Number(50.0));
        assert_eq!(trailer[3], SheetCell::Empty);
    }
}
