//! Ledger record types: the fixed 10-column statement schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::coerce::{self, CoercionStats};

/// Number of raw columns that map onto the ledger schema.
pub const SCHEMA_WIDTH: usize = 10;

/// Column names, in schema order.
pub const COLUMNS: [&str; SCHEMA_WIDTH] = [
    "No.",
    "Value Date",
    "Tran Type",
    "Tran Ref",
    "Participant",
    "Additional Information",
    "DR",
    "Amount_DR",
    "CR",
    "Amount_CR",
];

pub const NO_COLUMN: usize = 0;
pub const ADDITIONAL_INFO_COLUMN: usize = 5;
pub const DR_COLUMN: usize = 6;
pub const AMOUNT_DR_COLUMN: usize = 7;
pub const CR_COLUMN: usize = 8;
pub const AMOUNT_CR_COLUMN: usize = 9;

/// One cleaned statement line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Sequence number
    pub no: Option<i64>,
    /// Value date, parsed day-first
    pub value_date: Option<NaiveDate>,
    /// Transaction type code
    pub tran_type: Option<i64>,
    pub tran_ref: String,
    /// Counterparty name
    pub participant: String,
    /// Free-form note; continuation rows are merged into it
    pub additional_information: String,
    /// Debit marker (non-null puts the row in the debit view)
    pub dr: Option<f64>,
    pub amount_dr: Option<f64>,
    /// Credit marker (non-null puts the row in the credit view)
    pub cr: Option<f64>,
    pub amount_cr: Option<f64>,
}

impl LedgerRow {
    /// Build a typed row from ten raw cells, degrading unparseable values to `None`.
    ///
    /// Missing cells (short slices) are treated as null.
    pub fn coerce(cells: &[Option<String>], stats: &mut CoercionStats) -> Self {
        let cell = |i: usize| cells.get(i).and_then(|c| c.as_deref());
        let text = |i: usize| cell(i).unwrap_or_default().to_string();

        Self {
            no: stats.integer(cell(NO_COLUMN)),
            value_date: stats.date(cell(1)),
            tran_type: stats.integer(cell(2)),
            tran_ref: text(3),
            participant: text(4),
            additional_information: text(ADDITIONAL_INFO_COLUMN),
            dr: stats.number(cell(DR_COLUMN)),
            amount_dr: stats.number(cell(AMOUNT_DR_COLUMN)),
            cr: stats.number(cell(CR_COLUMN)),
            amount_cr: stats.number(cell(AMOUNT_CR_COLUMN)),
        }
    }

    /// Render the row back into ten text cells (dates as `dd/mm/yyyy`).
    pub fn to_raw_cells(&self) -> Vec<String> {
        vec![
            opt_to_string(self.no),
            self.value_date
                .map(coerce::format_day_first)
                .unwrap_or_default(),
            opt_to_string(self.tran_type),
            self.tran_ref.clone(),
            self.participant.clone(),
            self.additional_information.clone(),
            opt_to_string(self.dr),
            opt_to_string(self.amount_dr),
            opt_to_string(self.cr),
            opt_to_string(self.amount_cr),
        ]
    }

    pub fn is_debit(&self) -> bool {
        self.dr.is_some()
    }

    pub fn is_credit(&self) -> bool {
        self.cr.is_some()
    }

    /// True when no field survived coercion, e.g. a row of `n/a` placeholders.
    pub fn is_blank(&self) -> bool {
        self.no.is_none()
            && self.value_date.is_none()
            && self.tran_type.is_none()
            && [&self.tran_ref, &self.participant, &self.additional_information]
                .iter()
                .all(|t| t.trim().is_empty())
            && [self.dr, self.amount_dr, self.cr, self.amount_cr]
                .iter()
                .all(Option::is_none)
    }
}

fn opt_to_string<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

/// The cleaned ledger: a dense, 0-based sequence of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn new(rows: Vec<LedgerRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerRow> {
        self.rows.iter()
    }

    /// All rows rendered back to raw text cells, e.g. for re-cleaning or CSV output.
    pub fn to_raw_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(LedgerRow::to_raw_cells).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn test_coerce_full_row() {
        let mut stats = CoercionStats::default();
        let row = LedgerRow::coerce(
            &cells(&["1", "01/02/2024", "100", "REF1", "Acme", "Payment", "1", "50.00", "", ""]),
            &mut stats,
        );
        assert_eq!(row.no, Some(1));
        assert_eq!(row.value_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(row.tran_type, Some(100));
        assert_eq!(row.participant, "Acme");
        assert_eq!(row.amount_dr, Some(50.0));
        assert!(row.is_debit());
        assert!(!row.is_credit());
        assert_eq!(stats.numeric_failures, 0);
    }

    #[test]
    fn test_coerce_short_row_is_null_padded() {
        let mut stats = CoercionStats::default();
        let row = LedgerRow::coerce(&cells(&["7", "", "", "R"]), &mut stats);
        assert_eq!(row.no, Some(7));
        assert_eq!(row.tran_ref, "R");
        assert_eq!(row.additional_information, "");
        assert_eq!(row.amount_cr, None);
    }

    #[test]
    fn test_placeholder_row_coerces_to_blank() {
        let mut stats = CoercionStats::default();
        let row = LedgerRow::coerce(
            &cells(&["n/a", "pending", "", "", " ", "", "-", "", "", ""]),
            &mut stats,
        );
        assert!(row.is_blank());
        assert_eq!(stats.total(), 3);

        let kept = LedgerRow::coerce(&cells(&["", "", "", "", "", "", "", "", "", "5"]), &mut stats);
        assert!(!kept.is_blank());
    }

    #[test]
    fn test_raw_cells_reparse_to_same_row() {
        let mut stats = CoercionStats::default();
        let row = LedgerRow::coerce(
            &cells(&["12", "31/12/2023", "4", "X9", "Bob", "rent", "", "", "1", "1,250.50"]),
            &mut stats,
        );
        let raw: Vec<Option<String>> = row.to_raw_cells().into_iter().map(Some).collect();
        let again = LedgerRow::coerce(&raw, &mut stats);
        assert_eq!(row, again);
        assert_eq!(row.to_raw_cells()[9], "1250.5");
    }
}
