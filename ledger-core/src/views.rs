//! Debit and credit views: filtered, sorted, totaled projections of a ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::ledger::{
    Ledger, LedgerRow, ADDITIONAL_INFO_COLUMN, AMOUNT_CR_COLUMN, AMOUNT_DR_COLUMN, COLUMNS, CR_COLUMN,
    DR_COLUMN,
};

/// Literal written into the `No.` column of a view's trailer row.
pub const TRAILER_LABEL: &str = "TOTAL";

/// Which side of the statement a view projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
}

impl Side {
    /// Sheet name the view is published under
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Side::Debit => "Debit",
            Side::Credit => "Credit",
        }
    }

    /// Schema indices of the (marker, amount) columns this side keeps.
    fn kept_columns(&self) -> (usize, usize) {
        match self {
            Side::Debit => (DR_COLUMN, AMOUNT_DR_COLUMN),
            Side::Credit => (CR_COLUMN, AMOUNT_CR_COLUMN),
        }
    }

    fn selects(&self, row: &LedgerRow) -> bool {
        match self {
            Side::Debit => row.is_debit(),
            Side::Credit => row.is_credit(),
        }
    }

    fn marker(&self, row: &LedgerRow) -> Option<f64> {
        match self {
            Side::Debit => row.dr,
            Side::Credit => row.cr,
        }
    }

    fn amount(&self, row: &LedgerRow) -> Option<f64> {
        match self {
            Side::Debit => row.amount_dr,
            Side::Credit => row.amount_cr,
        }
    }
}

/// A ledger row with the opposite side's two columns dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    pub no: Option<i64>,
    pub value_date: Option<NaiveDate>,
    pub tran_type: Option<i64>,
    pub tran_ref: String,
    pub participant: String,
    pub additional_information: String,
    /// `DR` in the debit view, `CR` in the credit view
    pub marker: Option<f64>,
    /// `Amount_DR` in the debit view, `Amount_CR` in the credit view
    pub amount: Option<f64>,
}

/// Synthetic summary row closing a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trailer {
    /// Number of selected rows (written into the marker column)
    pub count: usize,
    /// Sum of non-null amounts (written into the amount column)
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerView {
    pub side: Side,
    pub rows: Vec<ViewRow>,
    pub trailer: Trailer,
}

impl LedgerView {
    /// Select rows with a non-null marker on `side`, sort them ascending by
    /// amount (nulls last, ties keep ledger order) and close with a trailer.
    pub fn derive(ledger: &Ledger, side: Side) -> Self {
        let mut rows: Vec<ViewRow> = ledger
            .iter()
            .filter(|r| side.selects(r))
            .map(|r| ViewRow {
                no: r.no,
                value_date: r.value_date,
                tran_type: r.tran_type,
                tran_ref: r.tran_ref.clone(),
                participant: r.participant.clone(),
                additional_information: r.additional_information.clone(),
                marker: side.marker(r),
                amount: side.amount(r),
            })
            .collect();

        rows.sort_by(|a, b| cmp_amount(a.amount, b.amount));

        let trailer = Trailer {
            count: rows.len(),
            total: rows.iter().filter_map(|r| r.amount).fold(0.0, |acc, a| acc + a),
        };

        Self { side, rows, trailer }
    }

    pub fn debit(ledger: &Ledger) -> Self {
        Self::derive(ledger, Side::Debit)
    }

    pub fn credit(ledger: &Ledger) -> Self {
        Self::derive(ledger, Side::Credit)
    }

    /// Header row: the six shared columns plus this side's marker and amount.
    pub fn headers(&self) -> [&'static str; 8] {
        let (marker, amount) = self.side.kept_columns();
        let mut headers = [""; 8];
        headers[..=ADDITIONAL_INFO_COLUMN].copy_from_slice(&COLUMNS[..=ADDITIONAL_INFO_COLUMN]);
        headers[6] = COLUMNS[marker];
        headers[7] = COLUMNS[amount];
        headers
    }
}

fn cmp_amount(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
