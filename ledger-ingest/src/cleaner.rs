//! The ledger cleaner: raw extracted pages in, cleaned ledger plus debit and
//! credit views out.
//!
//! Pure and deterministic; no file or network I/O happens here.

use ledger_core::{CoercionStats, Ledger, LedgerRow, LedgerView, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::stages::{self, PhraseMatcher};
use crate::types::RawTable;

/// Phrases the noise filters look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Page-break marker inserted by the extractor (matched in any cell)
    pub page_marker: String,
    /// Repeated header fragment (matched in the `No.` column)
    pub header_marker: String,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            page_marker: "table from page".to_string(),
            header_marker: "Additional".to_string(),
        }
    }
}

/// What each stage did to the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub source: String,
    pub pages: usize,
    /// Rows in the concatenated table before any removal
    pub input_rows: usize,
    pub page_markers: usize,
    pub blank_rows: usize,
    pub header_rows: usize,
    pub continuations_merged: usize,
    /// Rows whose every cell failed to parse, dropped after coercion
    pub unreadable_rows: usize,
    pub ledger_rows: usize,
    pub coercion: CoercionStats,
}

impl CleanReport {
    /// Rows removed by every stage, including unreadable rows dropped after coercion.
    pub fn rows_removed(&self) -> usize {
        self.page_markers
            + self.blank_rows
            + self.header_rows
            + self.continuations_merged
            + self.unreadable_rows
    }
}

/// Everything one cleaning call produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanOutput {
    pub ledger: Ledger,
    pub debit: LedgerView,
    pub credit: LedgerView,
    pub report: CleanReport,
}

#[derive(Debug, Clone)]
pub struct Cleaner {
    page_marker: PhraseMatcher,
    header_marker: PhraseMatcher,
}

impl Cleaner {
    pub fn new(options: &CleanOptions) -> Result<Self> {
        Ok(Self {
            page_marker: PhraseMatcher::new(&options.page_marker)?,
            header_marker: PhraseMatcher::new(&options.header_marker)?,
        })
    }

    /// Run every stage over `pages`. `source_name` only labels the report and logs.
    pub fn clean(&self, pages: &[RawTable], source_name: &str) -> Result<CleanOutput> {
        let mut report = CleanReport {
            source: source_name.to_string(),
            pages: pages.len(),
            ..Default::default()
        };

        let mut rows = stages::concatenate(pages)?;
        report.input_rows = rows.len();
        debug!(source = source_name, pages = pages.len(), rows = rows.len(), "concatenated pages");

        report.page_markers = stages::drop_page_markers(&mut rows, &self.page_marker);
        report.blank_rows = stages::drop_blank_rows(&mut rows);
        report.header_rows = stages::drop_header_fragments(&mut rows, &self.header_marker);
        debug!(
            page_markers = report.page_markers,
            blank_rows = report.blank_rows,
            header_rows = report.header_rows,
            "dropped noise rows"
        );

        let (rows, merged) = stages::merge_continuations(rows);
        report.continuations_merged = merged;
        debug!(merged, remaining = rows.len(), "merged continuation rows");

        let mut coercion = CoercionStats::default();
        let mut typed: Vec<LedgerRow> = rows
            .iter()
            .map(|cells| LedgerRow::coerce(cells, &mut coercion))
            .collect();
        let before = typed.len();
        typed.retain(|row| !row.is_blank());
        report.unreadable_rows = before - typed.len();
        if report.unreadable_rows > 0 {
            warn!(rows = report.unreadable_rows, "dropped rows with no readable cell");
        }

        let ledger = Ledger::new(typed);
        report.coercion = coercion;
        report.ledger_rows = ledger.len();
        if coercion.total() > 0 {
            warn!(
                numeric = coercion.numeric_failures,
                dates = coercion.date_failures,
                "cells could not be parsed and were left empty"
            );
        }

        let debit = LedgerView::debit(&ledger);
        let credit = LedgerView::credit(&ledger);

        info!(
            source = source_name,
            rows = ledger.len(),
            removed = report.rows_removed(),
            debits = debit.trailer.count,
            credits = credit.trailer.count,
            "cleaned statement"
        );

        Ok(CleanOutput {
            ledger,
            debit,
            credit,
            report,
        })
    }
}

/// Clean with the default noise phrases.
pub fn clean(pages: &[RawTable], source_name: &str) -> Result<CleanOutput> {
    Cleaner::new(&CleanOptions::default())?.clean(pages, source_name)
}
