//! `.xlsx` workbook writer: one worksheet per sheet, bold header row,
//! dates formatted `dd/mm/yyyy`, nulls left as empty cells.

use chrono::Datelike;
use ledger_core::coerce::format_day_first;
use ledger_core::{LedgerError, Result};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};
use std::path::Path;

use crate::sheets::{Sheet, SheetCell};

/// Write `sheets` into a new workbook at `path`, replacing any existing file.
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<()> {
    build_workbook(sheets)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|e| LedgerError::Workbook(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), sheets = sheets.len(), "wrote workbook");
    Ok(())
}

/// Serialize `sheets` into an in-memory `.xlsx` file.
pub fn workbook_bytes(sheets: &[Sheet]) -> Result<Vec<u8>> {
    build_workbook(sheets)
        .and_then(|mut workbook| workbook.save_to_buffer())
        .map_err(|e| LedgerError::Workbook(e.to_string()))
}

fn build_workbook(sheets: &[Sheet]) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");

    for sheet in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(sheet.name)?;

        for (col, header) in sheet.headers.iter().enumerate() {
            ws.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, row) in sheet.rows.iter().enumerate() {
            let r = i as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                let c = col as u16;
                match cell {
                    SheetCell::Empty => {}
                    SheetCell::Text(s) => {
                        ws.write_string(r, c, s.as_str())?;
                    }
                    SheetCell::Integer(v) => {
                        ws.write_number(r, c, *v as f64)?;
                    }
                    SheetCell::Number(v) => {
                        ws.write_number(r, c, *v)?;
                    }
                    SheetCell::Date(d) => {
                        // Excel cannot represent dates before 1900; keep those as text.
                        match excel_date(*d) {
                            Some(dt) => {
                                ws.write_datetime_with_format(r, c, &dt, &date_format)?;
                            }
                            None => {
                                ws.write_string(r, c, format_day_first(*d))?;
                            }
                        }
                    }
                }
            }
        }

        ws.autofit();
    }

    Ok(workbook)
}

fn excel_date(d: chrono::NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(d.year()).ok()?;
    ExcelDateTime::from_ymd(year, d.month() as u8, d.day() as u8).ok()
}
