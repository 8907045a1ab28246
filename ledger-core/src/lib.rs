//! ledger-core: statement ledger schema, lossy cell coercion and debit/credit views

pub mod coerce;
pub mod error;
pub mod ledger;
pub mod views;

pub use coerce::{parse_day_first_date, parse_integer, parse_number, CoercionStats};
pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerRow, COLUMNS, SCHEMA_WIDTH};
pub use views::{LedgerView, Side, Trailer, ViewRow, TRAILER_LABEL};
