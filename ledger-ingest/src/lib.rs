//! ledger-ingest: raw extracted tables in, cleaned statement ledger out.

pub mod cleaner;
pub mod sources;
pub mod stages;
pub mod types;

pub use cleaner::{clean, CleanOptions, CleanOutput, CleanReport, Cleaner};
pub use sources::load_pages;
pub use types::{Cells, RawTable};
