//! # Records XLSX
//!
//! Spreadsheet codec for record collections. A dataset is stored as one
//! workbook with a worksheet per collection; integers are written as numeric
//! cells and booleans as boolean cells, so the file is directly usable in a
//! spreadsheet application.
//!
//! Reading accepts workbooks edited by hand as long as each sheet keeps its
//! columns in declared order and has no gaps in its first column.

mod codec;
mod workbook;

pub use codec::{SpreadsheetCodec, XlsxOptions};
