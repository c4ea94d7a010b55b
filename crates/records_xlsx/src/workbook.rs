//! In-memory workbook model.
//!
//! Workbooks are read whole with calamine and written whole with
//! rust_xlsxwriter, so a single collection can replace its sheet while the
//! other sheets of the file are carried over.

use calamine::{Data, Reader, Xlsx};
use records_core::fs::{open_existing, write_atomically};
use records_core::{RecordError, Result};
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Largest magnitude an integer can have and still be stored exactly as a
/// numeric cell.
const MAX_EXACT_INTEGER: i64 = 1 << 53;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Cell {
    /// Renders the cell as a record token.
    ///
    /// Whole numbers lose their fractional part and booleans become `1`/`0`.
    pub(crate) fn token(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Integer(n) => n.to_string(),
            Cell::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER as f64 => {
                (*f as i64).to_string()
            }
            Cell::Float(f) => f.to_string(),
            Cell::Boolean(b) => records_core::format_boolean(*b),
        }
    }

    pub(crate) fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(n) => Cell::Integer(*n),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Boolean(*b),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// A named grid of cells, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sheet {
    pub(crate) name: String,
    pub(crate) rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }
}

/// An ordered set of sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Loads every sheet of the workbook at `path`.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let file = open_existing(path)?;
        let mut source: Xlsx<_> = Xlsx::new(BufReader::new(file)).map_err(xlsx_error)?;

        let mut sheets = Vec::new();
        for name in source.sheet_names() {
            let range = source.worksheet_range(&name).map_err(xlsx_error)?;
            let mut sheet = Sheet::new(name);

            if let Some((last_row, last_col)) = range.end() {
                for row in 0..=last_row {
                    let cells: Vec<Cell> = (0..=last_col)
                        .map(|col| {
                            range
                                .get_value((row, col))
                                .map(Cell::from_data)
                                .unwrap_or(Cell::Empty)
                        })
                        .collect();
                    sheet.rows.push(cells);
                }
            }
            sheets.push(sheet);
        }

        debug!("Loaded {} sheets from {}", sheets.len(), path.display());
        Ok(Self { sheets })
    }

    pub(crate) fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub(crate) fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    /// Replaces the sheet of the same name in place, or appends it.
    pub(crate) fn put_sheet(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    /// Serializes the workbook and writes it over `path`.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let mut output = rust_xlsxwriter::Workbook::new();

        for sheet in &self.sheets {
            let worksheet = output.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(xlsx_error)?;

            for (row_index, row) in sheet.rows.iter().enumerate() {
                let row_number = u32::try_from(row_index)
                    .map_err(|_| RecordError::codec("xlsx", "row index out of range"))?;
                for (col_index, cell) in row.iter().enumerate() {
                    let col_number = u16::try_from(col_index)
                        .map_err(|_| RecordError::codec("xlsx", "column index out of range"))?;
                    match cell {
                        Cell::Empty => {}
                        Cell::Text(text) => {
                            worksheet
                                .write_string(row_number, col_number, text)
                                .map_err(xlsx_error)?;
                        }
                        Cell::Integer(n) if n.unsigned_abs() <= MAX_EXACT_INTEGER as u64 => {
                            worksheet
                                .write_number(row_number, col_number, *n as f64)
                                .map_err(xlsx_error)?;
                        }
                        Cell::Integer(n) => {
                            worksheet
                                .write_string(row_number, col_number, n.to_string())
                                .map_err(xlsx_error)?;
                        }
                        Cell::Float(f) => {
                            worksheet
                                .write_number(row_number, col_number, *f)
                                .map_err(xlsx_error)?;
                        }
                        Cell::Boolean(b) => {
                            worksheet
                                .write_boolean(row_number, col_number, *b)
                                .map_err(xlsx_error)?;
                        }
                    }
                }
            }
        }

        let buffer = output.save_to_buffer().map_err(xlsx_error)?;
        write_atomically(path, |out| {
            out.write_all(&buffer)?;
            Ok(())
        })
    }
}

fn xlsx_error<E>(err: E) -> RecordError
where
    E: std::error::Error + Send + Sync + 'static,
{
    RecordError::codec("xlsx", err)
}
