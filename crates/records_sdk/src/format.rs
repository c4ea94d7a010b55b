//! Storage format identifiers.

use records_core::RecordError;
use std::fmt;
use std::str::FromStr;

/// One of the supported storage representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Delimited text, one file per collection
    Csv,
    /// Structured text, one file per collection
    Json,
    /// Spreadsheet, one worksheet per collection in a single workbook
    Xlsx,
    /// Relational database, one table per collection
    Sql,
}

impl Format {
    /// All formats, file-based ones first.
    pub const ALL: [Format; 4] = [Format::Csv, Format::Json, Format::Xlsx, Format::Sql];

    /// Canonical token for the format.
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xlsx => "xlsx",
            Format::Sql => "sql",
        }
    }

    /// Returns true if the format stores data under a directory.
    pub fn is_file_based(self) -> bool {
        !matches!(self, Format::Sql)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = RecordError;

    /// Parses a format token, ignoring case and surrounding whitespace.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "xlsx" => Ok(Format::Xlsx),
            "sql" | "sqlite" | "mysql" => Ok(Format::Sql),
            other => Err(RecordError::UnsupportedFormat(format!(
                "unknown format '{}', expected one of csv, json, xlsx, sql",
                other
            ))),
        }
    }
}
