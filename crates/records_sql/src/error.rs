//! Mapping of SQLite failures onto record errors.

use records_core::RecordError;
use rusqlite::{ErrorCode, ffi};
use std::fmt;

/// Statement being executed when the backend failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Pragma,
    Lookup,
    Select,
    Drop,
    Create,
    Insert,
    Commit,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Pragma => "pragma",
            Step::Lookup => "table lookup",
            Step::Select => "select",
            Step::Drop => "drop table",
            Step::Create => "create table",
            Step::Insert => "insert",
            Step::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Classifies a backend error raised while running `step` against `table`.
///
/// Foreign key failures become [`RecordError::DropConstraint`] on drop and
/// [`RecordError::ForeignKeyViolation`] on insert. An insert whose parent
/// table does not exist yet is also a foreign key violation.
pub(crate) fn classify(step: Step, table: &str, err: rusqlite::Error) -> RecordError {
    let message = err.to_string();

    match step {
        Step::Drop if is_foreign_key_failure(&err) => RecordError::DropConstraint {
            table: table.to_string(),
            message,
        },
        Step::Insert if is_foreign_key_failure(&err) || is_missing_parent(&err) => {
            RecordError::ForeignKeyViolation {
                table: table.to_string(),
                message,
            }
        }
        _ => RecordError::persistence(format!("{} '{}'", step, table), err),
    }
}

fn is_foreign_key_failure(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, _) => {
            code.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        }
        _ => false,
    }
}

fn is_missing_parent(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, Some(message)) => {
            code.code == ErrorCode::Unknown && message.starts_with("no such table")
        }
        _ => false,
    }
}
