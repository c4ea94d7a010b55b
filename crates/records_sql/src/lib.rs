//! # Records SQL
//!
//! Relational codec for record collections, backed by SQLite.
//!
//! The connection is owned by the caller: the codec never opens or closes
//! it. Before each write it sets the `foreign_keys` pragma to match
//! [`SqlOptions::enforce_foreign_keys`], outside of any transaction.
//!
//! ## Errors
//!
//! Backend failures are classified by the statement that raised them:
//!
//! - a `DROP TABLE` refused because other rows still reference the table is
//!   a [`RecordError::DropConstraint`](records_core::RecordError::DropConstraint)
//! - an insert that references a missing parent row (or parent table) is a
//!   [`RecordError::ForeignKeyViolation`](records_core::RecordError::ForeignKeyViolation)
//! - everything else is a
//!   [`RecordError::Persistence`](records_core::RecordError::Persistence)

mod codec;
mod error;

pub use codec::{RelationalCodec, SqlOptions};
