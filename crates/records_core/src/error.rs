//! Error types for record codecs.
//!
//! Every codec reports failures through [`RecordError`]. Codecs never recover
//! from an error: whatever the backend reports surfaces to the caller, tagged
//! with the kind of failure so callers can decide whether to retry.

use thiserror::Error;

/// Boxed error used to carry a backend failure as a source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Main error type for record operations.
#[derive(Error, Debug)]
pub enum RecordError {
    /// Token count or token type does not match the entity's declared fields
    #[error("Malformed {entity} record: {message}")]
    MalformedRecord {
        /// Rust type name of the entity being decoded
        entity: String,
        /// What was wrong with the tokens
        message: String,
    },

    /// Collections do not line up with the dataset's declared entity types
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Missing file, sheet or table
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// An insert referenced a row that does not exist in the parent table
    #[error("Foreign key violation while writing '{table}': {message}")]
    ForeignKeyViolation {
        /// Table being written
        table: String,
        /// Backend message
        message: String,
    },

    /// A table could not be dropped because other rows still reference it
    #[error("Cannot drop '{table}', it is still referenced: {message}")]
    DropConstraint {
        /// Table being dropped
        table: String,
        /// Backend message
        message: String,
    },

    /// Generic relational backend failure
    #[error("Persistence error ({context}): {source}")]
    Persistence {
        /// Statement or step that failed
        context: String,
        /// Backend error
        #[source]
        source: BoxError,
    },

    /// Encoding or decoding failure inside a file format library
    #[error("{format} codec error: {source}")]
    Codec {
        /// Format identifier (e.g. "csv", "xlsx")
        format: &'static str,
        /// Library error
        #[source]
        source: BoxError,
    },

    /// Unknown format token or a format paired with the wrong location
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RecordError {
    /// Creates a malformed record error.
    pub fn malformed(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Creates a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch(message.into())
    }

    /// Creates a resource not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::ResourceNotFound(resource.into())
    }

    /// Wraps a backend failure.
    pub fn persistence(
        context: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Persistence {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Wraps a format library failure.
    pub fn codec(format: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Codec {
            format,
            source: source.into(),
        }
    }
}
