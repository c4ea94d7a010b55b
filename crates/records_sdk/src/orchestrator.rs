//! Format-agnostic dataset loading and saving.

use crate::{Format, HandlerConfig};
use records_core::{Codec, Dataset, RecordError, Result};
use records_sql::RelationalCodec;
use records_text::{DelimitedTextCodec, StructuredTextCodec};
use records_xlsx::SpreadsheetCodec;
use rusqlite::Connection;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Where a dataset is read from or written to.
///
/// Both variants borrow a resource owned by the caller.
#[derive(Clone, Copy)]
pub enum Location<'a> {
    /// Directory holding one file per collection, or the workbook
    Directory(&'a Path),
    /// Open SQLite connection
    Database(&'a Connection),
}

impl fmt::Debug for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Directory(path) => f.debug_tuple("Directory").field(path).finish(),
            Location::Database(_) => f.write_str("Database"),
        }
    }
}

impl<'a> From<&'a Path> for Location<'a> {
    fn from(path: &'a Path) -> Self {
        Location::Directory(path)
    }
}

impl<'a> From<&'a Connection> for Location<'a> {
    fn from(conn: &'a Connection) -> Self {
        Location::Database(conn)
    }
}

impl Location<'_> {
    fn directory(&self, format: Format) -> Result<&Path> {
        match self {
            Location::Directory(path) => Ok(*path),
            Location::Database(_) => Err(mismatch(format, "a database connection")),
        }
    }

    fn database(&self, format: Format) -> Result<&Connection> {
        match self {
            Location::Database(conn) => Ok(*conn),
            Location::Directory(path) => Err(mismatch(
                format,
                &format!("directory {}", path.display()),
            )),
        }
    }
}

fn mismatch(format: Format, location: &str) -> RecordError {
    RecordError::UnsupportedFormat(format!("{} datasets cannot be stored in {}", format, location))
}

/// Loads and saves datasets in any supported format.
///
/// The orchestrator only picks and configures a codec; every read and write
/// is delegated unchanged, so errors surface exactly as the codec raised
/// them.
///
/// # Example
///
/// ```no_run
/// use records_delivery::DeliveryDataset;
/// use records_sdk::{DatasetOrchestrator, Format, HandlerConfig};
/// use rusqlite::Connection;
/// use std::path::Path;
///
/// let orchestrator = DatasetOrchestrator::new(HandlerConfig::default());
/// let dataset: DeliveryDataset =
///     orchestrator.load(Format::Csv, Path::new("exports").into())?;
///
/// let conn = Connection::open("delivery.db")?;
/// orchestrator.save(Format::Sql, &dataset, (&conn).into())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatasetOrchestrator {
    config: HandlerConfig,
}

impl DatasetOrchestrator {
    /// Creates an orchestrator whose codecs use `config`.
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    /// Returns the handler configuration.
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Loads a dataset of type `D` stored as `format` at `location`.
    pub fn load<D: Dataset>(&self, format: Format, location: Location<'_>) -> Result<D> {
        match format {
            Format::Csv => self.load_with(
                &DelimitedTextCodec::new(self.config.csv.clone()),
                location.directory(format)?,
            ),
            Format::Json => self.load_with(
                &StructuredTextCodec::new(self.config.json.clone()),
                location.directory(format)?,
            ),
            Format::Xlsx => self.load_with(
                &SpreadsheetCodec::new(self.config.xlsx.clone()),
                location.directory(format)?,
            ),
            Format::Sql => self.load_with(
                &RelationalCodec::new(self.config.sql.clone()),
                location.database(format)?,
            ),
        }
    }

    /// Saves `dataset` as `format` at `location`, replacing what was there.
    pub fn save<D: Dataset>(
        &self,
        format: Format,
        dataset: &D,
        location: Location<'_>,
    ) -> Result<()> {
        match format {
            Format::Csv => self.save_with(
                &DelimitedTextCodec::new(self.config.csv.clone()),
                dataset,
                location.directory(format)?,
            ),
            Format::Json => self.save_with(
                &StructuredTextCodec::new(self.config.json.clone()),
                dataset,
                location.directory(format)?,
            ),
            Format::Xlsx => self.save_with(
                &SpreadsheetCodec::new(self.config.xlsx.clone()),
                dataset,
                location.directory(format)?,
            ),
            Format::Sql => self.save_with(
                &RelationalCodec::new(self.config.sql.clone()),
                dataset,
                location.database(format)?,
            ),
        }
    }

    /// Loads from a format token and a path.
    ///
    /// File formats treat `path` as the dataset directory. The relational
    /// format opens the SQLite database file at `path` for the duration of
    /// the call.
    pub fn load_path<D: Dataset>(&self, token: &str, path: &Path) -> Result<D> {
        let format: Format = token.parse()?;
        if format.is_file_based() {
            return self.load(format, Location::Directory(path));
        }

        let conn = open_database(path)?;
        self.load(format, Location::Database(&conn))
    }

    /// Saves to a format token and a path, see [`Self::load_path`].
    pub fn save_path<D: Dataset>(&self, token: &str, dataset: &D, path: &Path) -> Result<()> {
        let format: Format = token.parse()?;
        if format.is_file_based() {
            return self.save(format, dataset, Location::Directory(path));
        }

        let conn = open_database(path)?;
        self.save(format, dataset, Location::Database(&conn))
    }

    /// Loads a dataset through an explicitly constructed codec.
    pub fn load_with<C, D>(&self, codec: &C, location: &C::Location) -> Result<D>
    where
        C: Codec,
        D: Dataset,
    {
        info!("Loading dataset as {}", codec.format());
        codec.read_dataset(location)
    }

    /// Saves a dataset through an explicitly constructed codec.
    pub fn save_with<C, D>(&self, codec: &C, dataset: &D, location: &C::Location) -> Result<()>
    where
        C: Codec,
        D: Dataset,
    {
        info!("Saving dataset as {}", codec.format());
        codec.write_dataset(dataset, location)
    }
}

fn open_database(path: &Path) -> Result<Connection> {
    Connection::open(path)
        .map_err(|err| RecordError::persistence(format!("open {}", path.display()), err))
}
