//! Delimited text codec.

use records_core::fs::{collection_path, open_existing, write_atomically};
use records_core::{Codec, Collection, CollectionRef, EntityType, RecordError, Result};
use serde::{Deserialize, Serialize};
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Options for [`DelimitedTextCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// File extension, without the dot
    pub extension: String,

    /// Field delimiter, must be a single-byte character
    pub delimiter: char,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            extension: "csv".to_string(),
            delimiter: ';',
        }
    }
}

impl CsvOptions {
    /// Sets the file extension.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                RecordError::UnsupportedFormat(format!(
                    "CSV delimiter '{}' is not a single-byte character",
                    self.delimiter
                ))
            })
    }
}

/// Reads and writes one collection per delimited text file.
///
/// Columns are matched by position. The header row is written from the
/// declared field names but is not checked on read: a file whose columns
/// were reordered decodes into the wrong fields (or fails to decode).
#[derive(Debug, Clone, Default)]
pub struct DelimitedTextCodec {
    options: CsvOptions,
}

impl DelimitedTextCodec {
    /// Creates a codec with the given options.
    pub fn new(options: CsvOptions) -> Self {
        Self { options }
    }

    /// Returns the codec options.
    pub fn options(&self) -> &CsvOptions {
        &self.options
    }
}

impl Codec for DelimitedTextCodec {
    type Location = Path;

    fn format(&self) -> &'static str {
        "csv"
    }

    fn read_collection(
        &self,
        entity: &EntityType,
        location: &Path,
        name: Option<&str>,
    ) -> Result<Collection> {
        let path = collection_path(location, entity.resolve_name(name), &self.options.extension);
        debug!("Reading {} from {}", entity.name(), path.display());

        let file = open_existing(&path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter_byte()?)
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers().map_err(csv_error)?;
        if !headers.iter().eq(entity.field_names()) {
            debug!(
                "Header of {} differs from declared fields, reading by position",
                path.display()
            );
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        info!("Read {} {} records from {}", rows.len(), entity.name(), path.display());
        entity.decode_rows(rows)
    }

    fn write_collection(
        &self,
        collection: CollectionRef<'_>,
        location: &Path,
        name: Option<&str>,
    ) -> Result<()> {
        let entity = collection.entity_type();
        let path = collection_path(location, entity.resolve_name(name), &self.options.extension);
        let delimiter = self.options.delimiter_byte()?;

        write_atomically(&path, |out| {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(out);

            writer
                .write_record(entity.field_names())
                .map_err(csv_error)?;
            for row in collection.encode_rows() {
                writer.write_record(&row).map_err(csv_error)?;
            }
            writer.flush()?;
            Ok(())
        })?;

        info!(
            "Wrote {} {} records to {}",
            collection.len(),
            entity.name(),
            path.display()
        );
        Ok(())
    }
}

fn csv_error(err: csv::Error) -> RecordError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(io) = err.into_kind() {
            return RecordError::Io(io);
        }
        return RecordError::codec("csv", "I/O failure");
    }
    RecordError::codec("csv", err)
}
