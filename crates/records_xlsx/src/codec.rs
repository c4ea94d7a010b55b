//! Spreadsheet codec.

use crate::workbook::{Cell, Sheet, Workbook};
use records_core::{
    Codec, Collection, CollectionRef, Dataset, EntityType, FieldKind, RecordError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for [`SpreadsheetCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XlsxOptions {
    /// Workbook file name inside the target directory
    pub file_name: String,

    /// Whether the first row of each sheet holds the field names
    pub heading: bool,
}

impl Default for XlsxOptions {
    fn default() -> Self {
        Self {
            file_name: "dataset.xlsx".to_string(),
            heading: true,
        }
    }
}

impl XlsxOptions {
    /// Sets the workbook file name.
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Enables or disables the heading row.
    pub fn heading(mut self, heading: bool) -> Self {
        self.heading = heading;
        self
    }
}

/// Reads and writes collections as worksheets of a single workbook.
///
/// The location is a directory; the workbook inside it is named by
/// [`XlsxOptions::file_name`]. Each collection lives on the sheet named after
/// it, one record per row, with columns matched by position.
///
/// Data ends at the first row whose first cell is empty. Rows below it are
/// never read, even if they hold values in other columns.
///
/// # Example
///
/// ```no_run
/// use records_core::Codec;
/// use records_delivery::DeliveryDataset;
/// use records_xlsx::{SpreadsheetCodec, XlsxOptions};
/// use std::path::Path;
///
/// let codec = SpreadsheetCodec::new(XlsxOptions::default().file_name("delivery.xlsx"));
/// let dataset: DeliveryDataset = codec.read_dataset(Path::new("/srv/exports"))?;
/// codec.write_dataset(&dataset, Path::new("/srv/backup"))?;
/// # Ok::<(), records_core::RecordError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetCodec {
    options: XlsxOptions,
}

impl SpreadsheetCodec {
    /// Creates a codec with the given options.
    pub fn new(options: XlsxOptions) -> Self {
        Self { options }
    }

    /// Returns the codec options.
    pub fn options(&self) -> &XlsxOptions {
        &self.options
    }

    fn workbook_path(&self, location: &Path) -> PathBuf {
        location.join(&self.options.file_name)
    }

    fn read_sheet(&self, workbook: &Workbook, entity: &EntityType, name: &str) -> Result<Collection> {
        let sheet = workbook.sheet(name).ok_or_else(|| {
            RecordError::not_found(format!(
                "sheet '{}' in {}",
                name, self.options.file_name
            ))
        })?;

        let width = entity.fields().len();
        let skip = usize::from(self.options.heading);
        let mut rows: Vec<Vec<String>> = Vec::new();

        for (index, row) in sheet.rows.iter().enumerate().skip(skip) {
            let first_blank = row.first().is_none_or(Cell::is_blank);
            if first_blank {
                if row.iter().any(|cell| !cell.is_blank()) {
                    warn!(
                        "Sheet '{}' row {} has an empty first cell; ignoring it and every row below",
                        name,
                        index + 1
                    );
                }
                break;
            }

            let tokens: Vec<String> = (0..width)
                .map(|col| row.get(col).map(Cell::token).unwrap_or_default())
                .collect();
            rows.push(tokens);
        }

        debug!("Read {} {} rows from sheet '{}'", rows.len(), entity.name(), name);
        entity.decode_rows(rows)
    }

    fn build_sheet(&self, collection: CollectionRef<'_>, name: &str) -> Result<Sheet> {
        let entity = collection.entity_type();
        let mut sheet = Sheet::new(name);

        if self.options.heading {
            sheet.rows.push(
                entity
                    .field_names()
                    .into_iter()
                    .map(|field| Cell::Text(field.to_string()))
                    .collect(),
            );
        }

        for row in collection.encode_rows() {
            let cells = entity
                .fields()
                .iter()
                .zip(row)
                .map(|(field, token)| match field.kind {
                    FieldKind::Text => Ok(Cell::Text(token)),
                    FieldKind::Integer => token.parse().map(Cell::Integer).map_err(|_| {
                        RecordError::malformed(
                            entity.name(),
                            format!("field '{}' encoded as '{}', not integer", field.name, token),
                        )
                    }),
                    FieldKind::Boolean if field.kind.accepts(&token) => {
                        Ok(Cell::Boolean(token == "1"))
                    }
                    FieldKind::Boolean => Err(RecordError::malformed(
                        entity.name(),
                        format!("field '{}' encoded as '{}', not boolean", field.name, token),
                    )),
                })
                .collect::<Result<Vec<_>>>()?;
            sheet.rows.push(cells);
        }

        Ok(sheet)
    }
}

impl Codec for SpreadsheetCodec {
    type Location = Path;

    fn format(&self) -> &'static str {
        "xlsx"
    }

    fn read_collection(
        &self,
        entity: &EntityType,
        location: &Path,
        name: Option<&str>,
    ) -> Result<Collection> {
        let path = self.workbook_path(location);
        let workbook = Workbook::open(&path)?;
        let collection = self.read_sheet(&workbook, entity, entity.resolve_name(name))?;

        info!(
            "Read {} {} records from {}",
            collection.len(),
            entity.name(),
            path.display()
        );
        Ok(collection)
    }

    /// Replaces one sheet of the workbook, creating the file when absent.
    fn write_collection(
        &self,
        collection: CollectionRef<'_>,
        location: &Path,
        name: Option<&str>,
    ) -> Result<()> {
        let entity = collection.entity_type();
        let path = self.workbook_path(location);

        let mut workbook = match Workbook::open(&path) {
            Ok(workbook) => workbook,
            Err(RecordError::ResourceNotFound(_)) => Workbook::new(),
            Err(err) => return Err(err),
        };
        workbook.put_sheet(self.build_sheet(collection, entity.resolve_name(name))?);
        workbook.save(&path)?;

        info!(
            "Wrote {} {} records to {}",
            collection.len(),
            entity.name(),
            path.display()
        );
        Ok(())
    }

    /// Opens the workbook once and reads every declared sheet from it.
    fn read_dataset<D: Dataset>(&self, location: &Path) -> Result<D> {
        let path = self.workbook_path(location);
        let workbook = Workbook::open(&path)?;
        let types = D::entity_types();
        info!("Reading {} sheets from {}", types.len(), path.display());

        let collections = types
            .iter()
            .map(|ty| self.read_sheet(&workbook, ty, ty.collection_name()))
            .collect::<Result<Vec<_>>>()?;

        D::from_collections(collections)
    }

    /// Builds a fresh workbook holding every declared collection.
    ///
    /// Sheets already in the file that the dataset does not declare are
    /// dropped.
    fn write_dataset<D: Dataset>(&self, dataset: &D, location: &Path) -> Result<()> {
        let path = self.workbook_path(location);
        let types = D::entity_types();
        let mut workbook = Workbook::new();

        for ty in &types {
            let sheet = match dataset.collection_for(ty) {
                Some(collection) => self.build_sheet(collection, ty.collection_name())?,
                None => self.build_sheet(ty.empty()?.view(), ty.collection_name())?,
            };
            workbook.put_sheet(sheet);
        }

        workbook.save(&path)?;
        info!("Wrote {} sheets to {}", types.len(), path.display());
        Ok(())
    }
}
