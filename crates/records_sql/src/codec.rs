//! Relational codec over an externally owned SQLite connection.

use crate::error::{Step, classify};
use records_core::{
    Codec, Collection, CollectionRef, Dataset, EntityType, FieldDef, FieldKind, RecordError,
    Result, check_dependency_order,
};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params_from_iter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Bound parameters a single SQLite statement may carry.
const MAX_VARIABLES: usize = 32_766;

/// Options for [`RelationalCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlOptions {
    /// Drop and recreate each table before inserting into it
    pub create_tables: bool,

    /// Switch SQLite foreign key enforcement on (or off) before writing
    pub enforce_foreign_keys: bool,

    /// Maximum rows per `INSERT` statement, further capped by the parameter limit
    pub batch_rows: usize,
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self {
            create_tables: true,
            enforce_foreign_keys: true,
            batch_rows: MAX_VARIABLES,
        }
    }
}

impl SqlOptions {
    /// Enables or disables table recreation.
    pub fn create_tables(mut self, create_tables: bool) -> Self {
        self.create_tables = create_tables;
        self
    }

    /// Enables or disables foreign key enforcement.
    pub fn enforce_foreign_keys(mut self, enforce: bool) -> Self {
        self.enforce_foreign_keys = enforce;
        self
    }

    /// Sets the number of rows per `INSERT` statement.
    pub fn batch_rows(mut self, batch_rows: usize) -> Self {
        self.batch_rows = batch_rows;
        self
    }
}

/// Reads and writes collections as tables of a SQLite database.
///
/// Tables are named after the collection and created from the entity's
/// declared fields. Each collection write runs in its own transaction:
/// the table is dropped and recreated (when [`SqlOptions::create_tables`]
/// is set), then filled with multi-row `INSERT` statements and committed.
///
/// Dataset writes drop every table in reverse dependency order before
/// recreating and filling them in forward order, so foreign keys between
/// collections are satisfiable at every step.
///
/// # Example
///
/// ```rust
/// use records_core::Codec;
/// use records_delivery::{DeliveryDataset, Person};
/// use records_sql::RelationalCodec;
/// use rusqlite::Connection;
///
/// let conn = Connection::open_in_memory()?;
/// let codec = RelationalCodec::default();
///
/// let mut dataset = DeliveryDataset::default();
/// dataset.people.push(Person {
///     id: "P1".into(),
///     name: "Ada".into(),
///     address: "1 Main St".into(),
///     age: 36,
///     male: false,
/// });
///
/// codec.write_dataset(&dataset, &conn)?;
/// let loaded: DeliveryDataset = codec.read_dataset(&conn)?;
/// assert_eq!(loaded, dataset);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelationalCodec {
    options: SqlOptions,
}

impl RelationalCodec {
    /// Creates a codec with the given options.
    pub fn new(options: SqlOptions) -> Self {
        Self { options }
    }

    /// Returns the codec options.
    pub fn options(&self) -> &SqlOptions {
        &self.options
    }

    fn prepare_connection(&self, conn: &Connection) -> Result<()> {
        let pragma = if self.options.enforce_foreign_keys {
            "PRAGMA foreign_keys = ON"
        } else {
            "PRAGMA foreign_keys = OFF"
        };
        conn.execute_batch(pragma)
            .map_err(|err| classify(Step::Pragma, "foreign_keys", err))
    }

    fn rows_per_statement(&self, width: usize) -> usize {
        self.options
            .batch_rows
            .min(MAX_VARIABLES / width.max(1))
            .max(1)
    }

    fn insert_rows(
        &self,
        conn: &Connection,
        entity: &EntityType,
        table: &str,
        rows: &[Vec<String>],
    ) -> Result<()> {
        let fields = entity.fields();
        let per_statement = self.rows_per_statement(fields.len());

        for chunk in rows.chunks(per_statement) {
            let sql = insert_statement(table, &entity.field_names(), chunk.len());
            let values = chunk
                .iter()
                .flat_map(|row| fields.iter().zip(row))
                .map(|(field, token)| to_value(entity, field, token))
                .collect::<Result<Vec<_>>>()?;

            let mut statement = conn
                .prepare_cached(&sql)
                .map_err(|err| classify(Step::Insert, table, err))?;
            statement
                .execute(params_from_iter(values))
                .map_err(|err| classify(Step::Insert, table, err))?;
            debug!("Inserted {} rows into {}", chunk.len(), table);
        }

        Ok(())
    }
}

impl Codec for RelationalCodec {
    type Location = Connection;

    fn format(&self) -> &'static str {
        "sql"
    }

    fn read_collection(
        &self,
        entity: &EntityType,
        conn: &Connection,
        name: Option<&str>,
    ) -> Result<Collection> {
        let table = entity.resolve_name(name);
        if !table_exists(conn, table)? {
            return Err(RecordError::not_found(format!("table '{}'", table)));
        }

        let sql = format!("SELECT * FROM {}", table);
        let mut statement = conn
            .prepare(&sql)
            .map_err(|err| classify(Step::Select, table, err))?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let raw_rows = statement
            .query_map([], |row| {
                (0..row.as_ref().column_count())
                    .map(|index| row.get::<_, Value>(index))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(|err| classify(Step::Select, table, err))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|err| classify(Step::Select, table, err))?;

        // Columns are matched to fields by position, never by name.
        let rows = raw_rows
            .into_iter()
            .map(|values| {
                values
                    .into_iter()
                    .zip(&columns)
                    .map(|(value, column)| to_token(entity, column, value))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Read {} {} records from table {}", rows.len(), entity.name(), table);
        entity.decode_rows(rows)
    }

    fn write_collection(
        &self,
        collection: CollectionRef<'_>,
        conn: &Connection,
        name: Option<&str>,
    ) -> Result<()> {
        let entity = collection.entity_type();
        let table = entity.resolve_name(name);
        self.prepare_connection(conn)?;

        let tx = conn
            .unchecked_transaction()
            .map_err(|err| classify(Step::Commit, table, err))?;

        if self.options.create_tables {
            drop_table(&tx, table)?;
            tx.execute_batch(&entity.create_table(table))
                .map_err(|err| classify(Step::Create, table, err))?;
        } else if !table_exists(&tx, table)? {
            return Err(RecordError::not_found(format!("table '{}'", table)));
        }

        self.insert_rows(&tx, &entity, table, &collection.encode_rows())?;
        tx.commit()
            .map_err(|err| classify(Step::Commit, table, err))?;

        info!(
            "Wrote {} {} records to table {}",
            collection.len(),
            entity.name(),
            table
        );
        Ok(())
    }

    /// Replaces every declared table of the dataset.
    ///
    /// Tables are dropped dependents first, then recreated and filled
    /// dependencies first. A dataset whose declared order is not a dependency
    /// order is still attempted; the backend then rejects it with a foreign
    /// key error.
    fn write_dataset<D: Dataset>(&self, dataset: &D, conn: &Connection) -> Result<()> {
        let types = D::entity_types();
        if let Err(err) = check_dependency_order(&types) {
            warn!("Writing dataset in an order that breaks its foreign keys: {}", err);
        }
        info!("Writing {} tables", types.len());

        if self.options.create_tables {
            self.prepare_connection(conn)?;
            let tx = conn
                .unchecked_transaction()
                .map_err(|err| classify(Step::Commit, "dataset", err))?;
            for ty in types.iter().rev() {
                drop_table(&tx, ty.collection_name())?;
            }
            tx.commit()
                .map_err(|err| classify(Step::Commit, "dataset", err))?;
        }

        for ty in &types {
            match dataset.collection_for(ty) {
                Some(collection) => {
                    self.write_collection(collection, conn, Some(ty.collection_name()))?
                }
                None => {
                    let empty = ty.empty()?;
                    self.write_collection(empty.view(), conn, Some(ty.collection_name()))?
                }
            }
        }

        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|err| classify(Step::Lookup, table, err))
}

fn drop_table(conn: &Connection, table: &str) -> Result<()> {
    debug!("Dropping table {}", table);
    conn.execute_batch(&format!("DROP TABLE IF EXISTS {}", table))
        .map_err(|err| classify(Step::Drop, table, err))
}

/// Renders `INSERT INTO table (..) VALUES (?, ..), ..` for `rows` rows.
fn insert_statement(table: &str, columns: &[&str], rows: usize) -> String {
    let placeholders = format!("({})", vec!["?"; columns.len()].join(", "));
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        columns.join(", "),
        vec![placeholders; rows].join(", ")
    )
}

fn to_value(entity: &EntityType, field: &FieldDef, token: &str) -> Result<Value> {
    let malformed = || {
        RecordError::malformed(
            entity.name(),
            format!("field '{}' encoded as '{}', not {}", field.name, token, field.kind),
        )
    };

    match field.kind {
        FieldKind::Text => Ok(Value::Text(token.to_string())),
        FieldKind::Integer => token.parse().map(Value::Integer).map_err(|_| malformed()),
        FieldKind::Boolean if field.kind.accepts(token) => {
            Ok(Value::Integer(i64::from(token == "1")))
        }
        FieldKind::Boolean => Err(malformed()),
    }
}

fn to_token(entity: &EntityType, column: &str, value: Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Integer(n) => Ok(n.to_string()),
        Value::Real(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Ok((f as i64).to_string())
        }
        Value::Real(f) => Ok(f.to_string()),
        Value::Text(text) => Ok(text),
        Value::Blob(_) => Err(RecordError::malformed(
            entity.name(),
            format!("column '{}' holds a blob", column),
        )),
    }
}
