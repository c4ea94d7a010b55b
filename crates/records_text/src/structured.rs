//! Structured text (JSON) codec.

use records_core::fs::{collection_path, open_existing, write_atomically};
use records_core::{
    Codec, Collection, CollectionRef, EntityType, FieldDef, FieldKind, RecordError, Result,
    format_boolean,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Options for [`StructuredTextCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// File extension, without the dot
    pub extension: String,

    /// Indent output with two spaces. Has no effect on what is read back.
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            extension: "json".to_string(),
            pretty: true,
        }
    }
}

impl JsonOptions {
    /// Sets the file extension.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Enables or disables indentation.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Reads and writes one collection per JSON file.
///
/// The file holds a top-level array of objects keyed by field name. Key
/// order inside an object does not matter on read; extra keys are ignored.
/// Integer fields are written as JSON numbers and boolean fields as JSON
/// booleans.
#[derive(Debug, Clone, Default)]
pub struct StructuredTextCodec {
    options: JsonOptions,
}

impl StructuredTextCodec {
    /// Creates a codec with the given options.
    pub fn new(options: JsonOptions) -> Self {
        Self { options }
    }

    /// Returns the codec options.
    pub fn options(&self) -> &JsonOptions {
        &self.options
    }
}

impl Codec for StructuredTextCodec {
    type Location = Path;

    fn format(&self) -> &'static str {
        "json"
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
        let document: Value = serde_json::from_reader(BufReader::new(file))?;

        let Value::Array(items) = document else {
            return Err(RecordError::malformed(
                entity.name(),
                format!("{} does not hold a top-level array", path.display()),
            ));
        };

        let rows = items
            .iter()
            .enumerate()
            .map(|(index, item)| object_to_row(entity, index, item))
            .collect::<Result<Vec<_>>>()?;

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

        let objects = collection
            .encode_rows()
            .iter()
            .map(|row| row_to_object(&entity, row))
            .collect::<Result<Vec<_>>>()?;
        let document = Value::Array(objects);

        write_atomically(&path, |out| {
            if self.options.pretty {
                serde_json::to_writer_pretty(out, &document)?;
            } else {
                serde_json::to_writer(out, &document)?;
            }
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

fn object_to_row(entity: &EntityType, index: usize, item: &Value) -> Result<Vec<String>> {
    let Value::Object(object) = item else {
        return Err(RecordError::malformed(
            entity.name(),
            format!("element {} is not an object", index),
        ));
    };

    entity
        .fields()
        .iter()
        .map(|field| value_to_token(entity, index, field, object.get(field.name)))
        .collect()
}

fn value_to_token(
    entity: &EntityType,
    index: usize,
    field: &FieldDef,
    value: Option<&Value>,
) -> Result<String> {
    let token = match (field.kind, value) {
        (FieldKind::Text, Some(Value::String(s))) => Some(s.clone()),
        (FieldKind::Integer, Some(Value::Number(n))) => n.as_i64().map(|n| n.to_string()),
        (FieldKind::Boolean, Some(Value::Bool(b))) => Some(format_boolean(*b)),
        (FieldKind::Boolean, Some(Value::Number(n))) => match n.as_i64() {
            Some(0) => Some(format_boolean(false)),
            Some(1) => Some(format_boolean(true)),
            _ => None,
        },
        (FieldKind::Integer | FieldKind::Boolean, Some(Value::String(s))) if field.kind.accepts(s) => {
            Some(s.clone())
        }
        _ => None,
    };

    token.ok_or_else(|| {
        let found = match value {
            None => "nothing".to_string(),
            Some(v) => v.to_string(),
        };
        RecordError::malformed(
            entity.name(),
            format!(
                "element {}: field '{}' expects {}, found {}",
                index, field.name, field.kind, found
            ),
        )
    })
}

fn row_to_object(entity: &EntityType, row: &[String]) -> Result<Value> {
    let mut object = Map::with_capacity(row.len());
    for (field, token) in entity.fields().iter().zip(row) {
        object.insert(field.name.to_string(), token_to_value(entity, field, token)?);
    }
    Ok(Value::Object(object))
}

fn token_to_value(entity: &EntityType, field: &FieldDef, token: &str) -> Result<Value> {
    let malformed = || {
        RecordError::malformed(
            entity.name(),
            format!("field '{}' encoded as '{}', not {}", field.name, token, field.kind),
        )
    };

    match field.kind {
        FieldKind::Text => Ok(Value::String(token.to_string())),
        FieldKind::Integer => token
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| malformed()),
        FieldKind::Boolean if field.kind.accepts(token) => Ok(Value::Bool(token == "1")),
        FieldKind::Boolean => Err(malformed()),
    }
}
