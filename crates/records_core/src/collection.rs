//! Type-erased entity collections.
//!
//! Datasets hold several collections of different entity types. Codecs work
//! on them uniformly through [`EntityType`], a descriptor registered per
//! concrete type with [`EntityType::of`], and through the erased
//! [`Collection`] (owned) and [`CollectionRef`] (borrowed) wrappers.

use crate::{Entity, FieldDef, RecordError, Result, entity_name};
use std::any::{Any, TypeId};
use std::fmt;

/// Static descriptor of a concrete entity type.
///
/// Built from monomorphised function pointers, so it is `Copy` and can be
/// listed in a dataset's declared order without any runtime registry.
#[derive(Clone, Copy)]
pub struct EntityType {
    type_id: fn() -> TypeId,
    name: fn() -> &'static str,
    collection_name: fn() -> &'static str,
    fields: fn() -> &'static [FieldDef],
    create_table: fn(&str) -> String,
    decode_rows: fn(Vec<Vec<String>>) -> Result<Collection>,
}

impl EntityType {
    /// Returns the descriptor of `E`.
    pub fn of<E: Entity>() -> Self {
        Self {
            type_id: TypeId::of::<E>,
            name: entity_name::<E>,
            collection_name: E::collection_name,
            fields: E::fields,
            create_table: E::create_table,
            decode_rows: decode_rows::<E>,
        }
    }

    /// Returns true if this descriptor belongs to `E`.
    pub fn is<E: Entity>(&self) -> bool {
        (self.type_id)() == TypeId::of::<E>()
    }

    /// Short Rust type name.
    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// Declared collection name.
    pub fn collection_name(&self) -> &'static str {
        (self.collection_name)()
    }

    /// Resolves the storage name: an explicit name wins over the declared one.
    pub fn resolve_name<'a>(&self, name: Option<&'a str>) -> &'a str {
        name.unwrap_or_else(|| self.collection_name())
    }

    /// Declared fields.
    pub fn fields(&self) -> &'static [FieldDef] {
        (self.fields)()
    }

    /// Field names in declared order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields().iter().map(|f| f.name).collect()
    }

    /// `CREATE TABLE` statement under `table`.
    pub fn create_table(&self, table: &str) -> String {
        (self.create_table)(table)
    }

    /// `CREATE TABLE` statement under the declared collection name.
    pub fn schema_statement(&self) -> String {
        self.create_table(self.collection_name())
    }

    /// Decodes token rows into a collection of this type.
    pub fn decode_rows(&self, rows: Vec<Vec<String>>) -> Result<Collection> {
        (self.decode_rows)(rows)
    }

    /// An empty collection of this type.
    pub fn empty(&self) -> Result<Collection> {
        self.decode_rows(Vec::new())
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        (self.type_id)() == (other.type_id)()
    }
}

impl Eq for EntityType {}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityType")
            .field("name", &self.name())
            .field("collection", &self.collection_name())
            .finish()
    }
}

fn decode_rows<E: Entity>(rows: Vec<Vec<String>>) -> Result<Collection> {
    let records = rows
        .iter()
        .map(|row| E::decode(row))
        .collect::<Result<Vec<E>>>()?;
    Ok(Collection::new(records))
}

/// Object-safe view over a `Vec<E>` of some entity type.
pub trait RecordSet: Send + Sync {
    /// Descriptor of the stored entity type.
    fn entity_type(&self) -> EntityType;

    /// Number of records.
    fn len(&self) -> usize;

    /// Returns true if there are no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encodes every record into its token row.
    fn encode_rows(&self) -> Vec<Vec<String>>;

    /// Upcast used for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Owned upcast used for typed extraction.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<E: Entity> RecordSet for Vec<E> {
    fn entity_type(&self) -> EntityType {
        EntityType::of::<E>()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn encode_rows(&self) -> Vec<Vec<String>> {
        self.iter().map(Entity::encode).collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

fn type_mismatch(found: EntityType, wanted: &'static str) -> RecordError {
    RecordError::schema_mismatch(format!(
        "collection holds {} records, requested {}",
        found.name(),
        wanted
    ))
}

/// Owned, type-erased collection of records of one entity type.
pub struct Collection {
    records: Box<dyn RecordSet>,
}

impl Collection {
    /// Wraps a typed collection.
    pub fn new<E: Entity>(records: Vec<E>) -> Self {
        Self {
            records: Box::new(records),
        }
    }

    /// Descriptor of the stored entity type.
    pub fn entity_type(&self) -> EntityType {
        self.records.entity_type()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrows the collection as an erased reference.
    pub fn view(&self) -> CollectionRef<'_> {
        CollectionRef {
            records: &*self.records,
        }
    }

    /// Borrows the typed records.
    pub fn records<E: Entity>(&self) -> Result<&[E]> {
        self.records
            .as_any()
            .downcast_ref::<Vec<E>>()
            .map(Vec::as_slice)
            .ok_or_else(|| type_mismatch(self.entity_type(), entity_name::<E>()))
    }

    /// Moves the typed records out.
    pub fn into_records<E: Entity>(self) -> Result<Vec<E>> {
        let found = self.entity_type();
        self.records
            .into_any()
            .downcast::<Vec<E>>()
            .map(|records| *records)
            .map_err(|_| type_mismatch(found, entity_name::<E>()))
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("entity", &self.entity_type().name())
            .field("len", &self.len())
            .finish()
    }
}

/// Borrowed, type-erased collection.
///
/// Datasets hand these out to codecs for the duration of a write; codecs
/// never keep them.
#[derive(Clone, Copy)]
pub struct CollectionRef<'a> {
    records: &'a dyn RecordSet,
}

impl<'a> CollectionRef<'a> {
    /// Borrows a typed collection.
    pub fn new<E: Entity>(records: &'a Vec<E>) -> Self {
        Self { records }
    }

    /// Descriptor of the stored entity type.
    pub fn entity_type(&self) -> EntityType {
        self.records.entity_type()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Encodes every record into its token row.
    pub fn encode_rows(&self) -> Vec<Vec<String>> {
        self.records.encode_rows()
    }

    /// Borrows the typed records.
    pub fn records<E: Entity>(&self) -> Result<&'a [E]> {
        self.records
            .as_any()
            .downcast_ref::<Vec<E>>()
            .map(Vec::as_slice)
            .ok_or_else(|| type_mismatch(self.entity_type(), entity_name::<E>()))
    }
}

impl fmt::Debug for CollectionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRef")
            .field("entity", &self.entity_type().name())
            .field("len", &self.len())
            .finish()
    }
}
