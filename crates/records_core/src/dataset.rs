//! The dataset contract.
//!
//! A dataset owns one collection per declared entity type. The declared type
//! list is a dependency order: a type that references another type through a
//! foreign key always comes after it.

use crate::{Collection, CollectionRef, Entity, EntityType, RecordError, Result};
use std::collections::HashSet;

/// Capability set of a collection of collections.
pub trait Dataset: Sized {
    /// Entity types in dependency order, leaves first.
    fn entity_types() -> Vec<EntityType>;

    /// Borrows every collection the dataset holds.
    fn collections(&self) -> Vec<CollectionRef<'_>>;

    /// Rebuilds a dataset from collections given in `entity_types()` order.
    ///
    /// Fails with [`RecordError::SchemaMismatch`] when the number of
    /// collections or their types do not match the declared types.
    fn from_collections(collections: Vec<Collection>) -> Result<Self>;

    /// Borrows the collection of `entity`, if the dataset holds one.
    ///
    /// Codecs treat a missing collection as an empty one.
    fn collection_for(&self, entity: &EntityType) -> Option<CollectionRef<'_>> {
        self.collections()
            .into_iter()
            .find(|c| c.entity_type() == *entity)
    }
}

/// Hands out typed collections in declared order inside
/// [`Dataset::from_collections`] implementations.
///
/// # Example
///
/// ```rust,ignore
/// fn from_collections(collections: Vec<Collection>) -> Result<Self> {
///     let mut cursor = CollectionCursor::new::<Self>(collections)?;
///     Ok(Self {
///         people: cursor.take()?,
///         orders: cursor.take()?,
///     })
/// }
/// ```
pub struct CollectionCursor {
    collections: std::vec::IntoIter<Collection>,
    position: usize,
}

impl CollectionCursor {
    /// Creates a cursor, failing if the count differs from `D::entity_types()`.
    pub fn new<D: Dataset>(collections: Vec<Collection>) -> Result<Self> {
        let expected = D::entity_types().len();
        if collections.len() != expected {
            return Err(RecordError::schema_mismatch(format!(
                "expected {} collections, got {}",
                expected,
                collections.len()
            )));
        }

        Ok(Self {
            collections: collections.into_iter(),
            position: 0,
        })
    }

    /// Takes the next collection as records of `E`.
    pub fn take<E: Entity>(&mut self) -> Result<Vec<E>> {
        let position = self.position;
        let collection = self.collections.next().ok_or_else(|| {
            RecordError::schema_mismatch(format!("no collection at position {}", position))
        })?;
        self.position += 1;

        collection.into_records::<E>().map_err(|err| {
            RecordError::schema_mismatch(format!("position {}: {}", position, err))
        })
    }
}

/// Checks that `types` is a dependency order.
///
/// Every foreign key must point at a collection declared earlier in the list
/// (or at its own collection).
pub fn check_dependency_order(types: &[EntityType]) -> Result<()> {
    let mut seen: HashSet<&'static str> = HashSet::new();

    for ty in types {
        let own = ty.collection_name();
        for field in ty.fields() {
            if let Some(fk) = &field.references {
                if fk.table != own && !seen.contains(fk.table) {
                    return Err(RecordError::schema_mismatch(format!(
                        "{}.{} references '{}', which is not declared before '{}'",
                        own, field.name, fk.table, own
                    )));
                }
            }
        }
        seen.insert(own);
    }

    Ok(())
}
