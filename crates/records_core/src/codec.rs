//! The shared codec contract.
//!
//! Every storage format implements the same four operations. Formats differ
//! only in wire representation and in what a location is: a directory for
//! file formats, a database connection for the relational backend.

use crate::{Collection, CollectionRef, Dataset, Entity, EntityType, Result};
use tracing::info;

/// Reads and writes entity collections in one storage format.
///
/// Name resolution is the same everywhere: an explicit `name` overrides the
/// entity type's declared collection name.
pub trait Codec {
    /// Where collections live. Borrowed for the duration of one call.
    type Location: ?Sized;

    /// Short format identifier used in logs and errors.
    fn format(&self) -> &'static str;

    /// Reads one collection of `entity`.
    fn read_collection(
        &self,
        entity: &EntityType,
        location: &Self::Location,
        name: Option<&str>,
    ) -> Result<Collection>;

    /// Writes one collection, replacing whatever was stored under the name.
    fn write_collection(
        &self,
        collection: CollectionRef<'_>,
        location: &Self::Location,
        name: Option<&str>,
    ) -> Result<()>;

    /// Reads every declared collection of `D` in dependency order.
    fn read_dataset<D: Dataset>(&self, location: &Self::Location) -> Result<D>
    where
        Self: Sized,
    {
        let types = D::entity_types();
        info!(
            "Reading {} collections as {}",
            types.len(),
            self.format()
        );

        let collections = types
            .iter()
            .map(|ty| self.read_collection(ty, location, Some(ty.collection_name())))
            .collect::<Result<Vec<_>>>()?;

        D::from_collections(collections)
    }

    /// Writes every declared collection of `dataset` in dependency order.
    ///
    /// A declared type the dataset does not hold is written as an empty
    /// collection.
    fn write_dataset<D: Dataset>(&self, dataset: &D, location: &Self::Location) -> Result<()>
    where
        Self: Sized,
    {
        let types = D::entity_types();
        info!("Writing {} collections as {}", types.len(), self.format());

        for ty in &types {
            match dataset.collection_for(ty) {
                Some(collection) => {
                    self.write_collection(collection, location, Some(ty.collection_name()))?
                }
                None => {
                    let empty = ty.empty()?;
                    self.write_collection(empty.view(), location, Some(ty.collection_name()))?
                }
            }
        }

        Ok(())
    }

    /// Typed convenience over [`Codec::read_collection`].
    fn read_records<E: Entity>(
        &self,
        location: &Self::Location,
        name: Option<&str>,
    ) -> Result<Vec<E>>
    where
        Self: Sized,
    {
        self.read_collection(&EntityType::of::<E>(), location, name)?
            .into_records()
    }

    /// Typed convenience over [`Codec::write_collection`].
    fn write_records<E: Entity>(
        &self,
        records: &Vec<E>,
        location: &Self::Location,
        name: Option<&str>,
    ) -> Result<()>
    where
        Self: Sized,
    {
        self.write_collection(CollectionRef::new(records), location, name)
    }
}
