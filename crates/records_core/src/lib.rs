//! # Records Core
//!
//! Entity and dataset contracts shared by every record codec.
//!
//! Record types describe themselves once (ordered, typed fields plus a
//! collection name) and every storage format moves them through the same
//! positional token rows. This crate holds those contracts and nothing
//! format-specific.
//!
//! ## Key Concepts
//!
//! - **Entity**: an immutable record with declared fields ([`Entity`], [`FieldDef`])
//! - **EntityType**: a static descriptor used to handle entity types uniformly
//! - **Collection**: a type-erased `Vec` of one entity type
//! - **Dataset**: collections of several entity types in dependency order
//! - **Codec**: the four read/write operations every format implements
//!
//! ## Example
//!
//! ```rust
//! use records_core::{Collection, Entity, EntityType, FieldDef, Result, TokenReader};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct City {
//!     name: String,
//!     population: i64,
//! }
//!
//! impl Entity for City {
//!     fn fields() -> &'static [FieldDef] {
//!         const FIELDS: &[FieldDef] = &[
//!             FieldDef::text("name").primary_key(),
//!             FieldDef::integer("population"),
//!         ];
//!         FIELDS
//!     }
//!
//!     fn collection_name() -> &'static str {
//!         "cities"
//!     }
//!
//!     fn decode(tokens: &[String]) -> Result<Self> {
//!         let mut reader = TokenReader::new::<Self>(tokens)?;
//!         Ok(Self { name: reader.text()?, population: reader.integer()? })
//!     }
//!
//!     fn encode(&self) -> Vec<String> {
//!         vec![self.name.clone(), self.population.to_string()]
//!     }
//! }
//!
//! let rows = vec![vec!["Oslo".to_string(), "709000".to_string()]];
//! let cities = EntityType::of::<City>().decode_rows(rows).unwrap();
//! assert_eq!(cities.len(), 1);
//! ```

pub mod codec;
pub mod collection;
pub mod dataset;
pub mod entity;
pub mod error;
pub mod field;
pub mod fs;
pub mod schema;

pub use codec::*;
pub use collection::*;
pub use dataset::*;
pub use entity::*;
pub use error::*;
pub use field::*;
pub use schema::*;
