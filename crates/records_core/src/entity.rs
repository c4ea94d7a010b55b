//! The entity contract.
//!
//! An entity is an immutable record with a fixed, ordered set of typed fields.
//! Codecs move entities through positional string tokens: [`Entity::encode`]
//! produces one token per declared field, [`Entity::decode`] consumes them in
//! the same order. Columns are matched by position, never by label.

use crate::{FieldDef, FieldKind, RecordError, Result, create_table_statement};
use std::fmt;

/// Capability set every record type implements.
///
/// # Laws
///
/// - `E::decode(&e.encode())` equals `e` for every legal `e`.
/// - `E::decode(&s)?.encode()` equals `s` for every well-formed token row `s`.
/// - `field_names()`, `encode()` and `decode()` all use the declared order.
///
/// # Example
///
/// ```rust
/// use records_core::{Entity, FieldDef, Result, TokenReader, format_boolean};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Flag {
///     key: String,
///     on: bool,
/// }
///
/// impl Entity for Flag {
///     fn fields() -> &'static [FieldDef] {
///         const FIELDS: &[FieldDef] = &[FieldDef::text("key").primary_key(), FieldDef::boolean("on")];
///         FIELDS
///     }
///
///     fn collection_name() -> &'static str {
///         "flags"
///     }
///
///     fn decode(tokens: &[String]) -> Result<Self> {
///         let mut reader = TokenReader::new::<Self>(tokens)?;
///         Ok(Self { key: reader.text()?, on: reader.boolean()? })
///     }
///
///     fn encode(&self) -> Vec<String> {
///         vec![self.key.clone(), format_boolean(self.on)]
///     }
/// }
///
/// let flag = Flag { key: "beta".into(), on: true };
/// assert_eq!(flag.encode(), vec!["beta", "1"]);
/// assert_eq!(Flag::decode(&flag.encode()).unwrap(), flag);
/// ```
pub trait Entity: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Declared fields, in positional order.
    fn fields() -> &'static [FieldDef];

    /// Stable collection identifier: file stem, sheet name and table name.
    ///
    /// Codecs use it verbatim; it must already be a valid identifier for
    /// every backend.
    fn collection_name() -> &'static str;

    /// Builds one record from tokens in declared order.
    fn decode(tokens: &[String]) -> Result<Self>;

    /// Produces one token per declared field, in declared order.
    fn encode(&self) -> Vec<String>;

    /// Field names in declared order.
    fn field_names() -> Vec<&'static str> {
        Self::fields().iter().map(|f| f.name).collect()
    }

    /// `CREATE TABLE` statement for this entity stored under `table`.
    fn create_table(table: &str) -> String {
        create_table_statement(table, Self::fields())
    }

    /// `CREATE TABLE` statement under the declared collection name.
    fn schema_statement() -> String {
        Self::create_table(Self::collection_name())
    }
}

/// Short type name of an entity, used in error messages.
pub fn entity_name<E: Entity>() -> &'static str {
    let full = std::any::type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Positional reader over a token row.
///
/// Checks the row arity up front, then hands out one converted token per
/// call in declared order. Every failure is a [`RecordError::MalformedRecord`]
/// naming the entity and field.
pub struct TokenReader<'a> {
    entity: &'static str,
    fields: &'static [FieldDef],
    tokens: &'a [String],
    position: usize,
}

impl<'a> TokenReader<'a> {
    /// Creates a reader, failing if the token count differs from the field count.
    pub fn new<E: Entity>(tokens: &'a [String]) -> Result<Self> {
        let fields = E::fields();
        if tokens.len() != fields.len() {
            return Err(RecordError::malformed(
                entity_name::<E>(),
                format!("expected {} fields, got {}", fields.len(), tokens.len()),
            ));
        }

        Ok(Self {
            entity: entity_name::<E>(),
            fields,
            tokens,
            position: 0,
        })
    }

    /// Reads the next token as text.
    pub fn text(&mut self) -> Result<String> {
        self.next(FieldKind::Text).map(str::to_string)
    }

    /// Reads the next token as an integer.
    pub fn integer(&mut self) -> Result<i64> {
        let token = self.next(FieldKind::Integer)?;
        token
            .parse()
            .map_err(|_| self.invalid(self.position.saturating_sub(1), FieldKind::Integer, token))
    }

    /// Reads the next token as a boolean.
    pub fn boolean(&mut self) -> Result<bool> {
        let token = self.next(FieldKind::Boolean)?;
        Ok(token == "1")
    }

    fn next(&mut self, requested: FieldKind) -> Result<&'a str> {
        let (Some(field), Some(token)) = (
            self.fields.get(self.position),
            self.tokens.get(self.position),
        ) else {
            return Err(RecordError::malformed(
                self.entity,
                format!("read past field {}", self.position),
            ));
        };

        if field.kind != requested {
            return Err(RecordError::malformed(
                self.entity,
                format!(
                    "field '{}' is declared {} but was read as {}",
                    field.name, field.kind, requested
                ),
            ));
        }

        if !field.kind.accepts(token) {
            return Err(self.invalid(self.position, field.kind, token));
        }

        self.position += 1;
        Ok(token.as_str())
    }

    fn invalid(&self, index: usize, kind: FieldKind, token: &str) -> RecordError {
        let field = self
            .fields
            .get(index)
            .map(|f| f.name)
            .unwrap_or("?");
        RecordError::malformed(
            self.entity,
            format!("field '{}' expects {}, got '{}'", field, kind, token),
        )
    }
}
