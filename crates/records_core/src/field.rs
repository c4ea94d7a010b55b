//! Declarative field schema.
//!
//! Every entity declares its fields once, in order, as a `&'static [FieldDef]`.
//! The declared order is the positional order used by every codec: encoded
//! tokens, file columns, sheet columns and table columns all follow it.

use std::fmt;

/// Primitive semantic type of a field.
///
/// Each kind has one canonical token form, which is what [`crate::Entity::encode`]
/// produces and what decoding accepts:
///
/// - `Text`: the string itself
/// - `Integer`: base-10 `i64` as printed by Rust (`-12`, `0`, `42`)
/// - `Boolean`: `"1"` for true, `"0"` for false
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Signed 64-bit integer
    Integer,
    /// Boolean flag
    Boolean,
}

impl FieldKind {
    /// SQL column type used when a field does not declare one.
    pub const fn default_sql_type(self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::Integer => "INTEGER",
            FieldKind::Boolean => "BOOLEAN",
        }
    }

    /// Returns true if `token` is in the canonical form for this kind.
    pub fn accepts(self, token: &str) -> bool {
        match self {
            FieldKind::Text => true,
            FieldKind::Integer => token
                .parse::<i64>()
                .is_ok_and(|value| value.to_string() == token),
            FieldKind::Boolean => token == "0" || token == "1",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Reference from a column to another collection's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced collection (table) name
    pub table: &'static str,
    /// Referenced column
    pub column: &'static str,
}

/// A single field definition.
///
/// # Example
///
/// ```rust
/// use records_core::{FieldDef, FieldKind};
///
/// const FIELDS: &[FieldDef] = &[
///     FieldDef::text("order_id").sql_type("VARCHAR(50)").primary_key(),
///     FieldDef::integer("amount").not_null(),
///     FieldDef::text("courier_id")
///         .sql_type("VARCHAR(50)")
///         .not_null()
///         .references("couriers", "courier_id"),
/// ];
///
/// assert_eq!(FIELDS[1].kind, FieldKind::Integer);
/// assert!(FIELDS[0].primary_key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name, also used as column name and JSON key
    pub name: &'static str,
    /// Semantic type
    pub kind: FieldKind,
    /// Column type used in the generated `CREATE TABLE` statement
    pub sql_type: &'static str,
    /// Part of the primary key
    pub primary_key: bool,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Optional foreign key
    pub references: Option<ForeignKey>,
}

impl FieldDef {
    /// Creates a nullable field with the kind's default SQL type.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            sql_type: kind.default_sql_type(),
            primary_key: false,
            nullable: true,
            references: None,
        }
    }

    /// Creates a text field.
    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Creates an integer field.
    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Creates a boolean field.
    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Overrides the SQL column type.
    pub const fn sql_type(mut self, sql_type: &'static str) -> Self {
        self.sql_type = sql_type;
        self
    }

    /// Marks the field as (part of) the primary key. Implies `NOT NULL`.
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Marks the field as `NOT NULL`.
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Adds a foreign key to `table(column)`.
    pub const fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKey { table, column });
        self
    }
}

/// Formats a boolean as its canonical token.
pub fn format_boolean(value: bool) -> String {
    let token = if value { "1" } else { "0" };
    token.to_string()
}
