//! Relational schema generation from declared fields.

use crate::FieldDef;

/// Renders a `CREATE TABLE` statement for `table` from declared fields.
///
/// Columns follow the declared field order. A single primary-key field is
/// marked inline; several primary-key fields become a composite
/// `PRIMARY KEY (..)` clause. Foreign keys are appended as table constraints
/// in field order.
///
/// # Example
///
/// ```rust
/// use records_core::{create_table_statement, FieldDef};
///
/// let sql = create_table_statement(
///     "couriers",
///     &[
///         FieldDef::text("courier_id").sql_type("VARCHAR(50)").primary_key(),
///         FieldDef::integer("age"),
///     ],
/// );
/// assert!(sql.starts_with("CREATE TABLE couriers ("));
/// assert!(sql.contains("courier_id VARCHAR(50) NOT NULL PRIMARY KEY"));
/// ```
pub fn create_table_statement(table: &str, fields: &[FieldDef]) -> String {
    let key_count = fields.iter().filter(|f| f.primary_key).count();

    let mut lines: Vec<String> = fields
        .iter()
        .map(|field| {
            let mut column = format!("{} {}", field.name, field.sql_type);
            if !field.nullable {
                column.push_str(" NOT NULL");
            }
            if field.primary_key && key_count == 1 {
                column.push_str(" PRIMARY KEY");
            }
            column
        })
        .collect();

    if key_count > 1 {
        let keys: Vec<&str> = fields
            .iter()
            .filter(|f| f.primary_key)
            .map(|f| f.name)
            .collect();
        lines.push(format!("PRIMARY KEY ({})", keys.join(", ")));
    }

    for field in fields {
        if let Some(fk) = &field.references {
            lines.push(format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                field.name, fk.table, fk.column
            ));
        }
    }

    format!("CREATE TABLE {} (\n    {}\n)", table, lines.join(",\n    "))
}
