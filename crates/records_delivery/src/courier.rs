use records_core::{Entity, FieldDef, Result, TokenReader, format_boolean};

/// A courier and the vehicle they deliver with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Courier {
    /// Primary key
    pub courier_id: String,
    /// Full name
    pub name: String,
    /// Age in years
    pub age: i64,
    /// Whether the courier is male
    pub male: bool,
    /// Vehicle used for deliveries, e.g. "Bicycle"
    pub delivery_method: String,
}

impl Entity for Courier {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::text("courier_id")
                .sql_type("VARCHAR(50)")
                .primary_key(),
            FieldDef::text("name").sql_type("VARCHAR(100)"),
            FieldDef::integer("age"),
            FieldDef::boolean("male"),
            FieldDef::text("delivery_method").sql_type("VARCHAR(50)"),
        ];
        FIELDS
    }

    fn collection_name() -> &'static str {
        "couriers"
    }

    fn decode(tokens: &[String]) -> Result<Self> {
        let mut reader = TokenReader::new::<Self>(tokens)?;
        Ok(Self {
            courier_id: reader.text()?,
            name: reader.text()?,
            age: reader.integer()?,
            male: reader.boolean()?,
            delivery_method: reader.text()?,
        })
    }

    fn encode(&self) -> Vec<String> {
        vec![
            self.courier_id.clone(),
            self.name.clone(),
            self.age.to_string(),
            format_boolean(self.male),
            self.delivery_method.clone(),
        ]
    }
}
