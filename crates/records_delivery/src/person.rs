use records_core::{Entity, FieldDef, Result, TokenReader, format_boolean};

/// A client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Primary key
    pub id: String,
    /// Full name
    pub name: String,
    /// Home address
    pub address: String,
    /// Age in years
    pub age: i64,
    /// Whether the person is male
    pub male: bool,
}

impl Entity for Person {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::text("id").sql_type("VARCHAR(50)").primary_key(),
            FieldDef::text("name").sql_type("VARCHAR(100)"),
            FieldDef::text("address").sql_type("VARCHAR(100)"),
            FieldDef::integer("age"),
            FieldDef::boolean("male"),
        ];
        FIELDS
    }

    fn collection_name() -> &'static str {
        "people"
    }

    fn decode(tokens: &[String]) -> Result<Self> {
        let mut reader = TokenReader::new::<Self>(tokens)?;
        Ok(Self {
            id: reader.text()?,
            name: reader.text()?,
            address: reader.text()?,
            age: reader.integer()?,
            male: reader.boolean()?,
        })
    }

    fn encode(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.address.clone(),
            self.age.to_string(),
            format_boolean(self.male),
        ]
    }
}
