use records_core::{Entity, FieldDef, Result, TokenReader};

/// A restaurant and the kind of food it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    /// Primary key
    pub restaurant_id: String,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Contact number
    pub phone_number: String,
    /// Cuisine served
    pub profile: String,
}

impl Entity for Restaurant {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::text("restaurant_id")
                .sql_type("VARCHAR(50)")
                .primary_key(),
            FieldDef::text("name").sql_type("VARCHAR(100)"),
            FieldDef::text("address").sql_type("VARCHAR(100)"),
            FieldDef::text("phone_number").sql_type("VARCHAR(50)"),
            FieldDef::text("profile").sql_type("VARCHAR(50)"),
        ];
        FIELDS
    }

    fn collection_name() -> &'static str {
        "restaurants"
    }

    fn decode(tokens: &[String]) -> Result<Self> {
        let mut reader = TokenReader::new::<Self>(tokens)?;
        Ok(Self {
            restaurant_id: reader.text()?,
            name: reader.text()?,
            address: reader.text()?,
            phone_number: reader.text()?,
            profile: reader.text()?,
        })
    }

    fn encode(&self) -> Vec<String> {
        vec![
            self.restaurant_id.clone(),
            self.name.clone(),
            self.address.clone(),
            self.phone_number.clone(),
            self.profile.clone(),
        ]
    }
}
