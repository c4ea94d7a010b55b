use records_core::{Entity, FieldDef, Result, TokenReader};

/// A delivered order.
///
/// `restaurant_id`, `client_id` and `courier_id` are foreign keys into
/// `restaurants`, `people` and `couriers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Primary key
    pub order_id: String,
    /// Number of items ordered
    pub amount: i64,
    /// Cuisine of the ordered food
    pub food_type: String,
    /// Restaurant preparing the order
    pub restaurant_id: String,
    /// Restaurant name at the time of ordering
    pub restaurant_name: String,
    /// Fee charged for delivery
    pub delivery_fee: i64,
    /// Delivery address
    pub destination: String,
    /// Name of the ordering person
    pub client_name: String,
    /// Person who placed the order
    pub client_id: String,
    /// Courier delivering the order
    pub courier_id: String,
}

impl Entity for Order {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::text("order_id").sql_type("VARCHAR(50)").primary_key(),
            FieldDef::integer("amount").not_null(),
            FieldDef::text("food_type").sql_type("VARCHAR(50)").not_null(),
            FieldDef::text("restaurant_id")
                .sql_type("VARCHAR(50)")
                .not_null()
                .references("restaurants", "restaurant_id"),
            FieldDef::text("restaurant_name")
                .sql_type("VARCHAR(100)")
                .not_null(),
            FieldDef::integer("delivery_fee").not_null(),
            FieldDef::text("destination")
                .sql_type("VARCHAR(100)")
                .not_null(),
            FieldDef::text("client_name").sql_type("VARCHAR(100)").not_null(),
            FieldDef::text("client_id")
                .sql_type("VARCHAR(100)")
                .not_null()
                .references("people", "id"),
            FieldDef::text("courier_id")
                .sql_type("VARCHAR(50)")
                .not_null()
                .references("couriers", "courier_id"),
        ];
        FIELDS
    }

    fn collection_name() -> &'static str {
        "orders"
    }

    fn decode(tokens: &[String]) -> Result<Self> {
        let mut reader = TokenReader::new::<Self>(tokens)?;
        Ok(Self {
            order_id: reader.text()?,
            amount: reader.integer()?,
            food_type: reader.text()?,
            restaurant_id: reader.text()?,
            restaurant_name: reader.text()?,
            delivery_fee: reader.integer()?,
            destination: reader.text()?,
            client_name: reader.text()?,
            client_id: reader.text()?,
            courier_id: reader.text()?,
        })
    }

    fn encode(&self) -> Vec<String> {
        vec![
            self.order_id.clone(),
            self.amount.to_string(),
            self.food_type.clone(),
            self.restaurant_id.clone(),
            self.restaurant_name.clone(),
            self.delivery_fee.to_string(),
            self.destination.clone(),
            self.client_name.clone(),
            self.client_id.clone(),
            self.courier_id.clone(),
        ]
    }
}
