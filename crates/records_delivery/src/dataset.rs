use crate::{Courier, Order, Person, Restaurant};
use records_core::{Collection, CollectionCursor, CollectionRef, Dataset, EntityType, Result};

/// People, couriers, restaurants and the orders between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDataset {
    pub people: Vec<Person>,
    pub couriers: Vec<Courier>,
    pub restaurants: Vec<Restaurant>,
    pub orders: Vec<Order>,
}

impl DeliveryDataset {
    /// Creates a dataset from its four collections.
    pub fn new(
        people: Vec<Person>,
        couriers: Vec<Courier>,
        restaurants: Vec<Restaurant>,
        orders: Vec<Order>,
    ) -> Self {
        Self {
            people,
            couriers,
            restaurants,
            orders,
        }
    }

    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.people.len() + self.couriers.len() + self.restaurants.len() + self.orders.len()
    }
}

impl Dataset for DeliveryDataset {
    fn entity_types() -> Vec<EntityType> {
        vec![
            EntityType::of::<Person>(),
            EntityType::of::<Courier>(),
            EntityType::of::<Restaurant>(),
            EntityType::of::<Order>(),
        ]
    }

    fn collections(&self) -> Vec<CollectionRef<'_>> {
        vec![
            CollectionRef::new(&self.people),
            CollectionRef::new(&self.couriers),
            CollectionRef::new(&self.restaurants),
            CollectionRef::new(&self.orders),
        ]
    }

    fn from_collections(collections: Vec<Collection>) -> Result<Self> {
        let mut cursor = CollectionCursor::new::<Self>(collections)?;
        Ok(Self {
            people: cursor.take()?,
            couriers: cursor.take()?,
            restaurants: cursor.take()?,
            orders: cursor.take()?,
        })
    }
}
