//! Relational codec against in-memory SQLite databases.
//!
//! These tests exercise the ordering rules for dataset writes: tables are
//! dropped dependents first and filled dependencies first, and breaking
//! that order surfaces as a foreign key error from the backend.

use pretty_assertions::assert_eq;
use records_core::{
    Codec, Collection, CollectionCursor, CollectionRef, Dataset, EntityType, RecordError, Result,
};
use records_delivery::{Courier, DeliveryDataset, Order, Person, Restaurant};
use records_sql::{RelationalCodec, SqlOptions};
use rusqlite::Connection;

fn delivery() -> DeliveryDataset {
    DeliveryDataset::new(
        vec![
            Person {
                id: "P-000000".into(),
                name: "Ada Smith".into(),
                address: "1 Main St".into(),
                age: 36,
                male: false,
            },
            Person {
                id: "P-000001".into(),
                name: "Tom Jones".into(),
                address: "2 Side St".into(),
                age: 52,
                male: true,
            },
        ],
        vec![Courier {
            courier_id: "C1".into(),
            name: "Bob Kovacs".into(),
            age: 24,
            male: true,
            delivery_method: "Bicycle".into(),
        }],
        vec![Restaurant {
            restaurant_id: "R1".into(),
            name: "Demo".into(),
            address: "X".into(),
            phone_number: "555".into(),
            profile: "Pizza".into(),
        }],
        vec![order("ORDER-0000000000", "C1")],
    )
}

fn order(order_id: &str, courier_id: &str) -> Order {
    Order {
        order_id: order_id.into(),
        amount: 3,
        food_type: "Pizza".into(),
        restaurant_id: "R1".into(),
        restaurant_name: "Demo".into(),
        delivery_fee: 450,
        destination: "1 Main St".into(),
        client_name: "Ada Smith".into(),
        client_id: "P-000000".into(),
        courier_id: courier_id.into(),
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

/// The delivery collections declared orders first.
#[derive(Debug, Default)]
struct InvertedDelivery(DeliveryDataset);

impl Dataset for InvertedDelivery {
    fn entity_types() -> Vec<EntityType> {
        vec![
            EntityType::of::<Order>(),
            EntityType::of::<Restaurant>(),
            EntityType::of::<Courier>(),
            EntityType::of::<Person>(),
        ]
    }

    fn collections(&self) -> Vec<CollectionRef<'_>> {
        vec![
            CollectionRef::new(&self.0.orders),
            CollectionRef::new(&self.0.restaurants),
            CollectionRef::new(&self.0.couriers),
            CollectionRef::new(&self.0.people),
        ]
    }

    fn from_collections(collections: Vec<Collection>) -> Result<Self> {
        let mut cursor = CollectionCursor::new::<Self>(collections)?;
        let orders = cursor.take()?;
        let restaurants = cursor.take()?;
        let couriers = cursor.take()?;
        let people = cursor.take()?;
        Ok(Self(DeliveryDataset::new(people, couriers, restaurants, orders)))
    }
}

#[test]
fn test_dataset_round_trip() {
    let conn = Connection::open_in_memory().unwrap();
    let codec = RelationalCodec::default();

    codec.write_dataset(&delivery(), &conn).unwrap();
    let back: DeliveryDataset = codec.read_dataset(&conn).unwrap();

    assert_eq!(back, delivery());
    assert_eq!(count(&conn, "people"), 2);
    assert_eq!(count(&conn, "orders"), 1);
}

#[test]
fn test_writing_twice_is_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    let codec = RelationalCodec::default();

    codec.write_dataset(&delivery(), &conn).unwrap();
    codec.write_dataset(&delivery(), &conn).unwrap();

    let back: DeliveryDataset = codec.read_dataset(&conn).unwrap();
    assert_eq!(back, delivery());
    for table in ["people", "couriers", "restaurants", "orders"] {
        let expected = match table {
            "people" => 2,
            _ => 1,
        };
        assert_eq!(count(&conn, table), expected, "{table}");
    }
}

#[test]
fn test_unknown_courier_is_foreign_key_violation() {
    let conn = Connection::open_in_memory().unwrap();
    let codec = RelationalCodec::default();
    let mut dataset = delivery();
    dataset.orders.push(order("ORDER-0000000001", "C404"));

    let err = codec.write_dataset(&dataset, &conn).unwrap_err();

    match err {
        RecordError::ForeignKeyViolation { table, .. } => assert_eq!(table, "orders"),
        other => panic!("expected a foreign key violation, got {other}"),
    }
    // The orders table was created in the failed transaction
    let orders = codec.read_records::<Order>(&conn, None).unwrap_err();
    assert!(matches!(orders, RecordError::ResourceNotFound(_)), "{orders}");
    assert_eq!(count(&conn, "couriers"), 1);
}

#[test]
fn test_inverted_order_over_existing_data_is_drop_constraint() {
    let conn = Connection::open_in_memory().unwrap();
    let codec = RelationalCodec::default();
    codec.write_dataset(&delivery(), &conn).unwrap();

    let err = codec
        .write_dataset(&InvertedDelivery(delivery()), &conn)
        .unwrap_err();

    match err {
        RecordError::DropConstraint { table, .. } => assert_eq!(table, "people"),
        other => panic!("expected a drop constraint error, got {other}"),
    }
}

#[test]
fn test_inverted_order_on_empty_database_is_foreign_key_violation() {
    let conn = Connection::open_in_memory().unwrap();

    let err = RelationalCodec::default()
        .write_dataset(&InvertedDelivery(delivery()), &conn)
        .unwrap_err();

    assert!(matches!(err, RecordError::ForeignKeyViolation { .. }), "{err}");
}

#[test]
fn test_explicit_table_name() {
    let conn = Connection::open_in_memory().unwrap();
    let codec = RelationalCodec::default();
    let people = delivery().people;

    codec.write_records(&people, &conn, Some("alt")).unwrap();

    assert_eq!(count(&conn, "alt"), 2);
    let back: Vec<Person> = codec.read_records(&conn, Some("alt")).unwrap();
    assert_eq!(back, people);
    let err = codec.read_records::<Person>(&conn, None).unwrap_err();
    assert!(matches!(err, RecordError::ResourceNotFound(_)), "{err}");
}

#[test]
fn test_missing_table_is_resource_not_found() {
    let conn = Connection::open_in_memory().unwrap();

    let err = RelationalCodec::default()
        .read_dataset::<DeliveryDataset>(&conn)
        .unwrap_err();

    assert!(matches!(err, RecordError::ResourceNotFound(_)), "{err}");
    assert!(err.to_string().contains("people"), "{err}");
}

#[test]
fn test_append_without_recreating_tables() {
    let conn = Connection::open_in_memory().unwrap();
    let codec = RelationalCodec::default();
    codec.write_dataset(&delivery(), &conn).unwrap();

    let appending = RelationalCodec::new(SqlOptions::default().create_tables(false));
    appending
        .write_records(&vec![order("ORDER-0000000001", "C1")], &conn, None)
        .unwrap();

    let orders: Vec<Order> = codec.read_records(&conn, None).unwrap();
    assert_eq!(orders.len(), 2);

    let err = appending
        .write_records(&delivery().people, &conn, Some("nowhere"))
        .unwrap_err();
    assert!(matches!(err, RecordError::ResourceNotFound(_)), "{err}");
}

#[test]
fn test_without_foreign_key_enforcement() {
    let conn = Connection::open_in_memory().unwrap();
    let codec = RelationalCodec::new(SqlOptions::default().enforce_foreign_keys(false));
    let mut dataset = delivery();
    dataset.orders.push(order("ORDER-0000000001", "C404"));

    codec.write_dataset(&dataset, &conn).unwrap();

    assert_eq!(count(&conn, "orders"), 2);
}

#[test]
fn test_generated_schema_is_applied() {
    let conn = Connection::open_in_memory().unwrap();
    RelationalCodec::default()
        .write_dataset(&delivery(), &conn)
        .unwrap();

    let sql: String = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'orders'",
            [],
            |row| row.get(0),
        )
        .unwrap();

    assert!(sql.contains("FOREIGN KEY (courier_id) REFERENCES couriers(courier_id)"), "{sql}");
    assert!(sql.contains("FOREIGN KEY (client_id) REFERENCES people(id)"), "{sql}");
}

#[test]
fn test_reordered_columns_are_read_by_position() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE restaurants (name VARCHAR, restaurant_id VARCHAR, address VARCHAR, \
         phone_number VARCHAR, profile VARCHAR);
         INSERT INTO restaurants VALUES ('Demo', 'R1', 'X', '555', 'Pizza');",
    )
    .unwrap();

    let restaurants: Vec<Restaurant> = RelationalCodec::default()
        .read_records(&conn, None)
        .unwrap();

    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].restaurant_id, "Demo");
    assert_eq!(restaurants[0].name, "R1");
}

#[test]
fn test_extra_column_is_malformed_record() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE wide (restaurant_id VARCHAR, name VARCHAR, address VARCHAR, \
         phone_number VARCHAR, profile VARCHAR, rating INTEGER);
         INSERT INTO wide VALUES ('R1', 'Demo', 'X', '555', 'Pizza', 5);",
    )
    .unwrap();

    let err = RelationalCodec::default()
        .read_records::<Restaurant>(&conn, Some("wide"))
        .unwrap_err();

    assert!(matches!(err, RecordError::MalformedRecord { .. }), "{err}");
}
