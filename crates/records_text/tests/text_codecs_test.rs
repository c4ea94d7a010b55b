//! Round trips through the delimited and structured text codecs.
//!
//! Covers whole datasets, explicit collection names, and the positional
//! column matching of the delimited format.

use pretty_assertions::assert_eq;
use records_core::{Codec, RecordError};
use records_delivery::{Courier, DeliveryDataset, Order, Person, Restaurant};
use records_text::{CsvOptions, DelimitedTextCodec, JsonOptions, StructuredTextCodec};

fn restaurant() -> Restaurant {
    Restaurant {
        restaurant_id: "R1".into(),
        name: "Demo".into(),
        address: "X".into(),
        phone_number: "555".into(),
        profile: "Pizza".into(),
    }
}

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
                name: "Tom \"TJ\" Jones".into(),
                address: "2 Side St, Apt 3".into(),
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
        vec![restaurant()],
        vec![Order {
            order_id: "ORDER-0000000000".into(),
            amount: 3,
            food_type: "Pizza".into(),
            restaurant_id: "R1".into(),
            restaurant_name: "Demo".into(),
            delivery_fee: 450,
            destination: "1 Main St".into(),
            client_name: "Ada Smith".into(),
            client_id: "P-000000".into(),
            courier_id: "C1".into(),
        }],
    )
}

#[test]
fn test_restaurant_round_trip_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let codec = DelimitedTextCodec::default();

    codec
        .write_records(&vec![restaurant()], dir.path(), None)
        .unwrap();
    let back: Vec<Restaurant> = codec.read_records(dir.path(), None).unwrap();

    assert!(dir.path().join("restaurants.csv").exists());
    assert_eq!(back, vec![restaurant()]);
}

#[test]
fn test_explicit_name_overrides_collection_name() {
    let dir = tempfile::tempdir().unwrap();
    let csv = DelimitedTextCodec::default();
    let json = StructuredTextCodec::default();

    csv.write_records(&vec![restaurant()], dir.path(), Some("alt"))
        .unwrap();
    json.write_records(&vec![restaurant()], dir.path(), Some("alt"))
        .unwrap();

    assert!(dir.path().join("alt.csv").exists());
    assert!(dir.path().join("alt.json").exists());
    assert!(!dir.path().join("restaurants.csv").exists());

    let from_csv: Vec<Restaurant> = csv.read_records(dir.path(), Some("alt")).unwrap();
    let from_json: Vec<Restaurant> = json.read_records(dir.path(), Some("alt")).unwrap();
    assert_eq!(from_csv, vec![restaurant()]);
    assert_eq!(from_json, vec![restaurant()]);
}

#[test]
fn test_reordered_columns_are_read_by_position() {
    // The header names are not used to map columns back onto fields
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("restaurants.csv"),
        "name;restaurant_id;address;phone_number;profile\nDemo;R1;X;555;Pizza\n",
    )
    .unwrap();

    let back: Vec<Restaurant> = DelimitedTextCodec::default()
        .read_records(dir.path(), None)
        .unwrap();

    assert_eq!(back[0].restaurant_id, "Demo");
    assert_eq!(back[0].name, "R1");
}

#[test]
fn test_reordered_columns_fail_on_typed_fields() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("couriers.csv"),
        "courier_id;name;male;age;delivery_method\nC1;Bob;1;24;Car\n",
    )
    .unwrap();

    let err = DelimitedTextCodec::default()
        .read_records::<Courier>(dir.path(), None)
        .unwrap_err();

    assert!(matches!(err, RecordError::MalformedRecord { .. }), "{err}");
}

#[test]
fn test_pretty_and_compact_json_read_back_identically() {
    let pretty_dir = tempfile::tempdir().unwrap();
    let compact_dir = tempfile::tempdir().unwrap();
    let dataset = delivery();

    StructuredTextCodec::new(JsonOptions::default().pretty(true))
        .write_dataset(&dataset, pretty_dir.path())
        .unwrap();
    StructuredTextCodec::new(JsonOptions::default().pretty(false))
        .write_dataset(&dataset, compact_dir.path())
        .unwrap();

    let reader = StructuredTextCodec::default();
    let pretty: DeliveryDataset = reader.read_dataset(pretty_dir.path()).unwrap();
    let compact: DeliveryDataset = reader.read_dataset(compact_dir.path()).unwrap();

    assert_eq!(pretty, dataset);
    assert_eq!(compact, dataset);
}

#[test]
fn test_delivery_dataset_round_trip_csv() {
    let dir = tempfile::tempdir().unwrap();
    let codec = DelimitedTextCodec::default();

    codec.write_dataset(&delivery(), dir.path()).unwrap();

    for name in ["people", "couriers", "restaurants", "orders"] {
        assert!(dir.path().join(format!("{name}.csv")).exists(), "{name}");
    }
    let back: DeliveryDataset = codec.read_dataset(dir.path()).unwrap();
    assert_eq!(back, delivery());
}

#[test]
fn test_comma_delimited_dataset_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let codec = DelimitedTextCodec::new(CsvOptions::default().delimiter(','));

    codec.write_dataset(&delivery(), dir.path()).unwrap();
    let back: DeliveryDataset = codec.read_dataset(dir.path()).unwrap();

    assert_eq!(back, delivery());
}

#[test]
fn test_empty_collections_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = DeliveryDataset::default();

    for codec_result in [
        DelimitedTextCodec::default()
            .write_dataset(&dataset, dir.path())
            .and_then(|_| DelimitedTextCodec::default().read_dataset::<DeliveryDataset>(dir.path())),
        StructuredTextCodec::default()
            .write_dataset(&dataset, dir.path())
            .and_then(|_| StructuredTextCodec::default().read_dataset::<DeliveryDataset>(dir.path())),
    ] {
        assert_eq!(codec_result.unwrap(), dataset);
    }

    let header = std::fs::read_to_string(dir.path().join("orders.csv")).unwrap();
    assert_eq!(header.lines().count(), 1);
    let json = std::fs::read_to_string(dir.path().join("orders.json")).unwrap();
    assert_eq!(json.trim(), "[]");
}

#[test]
fn test_missing_file_is_resource_not_found() {
    let dir = tempfile::tempdir().unwrap();

    let csv_err = DelimitedTextCodec::default()
        .read_dataset::<DeliveryDataset>(dir.path())
        .unwrap_err();
    let json_err = StructuredTextCodec::default()
        .read_records::<Person>(dir.path(), None)
        .unwrap_err();

    assert!(matches!(csv_err, RecordError::ResourceNotFound(_)), "{csv_err}");
    assert!(matches!(json_err, RecordError::ResourceNotFound(_)), "{json_err}");
}

#[test]
fn test_missing_directory_on_write_is_resource_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere");

    let err = DelimitedTextCodec::default()
        .write_records(&vec![restaurant()], &missing, None)
        .unwrap_err();

    assert!(matches!(err, RecordError::ResourceNotFound(_)), "{err}");
}

#[test]
fn test_rewrite_replaces_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let codec = StructuredTextCodec::default();
    let mut second = restaurant();
    second.restaurant_id = "R2".into();

    codec
        .write_records(&vec![restaurant(), second.clone()], dir.path(), None)
        .unwrap();
    codec
        .write_records(&vec![second.clone()], dir.path(), None)
        .unwrap();

    let back: Vec<Restaurant> = codec.read_records(dir.path(), None).unwrap();
    assert_eq!(back, vec![second]);
}
