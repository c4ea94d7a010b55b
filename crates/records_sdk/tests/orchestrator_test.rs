//! Dataset round trips through the orchestrator, in every format.

use pretty_assertions::assert_eq;
use records_delivery::{Courier, DeliveryDataset, Order, Person, Restaurant};
use records_sdk::{
    DatasetOrchestrator, Format, HandlerConfig, Location, RecordError, StructuredTextCodec,
};
use rusqlite::Connection;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
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
                name: "Tom Jones".into(),
                address: "2 Side St; Apt 3".into(),
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
        vec![Order {
            order_id: "ORDER-0000000000".into(),
            amount: 3,
            food_type: "Pizza".into(),
            restaurant_id: "R1".into(),
            restaurant_name: "Demo".into(),
            delivery_fee: 450,
            destination: "2 Side St; Apt 3".into(),
            client_name: "Tom Jones".into(),
            client_id: "P-000001".into(),
            courier_id: "C1".into(),
        }],
    )
}

#[test]
fn test_round_trip_in_every_file_format() {
    init_tracing();
    let orchestrator = DatasetOrchestrator::default();

    for format in [Format::Csv, Format::Json, Format::Xlsx] {
        let dir = tempfile::tempdir().unwrap();
        orchestrator
            .save(format, &delivery(), Location::Directory(dir.path()))
            .unwrap();

        let back: DeliveryDataset = orchestrator
            .load(format, Location::Directory(dir.path()))
            .unwrap();
        assert_eq!(back, delivery(), "{format}");
    }
}

#[test]
fn test_round_trip_in_database() {
    init_tracing();
    let conn = Connection::open_in_memory().unwrap();
    let orchestrator = DatasetOrchestrator::default();

    orchestrator
        .save(Format::Sql, &delivery(), Location::Database(&conn))
        .unwrap();
    let back: DeliveryDataset = orchestrator
        .load(Format::Sql, Location::Database(&conn))
        .unwrap();

    assert_eq!(back, delivery());
}

#[test]
fn test_conversion_chain_preserves_dataset() {
    init_tracing();
    let orchestrator = DatasetOrchestrator::default();
    let csv_dir = tempfile::tempdir().unwrap();
    let xlsx_dir = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("delivery.db");

    orchestrator
        .save_path("csv", &delivery(), csv_dir.path())
        .unwrap();
    let from_csv: DeliveryDataset = orchestrator.load_path("csv", csv_dir.path()).unwrap();
    orchestrator
        .save_path("XLSX", &from_csv, xlsx_dir.path())
        .unwrap();
    let from_xlsx: DeliveryDataset = orchestrator.load_path("xlsx", xlsx_dir.path()).unwrap();
    orchestrator
        .save_path("sqlite", &from_xlsx, &db_path)
        .unwrap();
    let from_db: DeliveryDataset = orchestrator.load_path("sql", &db_path).unwrap();

    assert_eq!(from_db, delivery());
}

#[test]
fn test_configuration_reaches_codecs() {
    let config = HandlerConfig::from_yaml(
        r#"
csv:
  extension: txt
  delimiter: "|"
xlsx:
  file_name: delivery.xlsx
"#,
    )
    .unwrap();
    let orchestrator = DatasetOrchestrator::new(config);
    let dir = tempfile::tempdir().unwrap();

    orchestrator
        .save(Format::Csv, &delivery(), dir.path().into())
        .unwrap();
    orchestrator
        .save(Format::Xlsx, &delivery(), dir.path().into())
        .unwrap();

    let people = std::fs::read_to_string(dir.path().join("people.txt")).unwrap();
    assert!(people.starts_with("id|name|address|age|male\n"), "{people}");
    assert!(dir.path().join("delivery.xlsx").exists());
}

#[test]
fn test_load_with_explicit_codec() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = DatasetOrchestrator::default();
    let codec = StructuredTextCodec::default();

    orchestrator
        .save_with(&codec, &delivery(), dir.path())
        .unwrap();
    let back: DeliveryDataset = orchestrator.load_with(&codec, dir.path()).unwrap();

    assert_eq!(back, delivery());
}

#[test]
fn test_codec_errors_pass_through_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = DatasetOrchestrator::default();

    let err = orchestrator
        .load::<DeliveryDataset>(Format::Xlsx, dir.path().into())
        .unwrap_err();
    assert!(matches!(err, RecordError::ResourceNotFound(_)), "{err}");

    let conn = Connection::open_in_memory().unwrap();
    let mut dataset = delivery();
    dataset.orders[0].client_id = "P-999999".into();
    let err = orchestrator
        .save(Format::Sql, &dataset, (&conn).into())
        .unwrap_err();
    assert!(matches!(err, RecordError::ForeignKeyViolation { .. }), "{err}");
}
