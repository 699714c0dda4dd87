mod common;

use std::fs;

use common::scenario_config;
use dcloud_core::error::Error;
use dcloud_core::traits::QueryClient;
use dcloud_core::types::{ColumnNames, DocumentRecord, QueryRequest, ResultRow};
use dcloud_loader::{ChunkLoader, ReplayClient};

#[test]
fn row_objects_with_store_column_names() {
    let json = r#"[
        {"RecordId__c": "r1", "score__c": 0.9, "Chunk__c": "hello"},
        {"RecordId__c": "r2", "score__c": 0.5, "Chunk__c": null}
    ]"#;
    let client = ReplayClient::from_json(json, &ColumnNames::default()).expect("parse");
    assert_eq!(
        client.rows(),
        &[ResultRow::new("r1", 0.9, Some("hello")), ResultRow::new("r2", 0.5, None)]
    );
}

#[test]
fn row_objects_with_canonical_names() {
    let json = r#"[{"id": "r1", "score": 0.25, "payload": "null"}]"#;
    let client = ReplayClient::from_json(json, &ColumnNames::default()).unwrap();
    assert_eq!(client.rows(), &[ResultRow::new("r1", 0.25, Some("null"))]);
}

#[test]
fn query_service_envelope_uses_column_positions() {
    let json = r#"{
        "data": [["hello", "r1", 0.9], ["world", "r2", 0.4]],
        "metadata": {
            "Chunk__c": {"placeInOrder": 0, "type": "VARCHAR"},
            "RecordId__c": {"placeInOrder": 1, "type": "VARCHAR"},
            "score__c": {"placeInOrder": 2, "type": "DOUBLE"}
        },
        "rowCount": 2
    }"#;
    let client = ReplayClient::from_json(json, &ColumnNames::default()).unwrap();
    assert_eq!(
        client.rows(),
        &[ResultRow::new("r1", 0.9, Some("hello")), ResultRow::new("r2", 0.4, Some("world"))]
    );
}

#[test]
fn envelope_without_a_configured_column_fails() {
    let json = r#"{"data": [], "metadata": {"RecordId__c": {"placeInOrder": 0}}}"#;
    let err = ReplayClient::from_json(json, &ColumnNames::default()).unwrap_err();
    assert!(
        matches!(err.downcast_ref::<Error>(), Some(Error::MissingColumn(c)) if c == "score__c"),
        "{err:?}"
    );
}

#[test]
fn non_numeric_score_is_a_type_error() {
    let json = r#"[{"id": "r1", "score": "high", "payload": "x"}]"#;
    let err = ReplayClient::from_json(json, &ColumnNames::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::ColumnType { expected: "number", .. })
    ));
}

#[test]
fn scalar_response_is_rejected() {
    assert!(ReplayClient::from_json("42", &ColumnNames::default()).is_err());
    assert!(ReplayClient::from_json("[1, 2]", &ColumnNames::default()).is_err());
    assert!(ReplayClient::from_json("not json", &ColumnNames::default()).is_err());
}

#[test]
fn replayed_file_loads_through_the_chunk_loader() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("response.json");
    fs::write(
        &path,
        r#"[{"RecordId__c": "r1", "score__c": 0.9, "Chunk__c": "hello"},
            {"RecordId__c": "r2", "score__c": 0.5, "Chunk__c": "null"}]"#,
    )
    .unwrap();

    let client = ReplayClient::from_path(&path, &ColumnNames::default()).expect("replay");
    let docs = ChunkLoader::new(scenario_config(), client).unwrap().load().unwrap();
    assert_eq!(docs, vec![DocumentRecord::new("hello", "r1", 0.9)]);
}

#[test]
fn missing_file_names_the_path() {
    let path = std::path::Path::new("/nonexistent/response.json");
    let err = ReplayClient::from_path(path, &ColumnNames::default()).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/response.json"), "{err}");
}

#[test]
fn read_data_ignores_sql() {
    let client = ReplayClient::new(vec![ResultRow::new("r1", 0.9, Some("hello"))]);
    let rows = client.read_data(&QueryRequest { sql: "SELECT 1".to_string() }).unwrap();
    assert_eq!(rows.len(), 1);
}
