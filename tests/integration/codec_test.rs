//! Codec and artifact store round-trip tests.

use querypipe::artifact::{ArtifactCodec, ArtifactStore};
use querypipe::engine::{ExecutionResult, ResultType, SamplePreview};
use querypipe::query::QueryRecord;
use serde_json::{json, Map};
use tempfile::tempdir;

fn record_with_everything() -> QueryRecord {
    let mut params = Map::new();
    params.insert("start_date".to_string(), json!("2023-01-01"));
    params.insert("min_orders".to_string(), json!(1));
    params.insert("nested".to_string(), json!({"limit": 100}));

    QueryRecord::new("SELECT id, name FROM users WHERE created_at >= '2023-01-01'")
        .with_name("user_listing")
        .with_description("List recent users")
        .with_parameters(params)
}

#[test]
fn test_round_trip_all_fields() {
    let codec = ArtifactCodec::new();
    let record = record_with_everything();

    let restored = codec.deserialize(&codec.serialize(&record).unwrap()).unwrap();

    assert_eq!(restored.query, record.query);
    assert_eq!(restored.name, record.name);
    assert_eq!(restored.description, record.description);
    assert_eq!(restored.parameters, record.parameters);
    assert_eq!(restored.created_at, record.created_at);
}

#[test]
fn test_round_trip_minimal_record() {
    let codec = ArtifactCodec::new();
    let record = QueryRecord::new("SELECT 1");

    let restored = codec.deserialize(&codec.serialize(&record).unwrap()).unwrap();

    assert_eq!(restored.query, "SELECT 1");
    assert_eq!(restored.name, record.name);
    assert!(restored.description.is_none());
    assert!(restored.parameters.is_none());
}

#[test]
fn test_missing_query_is_malformed() {
    let codec = ArtifactCodec::new();
    let err = codec
        .deserialize(r#"{"name": "x", "created_at": "2023-06-01T12:00:00Z"}"#)
        .unwrap_err();
    assert_eq!(err.category(), "Malformed Record");
}

#[test]
fn test_store_round_trip_through_disk() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let record = record_with_everything();

    store.save(&record).unwrap();
    let restored = store.load().unwrap();

    assert_eq!(restored.query, record.query);
    assert_eq!(restored.parameters, record.parameters);
}

#[test]
fn test_store_writes_record_and_views() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let record = record_with_everything();
    let result = ExecutionResult::success(ResultType::Query, 0, SamplePreview::empty());

    store.save(&record).unwrap();
    let views = store.save_visualizations(&record, &result).unwrap();

    assert!(dir.path().join("sql_query.json").exists());
    assert_eq!(views.len(), 3);

    let names: Vec<_> = views
        .iter()
        .map(|v| v.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "sql_query_visualization.html",
            "sql_query_summary.md",
            "query_metadata.csv"
        ]
    );
}
