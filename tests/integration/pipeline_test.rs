//! End-to-end pipeline tests.

use querypipe::engine::{FailingExecutionEngine, MockExecutionEngine};
use querypipe::pipeline::{default_scripts, run_batch, BatchScript, Complexity, Pipeline};
use querypipe::secrets::{setup_demo_credentials, InMemorySecretStore, DEMO_SECRET_NAME};
use std::time::Duration;
use tempfile::tempdir;

fn engine() -> MockExecutionEngine {
    MockExecutionEngine::with_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_materializer_pipeline_end_to_end() {
    let engine = engine();
    let secrets = InMemorySecretStore::new();
    setup_demo_credentials(&secrets, DEMO_SECRET_NAME).unwrap();

    let pipeline = Pipeline::new(&engine).with_secrets(&secrets, DEMO_SECRET_NAME);
    let dir = tempdir().unwrap();

    let analyses = pipeline.run_materializer_pipeline(dir.path()).await.unwrap();

    assert_eq!(analyses.len(), 2);
    assert!(analyses.iter().all(|a| a.complexity == Complexity::High));

    let artifact = dir
        .path()
        .join("user_order_analytics")
        .join("sql_query.json");
    assert!(artifact.exists());

    let contents = std::fs::read_to_string(artifact).unwrap();
    assert!(contents.contains("user_order_analytics"));
    assert!(contents.contains("LEFT JOIN orders"));
}

#[tokio::test]
async fn test_materializer_pipeline_without_credentials() {
    // A missing secret bundle degrades to mock execution, never fails.
    let engine = engine();
    let secrets = InMemorySecretStore::new();

    let pipeline = Pipeline::new(&engine).with_secrets(&secrets, DEMO_SECRET_NAME);
    let dir = tempdir().unwrap();

    let analyses = pipeline.run_materializer_pipeline(dir.path()).await.unwrap();
    assert_eq!(analyses.len(), 2);
}

#[tokio::test]
async fn test_batch_processes_all_scripts_in_order() {
    let summary = run_batch(&engine(), &default_scripts()).await;

    let names: Vec<&str> = summary
        .outcomes
        .iter()
        .map(|o| o.script_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "create_users_table",
            "insert_sample_users",
            "update_user_status",
            "query_active_users",
            "cleanup_inactive_users"
        ]
    );
    assert_eq!(summary.successful_count(), 5);
}

#[tokio::test]
async fn test_batch_stops_at_fourth_failure() {
    let scripts = vec![
        BatchScript::new("one", "SELECT 1"),
        BatchScript::new("two", "INSERT INTO t VALUES (1)"),
        BatchScript::new("three", "UPDATE t SET x = 1"),
        BatchScript::new("four", "SELECT * FROM missing_table"),
        BatchScript::new("five", "DELETE FROM t"),
    ];
    let engine = FailingExecutionEngine::failing_on("missing_table", "relation does not exist");

    let summary = run_batch(&engine, &scripts).await;

    // Exactly four processed; the fifth never ran.
    assert_eq!(summary.outcomes.len(), 4);
    assert_eq!(summary.failed_script(), Some("four"));
    assert!(summary.stopped_early());
    assert!(summary
        .outcomes
        .iter()
        .all(|o| o.script_name != "five"));

    let failed = &summary.outcomes[3];
    assert_eq!(
        failed.result.error_message.as_deref(),
        Some("relation does not exist")
    );
}

#[tokio::test]
async fn test_batch_total_time_counts_successes_only() {
    let engine = FailingExecutionEngine::new("down");
    let summary = run_batch(&engine, &default_scripts()).await;

    assert_eq!(summary.outcomes.len(), 1);
    assert_eq!(summary.successful_count(), 0);
    assert_eq!(summary.total_execution_time_ms(), 0.0);
}
