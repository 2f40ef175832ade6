//! Mock engine behavior tests.
//!
//! Row counts and sample content are exact; timing is only bounded below.

use querypipe::engine::{
    ExecutionEngine, ExecutionStatus, FailingExecutionEngine, MockExecutionEngine, ResultType,
};
use std::time::Duration;

fn engine() -> MockExecutionEngine {
    MockExecutionEngine::with_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_select_returns_fixed_sample_rows() {
    let result = engine()
        .execute("SELECT id, name, status FROM users WHERE status = 'active'")
        .await;

    assert_eq!(result.status, ExecutionStatus::Success);
    assert_eq!(result.result_type, ResultType::Query);
    assert_eq!(result.rows_affected, 0);
    assert_eq!(result.preview.columns, vec!["id", "name", "status"]);
    assert_eq!(result.preview.rows.len(), 3);
    assert_eq!(result.preview.cell(0, 1), "John Doe");
    assert_eq!(result.preview.cell(1, 1), "Jane Smith");
    assert_eq!(result.preview.cell(2, 1), "Bob Johnson");
}

#[tokio::test]
async fn test_insert_update_delete_row_counts() {
    let insert = engine().execute("INSERT INTO users (name) VALUES ('x')").await;
    assert_eq!(insert.rows_affected, 5);
    assert!(insert.preview.is_empty());

    let update = engine().execute("UPDATE users SET status = 'x'").await;
    assert_eq!(update.rows_affected, 12);

    let delete = engine().execute("DELETE FROM users WHERE id = 1").await;
    assert_eq!(delete.rows_affected, 3);
}

#[tokio::test]
async fn test_unrecognized_statement_is_unknown() {
    let result = engine().execute("VACUUM").await;
    assert_eq!(result.result_type, ResultType::Unknown);
    assert_eq!(result.rows_affected, 0);
    assert!(result.preview.is_empty());
}

#[tokio::test]
async fn test_classification_is_case_insensitive() {
    let result = engine().execute("select * from users").await;
    assert_eq!(result.result_type, ResultType::Query);
}

#[tokio::test]
async fn test_repeated_execution_same_data() {
    // Data is deterministic between calls; only timing varies.
    let e = engine();
    let first = e.execute("SELECT 1").await;
    let second = e.execute("SELECT 1").await;

    assert_eq!(first.rows_affected, second.rows_affected);
    assert_eq!(first.preview, second.preview);
    assert_eq!(first.result_type, second.result_type);
}

#[tokio::test]
async fn test_execution_time_reflects_delay() {
    let result = MockExecutionEngine::with_delay(Duration::from_millis(20))
        .execute("SELECT 1")
        .await;
    assert!(result.execution_time_ms >= 20.0);
}

#[tokio::test]
async fn test_failing_engine_reports_error_result() {
    let result = FailingExecutionEngine::new("simulated outage")
        .execute("SELECT 1")
        .await;

    assert_eq!(result.status, ExecutionStatus::Error);
    assert_eq!(result.error_message.as_deref(), Some("simulated outage"));
    assert_eq!(result.rows_affected, 0);
}
