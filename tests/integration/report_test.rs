//! Report rendering tests against live mock engine output.

use querypipe::artifact::report::{render_csv, render_html, render_markdown};
use querypipe::engine::{ExecutionEngine, MockExecutionEngine};
use querypipe::query::QueryRecord;
use std::time::Duration;

fn engine() -> MockExecutionEngine {
    MockExecutionEngine::with_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_html_table_matches_preview() {
    let record = QueryRecord::new("SELECT id, name, status FROM users").with_name("listing");
    let result = engine().execute(&record.query).await;

    let html = render_html(&record, &result);

    // One header cell per preview column, one body row per sample entry.
    assert_eq!(html.matches("<th ").count(), result.preview.columns.len());
    assert_eq!(
        html.matches("<tr>").count(),
        result.preview.rows.len() + 1 // header row
    );
    assert!(html.contains(">id</th>"));
    assert!(html.contains(">John Doe</td>") || html.contains(">John Doe<"));
}

#[tokio::test]
async fn test_html_placeholder_for_empty_preview() {
    let record = QueryRecord::new("DELETE FROM users").with_name("cleanup");
    let result = engine().execute(&record.query).await;

    let html = render_html(&record, &result);
    assert!(html.contains("No results to display."));
}

#[tokio::test]
async fn test_all_views_share_one_result() {
    let record = QueryRecord::new("SELECT * FROM users").with_name("listing");
    let result = engine().execute(&record.query).await;

    let html = render_html(&record, &result);
    let markdown = render_markdown(&record, &result);
    let csv = render_csv(&record, &result);

    // All three views carry the same measured time, since they are derived
    // from the same result rather than independent executions.
    let time = format!("{:.2}", result.execution_time_ms);
    assert!(html.contains(&time));
    assert!(markdown.contains(&time));
    assert!(csv.contains(&time));
}

#[tokio::test]
async fn test_markdown_summary_structure() {
    let record = QueryRecord::new("SELECT * FROM users")
        .with_name("listing")
        .with_description("all users");
    let result = engine().execute(&record.query).await;

    let markdown = render_markdown(&record, &result);

    assert!(markdown.contains("# SQL Query: listing"));
    assert!(markdown.contains("## Execution Results"));
    assert!(markdown.contains("- **Rows Affected:** 0"));
    assert!(markdown.contains("## Parameters"));
}

#[tokio::test]
async fn test_csv_two_column_schema() {
    let record = QueryRecord::new("INSERT INTO t VALUES (1)").with_name("seed");
    let result = engine().execute(&record.query).await;

    let csv = render_csv(&record, &result);

    for line in csv.lines().skip(1) {
        // Every data line is attribute,value; values here never embed commas.
        assert_eq!(line.matches(',').count(), 1, "line: {line}");
    }
    assert!(csv.contains("rows_affected,5\n"));
}
