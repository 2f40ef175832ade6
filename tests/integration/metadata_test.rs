//! Metadata extraction tests.

use querypipe::artifact::{extract_metadata, KEYWORD_VOCABULARY};
use querypipe::engine::{ExecutionResult, ResultType, SamplePreview};
use querypipe::query::QueryRecord;
use serde_json::{json, Map};

fn success_result() -> ExecutionResult {
    ExecutionResult::success(ResultType::Query, 0, SamplePreview::empty())
        .with_execution_time_ms(7.25)
}

#[test]
fn test_keywords_in_vocabulary_order() {
    let record = QueryRecord::new(
        "WITH ranked AS (SELECT id, ROW_NUMBER() OVER (ORDER BY score) FROM players) \
         SELECT * FROM ranked JOIN teams ON teams.id = ranked.id",
    )
    .with_name("ranked_players");

    let metadata = extract_metadata(&record, &success_result());
    let keywords = metadata["sql_keywords"].as_str().unwrap();

    // WITH, OVER, and JOIN all present, ordered by the vocabulary.
    let join_pos = keywords.find("JOIN").unwrap();
    let with_pos = keywords.find("WITH").unwrap();
    let over_pos = keywords.find("OVER").unwrap();
    assert!(join_pos < with_pos);
    assert!(with_pos < over_pos);

    // Derived ordering matches the vocabulary itself.
    let matched: Vec<&str> = keywords.split(", ").collect();
    let positions: Vec<usize> = matched
        .iter()
        .map(|k| KEYWORD_VOCABULARY.iter().position(|v| v == k).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_parameter_count_matches_mapping() {
    let mut params = Map::new();
    params.insert("a".to_string(), json!(1));
    params.insert("b".to_string(), json!("two"));
    params.insert("c".to_string(), json!([3]));

    let record = QueryRecord::new("SELECT 1").with_parameters(params);
    let metadata = extract_metadata(&record, &success_result());

    assert_eq!(metadata["parameter_count"], json!(3));
    assert_eq!(metadata["has_parameters"], json!(true));
}

#[test]
fn test_parameter_count_zero_when_absent() {
    let record = QueryRecord::new("SELECT 1");
    let metadata = extract_metadata(&record, &success_result());

    assert_eq!(metadata["parameter_count"], json!(0));
    assert_eq!(metadata["has_parameters"], json!(false));
}

#[test]
fn test_execution_stats_mirrored() {
    let record = QueryRecord::new("DELETE FROM t");
    let result = ExecutionResult::success(ResultType::Delete, 3, SamplePreview::empty())
        .with_execution_time_ms(101.5);

    let metadata = extract_metadata(&record, &result);

    assert_eq!(metadata["execution_status"], json!("success"));
    assert_eq!(metadata["rows_affected"], json!(3));
    assert_eq!(metadata["execution_time_ms"], json!(101.5));
}

#[test]
fn test_hash_stable_within_run() {
    let record = QueryRecord::new("SELECT * FROM widgets");
    let first = extract_metadata(&record, &success_result());
    let second = extract_metadata(&record, &success_result());
    assert_eq!(first["query_hash"], second["query_hash"]);
}

#[test]
fn test_query_length_counts_characters() {
    let record = QueryRecord::new("SELECT 'héllo'");
    let metadata = extract_metadata(&record, &success_result());
    assert_eq!(metadata["query_length"], json!(14));
}
