//! Flat metadata extraction for query records.
//!
//! Produces a key/value record suitable for tracking and search: query name,
//! length, hash, parameter presence, execution stats, and a keyword tag list
//! scanned from a fixed SQL vocabulary.

use crate::engine::ExecutionResult;
use crate::query::QueryRecord;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

/// Fixed ordered vocabulary of SQL terms scanned for keyword tagging.
///
/// Matching is case-insensitive literal substring against the upper-cased
/// query text, with no tokenization: `ORDER BY` inside `REORDER BY` counts as
/// a match. This looseness is intentional and the matched list preserves
/// vocabulary order.
pub const KEYWORD_VOCABULARY: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "GROUP BY",
    "ORDER BY",
    "HAVING",
    "INSERT",
    "UPDATE",
    "DELETE",
    "CREATE",
    "ALTER",
    "DROP",
    "INDEX",
    "TABLE",
    "VIEW",
    "PROCEDURE",
    "FUNCTION",
    "UNION",
    "INTERSECT",
    "EXCEPT",
    "WITH",
    "CTE",
    "WINDOW",
    "OVER",
    "PARTITION BY",
    "ROW_NUMBER",
    "RANK",
    "DENSE_RANK",
    "COUNT",
    "SUM",
    "AVG",
    "MIN",
    "MAX",
    "CASE",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
];

/// Extracts flat metadata from a record and its execution result.
pub fn extract_metadata(record: &QueryRecord, result: &ExecutionResult) -> Map<String, Value> {
    let mut metadata = Map::new();

    metadata.insert("query_name".to_string(), json!(record.name));
    metadata.insert(
        "query_length".to_string(),
        json!(record.query.chars().count()),
    );
    metadata.insert("query_hash".to_string(), json!(query_hash(&record.query)));
    metadata.insert(
        "has_parameters".to_string(),
        json!(record.has_parameters()),
    );
    metadata.insert(
        "parameter_count".to_string(),
        json!(record.parameter_count()),
    );
    metadata.insert(
        "execution_status".to_string(),
        json!(result.status.as_str()),
    );
    metadata.insert("rows_affected".to_string(), json!(result.rows_affected));
    metadata.insert(
        "execution_time_ms".to_string(),
        json!(result.execution_time_ms),
    );
    metadata.insert(
        "created_at".to_string(),
        json!(record.created_at.to_rfc3339()),
    );

    if let Some(description) = &record.description {
        metadata.insert("description".to_string(), json!(description));
    }

    let keywords = extract_keywords(&record.query);
    if !keywords.is_empty() {
        metadata.insert("sql_keywords".to_string(), json!(keywords.join(", ")));
    }

    metadata
}

/// Scans the query for vocabulary keywords, returning matches in vocabulary
/// order.
pub fn extract_keywords(query: &str) -> Vec<&'static str> {
    let upper = query.to_uppercase();
    KEYWORD_VOCABULARY
        .iter()
        .filter(|keyword| upper.contains(*keyword))
        .copied()
        .collect()
}

/// Hashes the query text to a short stable identifier.
pub fn query_hash(query: &str) -> String {
    let digest = Sha256::digest(query.as_bytes());
    hex::encode(digest)[..16].to_string()
}
