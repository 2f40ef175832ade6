//! Mock execution layer for querypipe.
//!
//! Provides a trait-based interface for query execution, allowing the mock
//! engine and test doubles to be used interchangeably. No implementation in
//! this crate contacts a real data store.

mod mock;
mod types;

pub use mock::{FailingExecutionEngine, MockExecutionEngine};
pub use types::{ExecutionResult, ExecutionStatus, ResultType, Row, SamplePreview, Value};

use async_trait::async_trait;

/// Trait defining the interface for query execution engines.
///
/// Execution never fails as a `Result`; boundary faults are converted into
/// `status = Error` result values.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Executes a SQL statement and returns the (mock) result.
    async fn execute(&self, sql: &str) -> ExecutionResult;
}

/// Classifies a SQL statement by the first matching verb, checked in
/// priority order SELECT, INSERT, UPDATE, DELETE.
///
/// Matching is case-insensitive substring containment against the upper-cased
/// text, deliberately loose: no tokenization is attempted.
pub fn classify_statement(sql: &str) -> ResultType {
    let upper = sql.to_uppercase();
    if upper.contains("SELECT") {
        ResultType::Query
    } else if upper.contains("INSERT") {
        ResultType::Insert
    } else if upper.contains("UPDATE") {
        ResultType::Update
    } else if upper.contains("DELETE") {
        ResultType::Delete
    } else {
        ResultType::Unknown
    }
}
