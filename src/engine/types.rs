//! Execution result types for querypipe.
//!
//! Defines the structures used to represent mock query execution results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome status of an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    #[default]
    Success,
    Error,
}

impl ExecutionStatus {
    /// Returns the status as a string for metadata and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape of statement the engine classified the query as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// A SELECT-shaped statement producing a result set.
    Query,
    Insert,
    Update,
    Delete,
    #[default]
    Unknown,
}

impl ResultType {
    /// Returns the result type as a string for metadata and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a single value in a sample preview row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),
}

impl Value {
    /// Attempts to convert the value to a string representation.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// A row of a sample preview.
pub type Row = Vec<Value>;

/// Ordered sample rows returned for SELECT-shaped statements.
///
/// Column order comes from the first sample row and defines the header order
/// in rendered tables. Rows shorter than the header render missing cells as
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplePreview {
    /// Column names, in header order.
    pub columns: Vec<String>,

    /// Rows of data, aligned to `columns`.
    pub rows: Vec<Row>,
}

impl SamplePreview {
    /// Creates an empty preview.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a preview with the given columns and rows.
    pub fn with_data(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Returns true if the preview has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell at (row, column) as a display string, or the empty
    /// string if the row is shorter than the header.
    pub fn cell(&self, row: usize, column: usize) -> String {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(Value::to_display_string)
            .unwrap_or_default()
    }
}

/// The result of one mock execution of a query.
///
/// Transient value, recomputed on every execution call. Internal faults are
/// reported as `status = Error` values rather than propagated as hard
/// failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Whether the execution succeeded.
    pub status: ExecutionStatus,

    /// Error detail when `status` is `Error`.
    pub error_message: Option<String>,

    /// Canned count of rows affected by the statement.
    pub rows_affected: u64,

    /// Measured wall-clock time of the (simulated) execution.
    pub execution_time_ms: f64,

    /// Statement shape the query was classified as.
    pub result_type: ResultType,

    /// Sample rows, only populated for SELECT-shaped statements.
    pub preview: SamplePreview,
}

impl ExecutionResult {
    /// Creates a successful result.
    pub fn success(result_type: ResultType, rows_affected: u64, preview: SamplePreview) -> Self {
        Self {
            status: ExecutionStatus::Success,
            error_message: None,
            rows_affected,
            execution_time_ms: 0.0,
            result_type,
            preview,
        }
    }

    /// Creates an error result carrying the fault message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Error,
            error_message: Some(message.into()),
            rows_affected: 0,
            execution_time_ms: 0.0,
            result_type: ResultType::Unknown,
            preview: SamplePreview::empty(),
        }
    }

    /// Sets the measured execution time.
    pub fn with_execution_time_ms(mut self, ms: f64) -> Self {
        self.execution_time_ms = ms;
        self
    }

    /// Returns true if the execution succeeded.
    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }
}
