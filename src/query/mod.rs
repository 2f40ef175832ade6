//! Query record types for querypipe.
//!
//! A [`QueryRecord`] is the named, timestamped holder of a SQL statement and
//! its optional metadata. Records are built once by a producer step and read
//! by the codec, renderers, and metadata extractor; they are never mutated
//! in place downstream.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// A SQL statement with a name, optional description and parameters, and a
/// creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRecord {
    /// The SQL statement text.
    pub query: String,

    /// Human-readable name. Defaults to a timestamp-derived identifier.
    pub name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Optional named parameters associated with the query.
    pub parameters: Option<Map<String, Value>>,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl QueryRecord {
    /// Creates a new record for the given SQL text.
    ///
    /// The creation timestamp is set to now and the name defaults to
    /// `query_YYYYMMDD_HHMMSS` derived from that timestamp.
    pub fn new(query: impl Into<String>) -> Self {
        let created_at = Utc::now();
        Self {
            query: query.into(),
            name: default_name(&created_at),
            description: None,
            parameters: None,
            created_at,
        }
    }

    /// Sets the record name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the record description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the query parameters.
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Assembles a record from deserialized parts, applying the same defaults
    /// as [`QueryRecord::new`] for missing name and timestamp.
    pub fn from_parts(
        query: String,
        name: Option<String>,
        description: Option<String>,
        parameters: Option<Map<String, Value>>,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        let created_at = created_at.unwrap_or_else(Utc::now);
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => default_name(&created_at),
        };
        Self {
            query,
            name,
            description,
            parameters,
            created_at,
        }
    }

    /// Returns the number of parameters (0 when none are set).
    pub fn parameter_count(&self) -> usize {
        self.parameters.as_ref().map_or(0, |p| p.len())
    }

    /// Returns true if the record carries any parameters.
    pub fn has_parameters(&self) -> bool {
        self.parameter_count() > 0
    }
}

/// Derives the default record name from a creation timestamp.
fn default_name(created_at: &DateTime<Utc>) -> String {
    format!("query_{}", created_at.format("%Y%m%d_%H%M%S"))
}
