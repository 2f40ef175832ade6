//! JSON codec for query records.
//!
//! Serializes a [`QueryRecord`] to a JSON document with fields `query`,
//! `name`, `description`, `parameters`, `created_at` (ISO-8601 or null), and
//! reconstructs records from the same layout. Deserialization fails with a
//! malformed-record error when the required `query` field is absent.

use crate::error::{QuerypipeError, Result};
use crate::query::QueryRecord;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Codec for persisting query records as JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactCodec;

/// Intermediate layout with every field optional, so missing required fields
/// surface as domain errors instead of serde errors.
#[derive(Debug, Deserialize)]
struct RawRecord {
    query: Option<String>,
    name: Option<String>,
    description: Option<String>,
    parameters: Option<Map<String, Value>>,
    created_at: Option<String>,
}

impl ArtifactCodec {
    /// Creates a new codec.
    pub fn new() -> Self {
        Self
    }

    /// Serializes a record to pretty-printed JSON.
    pub fn serialize(&self, record: &QueryRecord) -> Result<String> {
        serde_json::to_string_pretty(record)
            .map_err(|e| QuerypipeError::malformed_record(format!("Failed to serialize: {e}")))
    }

    /// Deserializes a record from JSON.
    ///
    /// Applies the same defaults as record construction for missing name and
    /// timestamp. The round-trip `deserialize(serialize(r))` reproduces every
    /// field of `r` exactly, with `created_at` at the format's resolution.
    pub fn deserialize(&self, input: &str) -> Result<QueryRecord> {
        let raw: RawRecord = serde_json::from_str(input)
            .map_err(|e| QuerypipeError::malformed_record(format!("Invalid JSON: {e}")))?;

        let query = match raw.query {
            Some(q) if !q.is_empty() => q,
            Some(_) => {
                return Err(QuerypipeError::malformed_record(
                    "Field 'query' must be non-empty",
                ))
            }
            None => {
                return Err(QuerypipeError::malformed_record(
                    "Missing required field 'query'",
                ))
            }
        };

        let created_at = match raw.created_at {
            Some(ts) => Some(parse_timestamp(&ts)?),
            None => None,
        };

        Ok(QueryRecord::from_parts(
            query,
            raw.name,
            raw.description,
            raw.parameters,
            created_at,
        ))
    }
}

/// Parses an ISO-8601 timestamp into UTC.
fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| QuerypipeError::malformed_record(format!("Invalid timestamp '{ts}': {e}")))
}
