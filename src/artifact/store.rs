//! Directory-backed artifact store.
//!
//! Composes the codec, renderers, and metadata extractor: one directory per
//! record holds the serialized JSON document plus the generated HTML,
//! Markdown, and CSV side files.

use crate::artifact::codec::ArtifactCodec;
use crate::artifact::metadata::extract_metadata;
use crate::artifact::report;
use crate::engine::ExecutionResult;
use crate::error::{QuerypipeError, Result};
use crate::query::QueryRecord;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const RECORD_FILE: &str = "sql_query.json";
const HTML_FILE: &str = "sql_query_visualization.html";
const MARKDOWN_FILE: &str = "sql_query_summary.md";
const CSV_FILE: &str = "query_metadata.csv";

/// Kind of a generated visualization file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationKind {
    Html,
    Markdown,
    Csv,
}

/// A generated visualization file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visualization {
    pub path: PathBuf,
    pub kind: VisualizationKind,
}

/// Stores one query record and its derived views under a directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    codec: ArtifactCodec,
}

impl ArtifactStore {
    /// Creates a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            codec: ArtifactCodec::new(),
        }
    }

    /// Returns the store's root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serializes the record to `sql_query.json` in the store directory.
    pub fn save(&self, record: &QueryRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(RECORD_FILE);
        let document = self.codec.serialize(record)?;
        fs::write(&path, document)?;
        info!("Saved query record to {}", path.display());
        Ok(path)
    }

    /// Loads the record back from `sql_query.json`.
    pub fn load(&self) -> Result<QueryRecord> {
        let path = self.dir.join(RECORD_FILE);
        let document = fs::read_to_string(&path).map_err(|e| {
            QuerypipeError::io(format!("Failed to read {}: {e}", path.display()))
        })?;
        self.codec.deserialize(&document)
    }

    /// Writes the HTML, Markdown, and CSV views derived from the record and
    /// one shared execution result, returning the written files.
    pub fn save_visualizations(
        &self,
        record: &QueryRecord,
        result: &ExecutionResult,
    ) -> Result<Vec<Visualization>> {
        fs::create_dir_all(&self.dir)?;

        let views = [
            (
                HTML_FILE,
                VisualizationKind::Html,
                report::render_html(record, result),
            ),
            (
                MARKDOWN_FILE,
                VisualizationKind::Markdown,
                report::render_markdown(record, result),
            ),
            (
                CSV_FILE,
                VisualizationKind::Csv,
                report::render_csv(record, result),
            ),
        ];

        let mut written = Vec::with_capacity(views.len());
        for (file, kind, content) in views {
            let path = self.dir.join(file);
            fs::write(&path, content)?;
            written.push(Visualization { path, kind });
        }

        info!(
            "Saved {} visualizations for '{}' under {}",
            written.len(),
            record.name,
            self.dir.display()
        );
        Ok(written)
    }

    /// Extracts flat metadata for the record and result.
    pub fn extract_metadata(
        &self,
        record: &QueryRecord,
        result: &ExecutionResult,
    ) -> Map<String, Value> {
        extract_metadata(record, result)
    }
}
