//! Demo pipelines built from plain function composition.
//!
//! A driver threads producer outputs into consumer steps and collects the
//! results in order; no orchestration runtime is involved. Two pipelines are
//! provided: a materializer pipeline that persists query artifacts with their
//! visualizations, and a sequential batch with stop-on-first-failure.

mod analysis;
mod batch;

pub use analysis::{analyze_query, Complexity, ComplexityIndicators, QueryAnalysis};
pub use batch::{
    default_scripts, run_batch, validate_result, BatchScript, BatchSummary, ScriptOutcome,
};

use crate::artifact::{ArtifactStore, Visualization};
use crate::engine::{ExecutionEngine, ExecutionResult};
use crate::error::{QuerypipeError, Result};
use crate::query::QueryRecord;
use crate::secrets::SecretStore;
use serde_json::{json, Map};
use std::path::Path;
use tracing::{info, warn};

/// Driver for the demo pipelines.
///
/// Holds the execution engine and an optional secret store. Credential
/// lookup failures are logged and execution proceeds without credentials;
/// they are never fatal.
pub struct Pipeline<'a> {
    engine: &'a dyn ExecutionEngine,
    secrets: Option<&'a dyn SecretStore>,
    secret_name: String,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over the given engine, without credentials.
    pub fn new(engine: &'a dyn ExecutionEngine) -> Self {
        Self {
            engine,
            secrets: None,
            secret_name: crate::secrets::DEMO_SECRET_NAME.to_string(),
        }
    }

    /// Attaches a secret store and the bundle name to look up.
    pub fn with_secrets(mut self, secrets: &'a dyn SecretStore, name: impl Into<String>) -> Self {
        self.secrets = Some(secrets);
        self.secret_name = name.into();
        self
    }

    /// Executes a query record, consulting the secret store first.
    ///
    /// A missing credential bundle downgrades to credential-less mock
    /// execution with a warning.
    pub async fn execute_query(&self, record: &QueryRecord) -> ExecutionResult {
        info!("Executing query: {}", record.name);
        info!("Query length: {} characters", record.query.chars().count());

        if let Some(store) = self.secrets {
            match store.get(&self.secret_name) {
                Ok(bundle) => {
                    let project = bundle
                        .get("project_id")
                        .or_else(|| bundle.get("host"))
                        .map(String::as_str)
                        .unwrap_or("unknown");
                    info!("Using credentials from '{}' for: {project}", self.secret_name);
                }
                Err(QuerypipeError::SecretNotFound(name)) => {
                    warn!("No credentials found for '{name}', using mock execution");
                }
                Err(e) => {
                    warn!("Credential lookup failed ({e}), using mock execution");
                }
            }
        }

        let result = self.engine.execute(&record.query).await;
        info!(
            "Execution completed with status: {} ({} rows, {:.2} ms)",
            result.status, result.rows_affected, result.execution_time_ms
        );
        result
    }

    /// Runs the materializer pipeline: create the demo records, execute each
    /// one, persist the record and its visualizations under `output_dir`, and
    /// analyze it. Returns the analyses in creation order.
    pub async fn run_materializer_pipeline(&self, output_dir: &Path) -> Result<Vec<QueryAnalysis>> {
        let records = vec![
            create_user_order_analytics(),
            create_customer_segmentation_query(),
        ];

        let mut analyses = Vec::with_capacity(records.len());
        for record in &records {
            let result = self.execute_query(record).await;

            let store = ArtifactStore::new(output_dir.join(&record.name));
            store.save(record)?;
            store.save_visualizations(record, &result)?;

            let metadata = store.extract_metadata(record, &result);
            info!(
                "Extracted {} metadata entries for '{}'",
                metadata.len(),
                record.name
            );

            analyses.push(analyze_query(record, &result));
        }

        Ok(analyses)
    }

    /// Re-renders the views for a record previously saved under `dir`.
    ///
    /// Loads `sql_query.json` from the directory, executes the query again,
    /// and rewrites the HTML, Markdown, and CSV views from the fresh result.
    pub async fn rerender(&self, dir: &Path) -> Result<Vec<Visualization>> {
        let store = ArtifactStore::new(dir);
        let record = store.load()?;
        let result = self.execute_query(&record).await;
        store.save_visualizations(&record, &result)
    }

    /// Runs the batch pipeline over the given scripts.
    pub async fn run_batch_pipeline(&self, scripts: &[BatchScript]) -> BatchSummary {
        if let Some(store) = self.secrets {
            if let Err(QuerypipeError::SecretNotFound(name)) = store.get(&self.secret_name) {
                warn!("No credentials found for '{name}', batch runs against the mock engine");
            }
        }
        run_batch(self.engine, scripts).await
    }
}

/// Producer step: the analytics demo query.
pub fn create_user_order_analytics() -> QueryRecord {
    let query = "\
SELECT
    u.id,
    u.name,
    u.email,
    COUNT(o.id) as order_count,
    SUM(o.total_amount) as total_spent
FROM users u
LEFT JOIN orders o ON u.id = o.user_id
WHERE u.created_at >= '2023-01-01'
GROUP BY u.id, u.name, u.email
HAVING COUNT(o.id) > 0
ORDER BY total_spent DESC
LIMIT 100";

    let mut parameters = Map::new();
    parameters.insert("start_date".to_string(), json!("2023-01-01"));
    parameters.insert("min_orders".to_string(), json!(1));
    parameters.insert("limit".to_string(), json!(100));

    QueryRecord::new(query)
        .with_name("user_order_analytics")
        .with_description(
            "Analytics query to get user order statistics for users created after 2023-01-01",
        )
        .with_parameters(parameters)
}

/// Producer step: the CTE and window-function demo query.
pub fn create_customer_segmentation_query() -> QueryRecord {
    let query = "\
WITH user_metrics AS (
    SELECT
        user_id,
        COUNT(*) as total_orders,
        SUM(total_amount) as total_spent,
        AVG(total_amount) as avg_order_value
    FROM orders
    WHERE created_at >= '2023-01-01'
    GROUP BY user_id
),
user_rankings AS (
    SELECT
        user_id,
        total_orders,
        total_spent,
        avg_order_value,
        ROW_NUMBER() OVER (ORDER BY total_spent DESC) as spending_rank,
        NTILE(4) OVER (ORDER BY total_spent DESC) as spending_quartile
    FROM user_metrics
)
SELECT
    u.name,
    u.email,
    ur.total_orders,
    ur.total_spent,
    ur.spending_rank,
    CASE
        WHEN ur.spending_quartile = 1 THEN 'VIP'
        WHEN ur.spending_quartile = 2 THEN 'High Value'
        WHEN ur.spending_quartile = 3 THEN 'Medium Value'
        ELSE 'Low Value'
    END as customer_segment
FROM users u
JOIN user_rankings ur ON u.id = ur.user_id
WHERE ur.spending_rank <= 50
ORDER BY ur.spending_rank";

    let mut parameters = Map::new();
    parameters.insert("start_date".to_string(), json!("2023-01-01"));
    parameters.insert("top_customers".to_string(), json!(50));

    QueryRecord::new(query)
        .with_name("customer_segmentation_analysis")
        .with_description(
            "Advanced customer segmentation analysis using CTEs and window functions",
        )
        .with_parameters(parameters)
}
