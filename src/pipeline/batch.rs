//! Sequential batch runner.
//!
//! Executes an ordered list of named SQL scripts, validating each result and
//! stopping at the first validation failure. There are no retries; the
//! summary reports which script failed and why.

use crate::engine::{ExecutionEngine, ExecutionResult};
use crate::error::{QuerypipeError, Result};
use tracing::{info, warn};

/// A named SQL script in a batch.
#[derive(Debug, Clone)]
pub struct BatchScript {
    pub name: String,
    pub query: String,
}

impl BatchScript {
    /// Creates a new script.
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
        }
    }
}

/// The outcome of executing one script.
#[derive(Debug, Clone)]
pub struct ScriptOutcome {
    pub script_name: String,
    pub result: ExecutionResult,
}

/// Summary of a batch run.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Per-script outcomes, in execution order. Scripts after the first
    /// failure are absent.
    pub outcomes: Vec<ScriptOutcome>,

    /// Index into `outcomes` of the script that failed validation, if any.
    pub failed: Option<usize>,
}

impl BatchSummary {
    /// Number of scripts that executed successfully.
    pub fn successful_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_success()).count()
    }

    /// Sum of execution times across successful scripts.
    pub fn total_execution_time_ms(&self) -> f64 {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_success())
            .map(|o| o.result.execution_time_ms)
            .sum()
    }

    /// Returns true if the batch stopped before running every script.
    pub fn stopped_early(&self) -> bool {
        self.failed.is_some()
    }

    /// Name of the failed script, if any.
    pub fn failed_script(&self) -> Option<&str> {
        self.failed
            .map(|i| self.outcomes[i].script_name.as_str())
    }
}

/// Validates an execution result, failing when the status is not success.
pub fn validate_result(result: &ExecutionResult) -> Result<()> {
    if result.is_success() {
        Ok(())
    } else {
        Err(QuerypipeError::execution(
            result
                .error_message
                .clone()
                .unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

/// Executes the scripts in order, stopping on the first validation failure.
pub async fn run_batch(engine: &dyn ExecutionEngine, scripts: &[BatchScript]) -> BatchSummary {
    let mut outcomes = Vec::with_capacity(scripts.len());
    let mut failed = None;

    for (index, script) in scripts.iter().enumerate() {
        info!("Executing SQL script: {}", script.name);
        let result = engine.execute(&script.query).await;

        let valid = validate_result(&result);
        outcomes.push(ScriptOutcome {
            script_name: script.name.clone(),
            result,
        });

        if let Err(e) = valid {
            warn!("Batch stopped: validation failed for '{}': {e}", script.name);
            failed = Some(index);
            break;
        }

        info!("Script '{}' executed successfully", script.name);
    }

    BatchSummary { outcomes, failed }
}

/// The demo batch: create, seed, update, query, and clean up a users table.
pub fn default_scripts() -> Vec<BatchScript> {
    vec![
        BatchScript::new(
            "create_users_table",
            "CREATE TABLE IF NOT EXISTS users (\n\
                 id SERIAL PRIMARY KEY,\n\
                 name VARCHAR(255) NOT NULL,\n\
                 email VARCHAR(255) UNIQUE NOT NULL,\n\
                 created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,\n\
                 status VARCHAR(50) DEFAULT 'active'\n\
             )",
        ),
        BatchScript::new(
            "insert_sample_users",
            "INSERT INTO users (name, email) VALUES\n\
             ('John Doe', 'john@example.com'),\n\
             ('Jane Smith', 'jane@example.com'),\n\
             ('Bob Johnson', 'bob@example.com'),\n\
             ('Alice Brown', 'alice@example.com'),\n\
             ('Charlie Wilson', 'charlie@example.com')",
        ),
        BatchScript::new(
            "update_user_status",
            "UPDATE users\n\
             SET status = 'premium'\n\
             WHERE email IN ('john@example.com', 'jane@example.com')",
        ),
        BatchScript::new(
            "query_active_users",
            "SELECT id, name, email, status, created_at\n\
             FROM users\n\
             WHERE status = 'active'\n\
             ORDER BY created_at DESC",
        ),
        BatchScript::new(
            "cleanup_inactive_users",
            "DELETE FROM users\n\
             WHERE status = 'inactive'\n\
             AND created_at < NOW() - INTERVAL '30 days'",
        ),
    ]
}
