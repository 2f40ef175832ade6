//! Mock execution engine.
//!
//! Fabricates plausible result statistics without contacting any real data
//! store. Row counts and sample rows are canned per statement shape; only the
//! measured execution time varies between calls.

use super::{classify_statement, ExecutionEngine, ExecutionResult, ResultType, SamplePreview};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Default artificial work duration.
const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// A mock execution engine that returns predefined results.
#[derive(Debug, Clone)]
pub struct MockExecutionEngine {
    delay: Duration,
}

impl MockExecutionEngine {
    /// Creates a new mock engine with the default simulated delay.
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }

    /// Creates a mock engine with the given simulated delay.
    ///
    /// Tests use `Duration::ZERO` to avoid slowing the suite down.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Builds the canned result for a statement shape, without timing.
    fn canned_result(result_type: ResultType) -> ExecutionResult {
        match result_type {
            ResultType::Query => {
                ExecutionResult::success(ResultType::Query, 0, sample_preview())
            }
            ResultType::Insert => {
                ExecutionResult::success(ResultType::Insert, 5, SamplePreview::empty())
            }
            ResultType::Update => {
                ExecutionResult::success(ResultType::Update, 12, SamplePreview::empty())
            }
            ResultType::Delete => {
                ExecutionResult::success(ResultType::Delete, 3, SamplePreview::empty())
            }
            ResultType::Unknown => {
                ExecutionResult::success(ResultType::Unknown, 0, SamplePreview::empty())
            }
        }
    }
}

impl Default for MockExecutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutionEngine for MockExecutionEngine {
    async fn execute(&self, sql: &str) -> ExecutionResult {
        let start = Instant::now();

        // Simulate database work.
        tokio::time::sleep(self.delay).await;

        let result_type = classify_statement(sql);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        Self::canned_result(result_type).with_execution_time_ms(elapsed_ms)
    }
}

/// The fixed sample rows returned for SELECT-shaped statements.
fn sample_preview() -> SamplePreview {
    SamplePreview::with_data(
        vec!["id".to_string(), "name".to_string(), "status".to_string()],
        vec![
            vec![1i64.into(), "John Doe".into(), "active".into()],
            vec![2i64.into(), "Jane Smith".into(), "active".into()],
            vec![3i64.into(), "Bob Johnson".into(), "inactive".into()],
        ],
    )
}

/// An execution engine that fails, for exercising error paths in tests and
/// the batch runner's stop-on-first-failure policy.
#[derive(Debug, Clone)]
pub struct FailingExecutionEngine {
    message: String,
    /// When set, only queries containing this substring fail; the rest are
    /// delegated to a zero-delay mock engine.
    trigger: Option<String>,
}

impl FailingExecutionEngine {
    /// Creates an engine that fails every query with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trigger: None,
        }
    }

    /// Creates an engine that fails only queries containing `trigger`.
    pub fn failing_on(trigger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trigger: Some(trigger.into()),
        }
    }
}

#[async_trait]
impl ExecutionEngine for FailingExecutionEngine {
    async fn execute(&self, sql: &str) -> ExecutionResult {
        let should_fail = match &self.trigger {
            Some(t) => sql.contains(t.as_str()),
            None => true,
        };

        if should_fail {
            ExecutionResult::error(self.message.clone())
        } else {
            MockExecutionEngine::with_delay(Duration::ZERO)
                .execute(sql)
                .await
        }
    }
}
