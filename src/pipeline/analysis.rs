//! Query complexity analysis step.
//!
//! Scores a query by coarse structural indicators and derives a complexity
//! tier with an indicative performance score.

use crate::engine::ExecutionResult;
use crate::query::QueryRecord;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Complexity tier assigned to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Structural features detected in a query, by upper-cased substring scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplexityIndicators {
    pub cte: bool,
    pub window_functions: bool,
    pub subqueries: bool,
    pub joins: bool,
    pub aggregations: bool,
    pub having_clause: bool,
}

impl ComplexityIndicators {
    /// Detects indicators in the given query text.
    pub fn detect(query: &str) -> Self {
        let upper = query.to_uppercase();
        Self {
            cte: upper.contains("WITH"),
            window_functions: upper.contains("OVER"),
            subqueries: query.contains('(') && upper.contains("SELECT"),
            joins: ["JOIN", "INNER JOIN", "LEFT JOIN", "RIGHT JOIN"]
                .iter()
                .any(|j| upper.contains(j)),
            aggregations: ["COUNT", "SUM", "AVG", "MIN", "MAX"]
                .iter()
                .any(|a| upper.contains(a)),
            having_clause: upper.contains("HAVING"),
        }
    }

    /// Number of indicators present.
    pub fn score(&self) -> usize {
        [
            self.cte,
            self.window_functions,
            self.subqueries,
            self.joins,
            self.aggregations,
            self.having_clause,
        ]
        .iter()
        .filter(|&&b| b)
        .count()
    }
}

/// Result of the analysis step for one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnalysis {
    pub query_name: String,
    pub complexity: Complexity,
    pub performance_score: u8,
    pub indicators: ComplexityIndicators,
    pub recommendations: Vec<String>,
}

/// Analyzes a query's structure against its execution result.
pub fn analyze_query(record: &QueryRecord, result: &ExecutionResult) -> QueryAnalysis {
    let indicators = ComplexityIndicators::detect(&record.query);
    let (complexity, performance_score) = match indicators.score() {
        s if s >= 4 => (Complexity::High, 70),
        s if s >= 2 => (Complexity::Medium, 85),
        _ => (Complexity::Low, 95),
    };

    let mut recommendations = Vec::new();
    if indicators.joins {
        recommendations
            .push("Joins may benefit from indexes on the join key columns".to_string());
    }
    if indicators.window_functions {
        recommendations
            .push("Window functions can be expensive on large partitions".to_string());
    }
    if !result.is_success() {
        recommendations.push("Execution failed; review the query before re-running".to_string());
    }

    info!(
        "Query complexity analysis for '{}': {} (score {}/100)",
        record.name, complexity, performance_score
    );

    QueryAnalysis {
        query_name: record.name.clone(),
        complexity,
        performance_score,
        indicators,
        recommendations,
    }
}
