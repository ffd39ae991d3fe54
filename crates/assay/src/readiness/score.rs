//! Readiness scores and report.

use indexmap::IndexMap;
use serde::Serialize;

/// Composite quality score of one table, each part in `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessScore {
    pub overall: i64,
    pub completeness: i64,
    pub consistency: i64,
    pub schema_health: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReadinessScore {
    /// The all-zero score of a dataset with nothing in it.
    pub fn empty() -> Self {
        Self {
            overall: 0,
            completeness: 0,
            consistency: 0,
            schema_health: 0,
            message: Some("Dataset is empty.".to_string()),
        }
    }
}

/// Relative weight of each part in the overall score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessWeights {
    pub completeness: f64,
    pub consistency: f64,
    pub schema_health: f64,
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        Self {
            completeness: 0.4,
            consistency: 0.4,
            schema_health: 0.2,
        }
    }
}

/// Readiness of one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessReport {
    pub source_file: String,
    pub readiness_score: ReadinessScore,
    pub total_rows_analyzed: usize,
    /// Per-sheet scores, for workbooks with several sheets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets: Option<IndexMap<String, ReadinessScore>>,
}
