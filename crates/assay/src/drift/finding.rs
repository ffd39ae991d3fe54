//! Drift findings, one per column.

use serde::Serialize;

/// What drift analysis found for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DriftFinding {
    /// The column was added, removed or changed type.
    SchemaChange { schema_change: String },
    /// Result of a two-sample test.
    Distribution {
        drift_score: f64,
        p_value: f64,
        direction: String,
    },
    /// Date ranges on both sides (ISO dates).
    TemporalRange {
        earliest_baseline: String,
        earliest_current: String,
        latest_baseline: String,
        latest_current: String,
    },
    /// Analysis of this column failed.
    Note { note: String },
}

impl DriftFinding {
    pub fn schema_change(message: impl Into<String>) -> Self {
        DriftFinding::SchemaChange {
            schema_change: message.into(),
        }
    }

    pub fn note(message: impl Into<String>) -> Self {
        DriftFinding::Note {
            note: message.into(),
        }
    }

    pub fn is_schema_change(&self) -> bool {
        matches!(self, DriftFinding::SchemaChange { .. })
    }

    pub fn p_value(&self) -> Option<f64> {
        match self {
            DriftFinding::Distribution { p_value, .. } => Some(*p_value),
            _ => None,
        }
    }
}
