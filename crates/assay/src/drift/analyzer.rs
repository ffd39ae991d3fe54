//! Per-column drift between a baseline and a current table.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::inference::value_to_datetime;
use crate::schema::{Column, ColumnKind, Table};
use crate::stats::{TestError, chi_square_two_sample, ks_two_sample, mean};

use super::finding::DriftFinding;
use super::schema_diff::SchemaDiffer;

/// Failure analyzing a single column. Reported as a note, never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Test(#[from] TestError),
    #[error("no numeric values")]
    NotNumeric,
}

/// Findings for one table pair, keyed by column name.
pub type DriftFindings = IndexMap<String, DriftFinding>;

/// Detects schema changes and distribution drift.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriftAnalyzer {
    differ: SchemaDiffer,
}

impl DriftAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare two tables. Schema changes come first; data drift for columns
    /// of unchanged name and type follows. A later finding for the same
    /// column replaces an earlier one.
    pub fn compare(&self, baseline: &Table, current: &Table) -> DriftFindings {
        let mut findings = DriftFindings::new();

        for change in self.differ.diff(baseline, current) {
            findings.insert(
                change.column().to_string(),
                DriftFinding::schema_change(change.to_string()),
            );
        }

        for column in baseline.columns() {
            let Some(other) = current.column(&column.name) else {
                continue;
            };
            if other.column_type != column.column_type {
                continue;
            }
            if let Some(finding) = self.column_drift(column, other) {
                findings.insert(column.name.clone(), finding);
            }
        }

        debug!(columns = findings.len(), "compared tables");
        findings
    }

    /// Drift of one shared column, or `None` when either side has no values
    /// to compare.
    pub fn column_drift(&self, baseline: &Column, current: &Column) -> Option<DriftFinding> {
        if baseline.non_null().next().is_none() || current.non_null().next().is_none() {
            return None;
        }

        let kind = baseline.kind();
        let result = match kind {
            ColumnKind::Numeric => numeric_drift(baseline, current).map(Some),
            ColumnKind::Categorical => categorical_drift(baseline, current).map(Some),
            ColumnKind::Temporal => Ok(temporal_drift(baseline, current)),
        };

        match result {
            Ok(finding) => finding,
            Err(err) => {
                warn!(column = %baseline.name, kind = kind.label(), error = %err, "drift detection failed");
                Some(DriftFinding::note(format!(
                    "{} drift detection failed: {}",
                    kind.label(),
                    err
                )))
            }
        }
    }
}

fn numeric_drift(baseline: &Column, current: &Column) -> Result<DriftFinding, AnalysisError> {
    let a = baseline.numeric_values();
    let b = current.numeric_values();
    let outcome = ks_two_sample(&a, &b)?;

    let (Some(mean_a), Some(mean_b)) = (mean(&a), mean(&b)) else {
        return Err(AnalysisError::NotNumeric);
    };
    let direction = if mean_b > mean_a {
        format!("increase in mean {}", baseline.name)
    } else {
        format!("decrease in mean {}", baseline.name)
    };

    Ok(DriftFinding::Distribution {
        drift_score: outcome.statistic,
        p_value: outcome.p_value,
        direction,
    })
}

fn categorical_drift(baseline: &Column, current: &Column) -> Result<DriftFinding, AnalysisError> {
    let a = baseline.value_counts();
    let b = current.value_counts();
    let outcome = chi_square_two_sample(&a, &b)?;

    let direction = if b.keys().any(|k| !a.contains_key(*k)) {
        "new categories appeared"
    } else {
        "distribution changed"
    };

    Ok(DriftFinding::Distribution {
        drift_score: outcome.statistic,
        p_value: outcome.p_value,
        direction: direction.to_string(),
    })
}

fn temporal_drift(baseline: &Column, current: &Column) -> Option<DriftFinding> {
    let range = |column: &Column| {
        let dates = column.non_null().filter_map(value_to_datetime);
        dates.fold(None, |acc, dt| match acc {
            None => Some((dt, dt)),
            Some((lo, hi)) => Some((dt.min(lo), dt.max(hi))),
        })
    };

    let (earliest_a, latest_a) = range(baseline)?;
    let (earliest_b, latest_b) = range(current)?;
    let iso = |dt: chrono::NaiveDateTime| dt.date().format("%Y-%m-%d").to_string();

    Some(DriftFinding::TemporalRange {
        earliest_baseline: iso(earliest_a),
        earliest_current: iso(earliest_b),
        latest_baseline: iso(latest_a),
        latest_current: iso(latest_b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn csv(data: &str) -> Table {
        Parser::new().parse_bytes(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_self_comparison_has_no_drift() {
        let t = csv("age,city\n30,NYC\n40,LA\n50,NYC\n");
        let findings = DriftAnalyzer::new().compare(&t, &t);

        match &findings["age"] {
            DriftFinding::Distribution { drift_score, p_value, .. } => {
                assert_eq!(*drift_score, 0.0);
                assert_eq!(*p_value, 1.0);
            }
            other => panic!("unexpected finding {:?}", other),
        }
        match &findings["city"] {
            DriftFinding::Distribution { drift_score, direction, .. } => {
                assert_eq!(*drift_score, 0.0);
                assert_eq!(direction, "distribution changed");
            }
            other => panic!("unexpected finding {:?}", other),
        }
    }

    #[test]
    fn test_numeric_direction() {
        let a = csv("age\n1\n2\n3\n");
        let b = csv("age\n10\n20\n30\n");
        let findings = DriftAnalyzer::new().compare(&a, &b);
        match &findings["age"] {
            DriftFinding::Distribution { direction, drift_score, .. } => {
                assert_eq!(direction, "increase in mean age");
                assert_eq!(*drift_score, 1.0);
            }
            other => panic!("unexpected finding {:?}", other),
        }
        let findings = DriftAnalyzer::new().compare(&b, &a);
        assert!(matches!(
            &findings["age"],
            DriftFinding::Distribution { direction, .. } if direction == "decrease in mean age"
        ));
    }

    #[test]
    fn test_new_categories() {
        let a = csv("city\nNYC\nLA\n");
        let b = csv("city\nNYC\nSF\n");
        let findings = DriftAnalyzer::new().compare(&a, &b);
        assert!(matches!(
            &findings["city"],
            DriftFinding::Distribution { direction, .. } if direction == "new categories appeared"
        ));
    }

    #[test]
    fn test_schema_changes_and_skips() {
        let a = csv("id,age,gone\n1,30,x\n");
        let b = csv("id,age,email\n1,thirty,a@b.c\n");
        let findings = DriftAnalyzer::new().compare(&a, &b);

        assert_eq!(
            findings["email"],
            DriftFinding::schema_change("new column detected: email")
        );
        assert_eq!(findings["gone"], DriftFinding::schema_change("column missing: gone"));
        assert_eq!(
            findings["age"],
            DriftFinding::schema_change("type change: integer → text")
        );
        assert!(findings.contains_key("id"));
    }

    #[test]
    fn test_empty_side_is_skipped() {
        let a = csv("score,name\n1,a\n2,b\n");
        let b = csv("score,name\n,a\n,b\n");
        let findings = DriftAnalyzer::new().compare(&a, &b);
        // score becomes Unknown on the current side: a type change, not a test.
        assert!(findings["score"].is_schema_change());

        let c = csv("name\nNA\n");
        let d = csv("name\nNA\n");
        assert!(DriftAnalyzer::new().compare(&c, &d).is_empty());
    }

    #[test]
    fn test_temporal_range() {
        let a = csv("signup_date\n2024-01-05\n2024-03-01\nnot a date\n");
        let b = csv("signup_date\n2024-02-01\n2024-06-30\n");
        let findings = DriftAnalyzer::new().compare(&a, &b);
        assert_eq!(
            findings["signup_date"],
            DriftFinding::TemporalRange {
                earliest_baseline: "2024-01-05".into(),
                earliest_current: "2024-02-01".into(),
                latest_baseline: "2024-03-01".into(),
                latest_current: "2024-06-30".into(),
            }
        );
    }

    #[test]
    fn test_failed_column_becomes_note() {
        let a = csv("x,y\ninf,1\n-inf,2\n");
        let b = csv("x,y\ninf,10\n-inf,20\n");
        let findings = DriftAnalyzer::new().compare(&a, &b);

        assert_eq!(
            findings["x"],
            DriftFinding::note("numeric drift detection failed: sample contains no finite values")
        );
        match &findings["y"] {
            DriftFinding::Distribution { drift_score, direction, .. } => {
                assert_eq!(*drift_score, 1.0);
                assert_eq!(direction, "increase in mean y");
            }
            other => panic!("unexpected finding {:?}", other),
        }
    }

    #[test]
    fn test_temporal_without_dates_is_skipped() {
        let a = csv("update_date\nsoon\n");
        let b = csv("update_date\nlater\n");
        assert!(DriftAnalyzer::new().compare(&a, &b).is_empty());
    }
}
