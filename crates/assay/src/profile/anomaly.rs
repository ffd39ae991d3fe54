//! Table-level anomaly checks: missing values, unseen categories and
//! IQR outliers.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{AssayError, Result};
use crate::schema::{Column, ColumnType, Table};
use crate::stats::{quantile_sorted, round_to, sorted};

/// Previously observed categories per column.
pub type BaselineSchema = IndexMap<String, Vec<String>>;

/// Parse a baseline schema from JSON: `{"column": ["value", ...], ...}`.
/// Non-string values are taken in their JSON text form.
pub fn baseline_schema_from_json(text: &str) -> Result<BaselineSchema> {
    let raw: IndexMap<String, Vec<serde_json::Value>> = serde_json::from_str(text)
        .map_err(|e| AssayError::Config(format!("invalid baseline schema: {}", e)))?;

    Ok(raw
        .into_iter()
        .map(|(column, values)| {
            let values = values
                .into_iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect();
            (column, values)
        })
        .collect())
}

/// Categories present now but absent from the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategories {
    pub new_categories: Vec<String>,
}

/// Anomalies found in one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Anomalies {
    /// Percentage of missing cells, for columns with any.
    pub missing_values: IndexMap<String, f64>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub schema_drift: IndexMap<String, NewCategories>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub outliers: IndexMap<String, Vec<f64>>,
}

/// Runs the anomaly checks.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyDetector {
    iqr_multiplier: f64,
    decimals: u32,
}

impl AnomalyDetector {
    pub fn new(iqr_multiplier: f64, decimals: u32) -> Self {
        Self {
            iqr_multiplier,
            decimals,
        }
    }

    pub fn detect(&self, table: &Table, baseline: Option<&BaselineSchema>) -> Anomalies {
        Anomalies {
            missing_values: self.missing_values(table),
            schema_drift: baseline
                .map(|b| self.schema_drift(table, b))
                .unwrap_or_default(),
            outliers: self.outliers(table),
        }
    }

    fn missing_values(&self, table: &Table) -> IndexMap<String, f64> {
        table
            .columns()
            .iter()
            .filter(|c| c.null_count() > 0)
            .map(|c| (c.name.clone(), round_to(c.null_fraction() * 100.0, self.decimals)))
            .collect()
    }

    /// Only text columns are compared; new categories are listed sorted.
    fn schema_drift(&self, table: &Table, baseline: &BaselineSchema) -> IndexMap<String, NewCategories> {
        let mut drift = IndexMap::new();
        for (name, known) in baseline {
            let Some(column) = table.column(name) else {
                continue;
            };
            if column.column_type != ColumnType::Text {
                continue;
            }

            let mut new_categories: Vec<String> = column
                .value_counts()
                .keys()
                .map(|v| v.to_string())
                .filter(|v| !known.contains(v))
                .collect();
            if new_categories.is_empty() {
                continue;
            }
            new_categories.sort();
            drift.insert(name.clone(), NewCategories { new_categories });
        }
        drift
    }

    fn outliers(&self, table: &Table) -> IndexMap<String, Vec<f64>> {
        table
            .columns()
            .iter()
            .filter(|c| c.column_type.is_numeric())
            .filter_map(|c| {
                let found = self.column_outliers(c);
                (!found.is_empty()).then(|| (c.name.clone(), found))
            })
            .collect()
    }

    /// Values strictly outside `[Q1 - k*IQR, Q3 + k*IQR]`, in row order.
    pub fn column_outliers(&self, column: &Column) -> Vec<f64> {
        let values = column.numeric_values();
        let ordered = sorted(&values);
        let (Some(q1), Some(q3)) = (quantile_sorted(&ordered, 0.25), quantile_sorted(&ordered, 0.75))
        else {
            return Vec::new();
        };
        let iqr = q3 - q1;
        let low = q1 - self.iqr_multiplier * iqr;
        let high = q3 + self.iqr_multiplier * iqr;

        values
            .into_iter()
            .filter(|&v| v < low || v > high)
            .map(|v| round_to(v, self.decimals))
            .collect()
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(1.5, 2)
    }
}
