//! Field profiles of whole tables.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::schema::Table;

use super::anomaly::{Anomalies, AnomalyDetector, BaselineSchema};
use super::statistics::FieldStatistics;

/// Profiling configuration.
#[derive(Debug, Clone, Copy)]
pub struct ProfileConfig {
    /// Fence multiplier for IQR outliers.
    pub iqr_multiplier: f64,
    /// Decimal places for every reported number.
    pub decimals: u32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            decimals: 2,
        }
    }
}

impl ProfileConfig {
    pub fn with_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = multiplier;
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }
}

/// Profile of one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProfile {
    /// Set only for tables without rows or columns.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    pub field_statistics: IndexMap<String, FieldStatistics>,
    pub anomalies: Anomalies,
}

/// Profile of a dataset: a single table, or every table under `tables`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProfileReport {
    Single(TableProfile),
    Tables { tables: IndexMap<String, TableProfile> },
}

/// Computes field statistics and anomalies.
#[derive(Debug, Clone, Default)]
pub struct FieldProfiler {
    config: ProfileConfig,
}

impl FieldProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfileConfig) -> Self {
        Self { config }
    }

    pub fn profile(&self, table: &Table, baseline: Option<&BaselineSchema>) -> TableProfile {
        if table.is_empty() {
            return TableProfile {
                empty: true,
                row_count: Some(0),
                field_statistics: IndexMap::new(),
                anomalies: Anomalies::default(),
            };
        }

        let field_statistics: IndexMap<String, FieldStatistics> = table
            .columns()
            .iter()
            .filter_map(|column| {
                FieldStatistics::compute(column, self.config.decimals)
                    .map(|stats| (column.name.clone(), stats))
            })
            .collect();

        let detector = AnomalyDetector::new(self.config.iqr_multiplier, self.config.decimals);
        let anomalies = detector.detect(table, baseline);

        debug!(
            columns = table.column_count(),
            profiled = field_statistics.len(),
            outlier_columns = anomalies.outliers.len(),
            "profiled table"
        );

        TableProfile {
            empty: false,
            row_count: None,
            field_statistics,
            anomalies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;
    use serde_json::json;

    #[test]
    fn test_profile_table() {
        let table = Parser::new()
            .parse_bytes(b"amount,city\n1,NYC\n2,NYC\n3,LA\n4,\n5,LA\n100,LA\n")
            .unwrap();
        let profile = FieldProfiler::new().profile(&table, None);

        assert!(!profile.empty);
        assert_eq!(profile.field_statistics.len(), 2);
        assert_eq!(profile.anomalies.outliers["amount"], vec![100.0]);
        assert_eq!(profile.anomalies.missing_values["city"], 16.67);

        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("empty").is_none());
        assert_eq!(value["field_statistics"]["city"]["unique_values"], json!(2));
    }

    #[test]
    fn test_empty_table_profile() {
        let table = Parser::new().parse_bytes(b"a,b\n").unwrap();
        let profile = FieldProfiler::new().profile(&table, None);
        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({
                "empty": true,
                "row_count": 0,
                "field_statistics": {},
                "anomalies": {"missing_values": {}}
            })
        );
    }
}
