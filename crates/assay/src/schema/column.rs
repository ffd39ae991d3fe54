//! Typed columns.

use indexmap::IndexMap;

use super::types::{ColumnKind, ColumnType};
use super::value::Value;

/// A named, typed column of values. Missing cells are [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name, unique within its table.
    pub name: String,
    /// Storage type decided by the loader.
    pub column_type: ColumnType,
    /// Cell values in row order.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from already-typed values.
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    /// Number of cells, missing included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Analytical kind of this column.
    pub fn kind(&self) -> ColumnKind {
        ColumnKind::infer(self.column_type, &self.name)
    }

    /// Iterate over non-missing values.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Fraction of missing cells (0.0 for an empty column).
    pub fn null_fraction(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.null_count() as f64 / self.values.len() as f64
        }
    }

    /// Non-missing numeric values in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    /// Frequency of each non-missing value, in order of first appearance.
    pub fn value_counts(&self) -> IndexMap<&Value, usize> {
        let mut counts: IndexMap<&Value, usize> = IndexMap::new();
        for value in self.non_null() {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// Number of distinct non-missing values.
    pub fn distinct_count(&self) -> usize {
        self.value_counts().len()
    }

    /// Values sorted by descending frequency; ties keep first-appearance order.
    pub fn top_values(&self, n: usize) -> Vec<(&Value, usize)> {
        let mut counts: Vec<(&Value, usize)> = self.value_counts().into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(n);
        counts
    }
}
