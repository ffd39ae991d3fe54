//! Tables of typed columns.

use crate::error::{AssayError, Result};

use super::column::Column;
use super::value::Value;

/// An ordered collection of equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create a table, checking that every column has the same length
    /// and that names are unique.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        for (idx, column) in columns.iter().enumerate() {
            if column.len() != row_count {
                return Err(AssayError::Shape(format!(
                    "column '{}' has {} values, expected {}",
                    column.name,
                    column.len(),
                    row_count
                )));
            }
            if columns[..idx].iter().any(|c| c.name == column.name) {
                return Err(AssayError::Shape(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Create a table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.row_count * self.columns.len()
    }

    /// A table with no rows or no columns has nothing to analyze.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Values of one row across all columns.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Iterate over rows as vectors of cell references.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> {
        (0..self.row_count).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }
}
