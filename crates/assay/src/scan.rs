//! Per-column schema summaries.

use serde::Serialize;

use crate::inference::value_to_datetime;
use crate::schema::{Column, ColumnType, Table};

/// Number of most frequent values listed per column.
const TOP_VALUES: usize = 3;

/// Schema summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub field: String,
    /// One of `Integer`, `Float`, `Date`, `Text`.
    pub data_type: &'static str,
    /// Share of missing cells, formatted like `12.5%`.
    pub null_percentage: String,
    pub distinct_count: usize,
    /// Most frequent values joined by `, `; `…` marks that more exist.
    pub top_values: String,
}

/// Schema summary of one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableScan {
    pub total_rows: usize,
    pub schema_summary: Vec<ColumnSummary>,
}

/// Builds schema summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaScanner;

impl SchemaScanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan(&self, table: &Table) -> TableScan {
        TableScan {
            total_rows: table.row_count(),
            schema_summary: table
                .columns()
                .iter()
                .map(|column| self.summarize(column, table.row_count()))
                .collect(),
        }
    }

    fn summarize(&self, column: &Column, total_rows: usize) -> ColumnSummary {
        let null_percentage = if total_rows > 0 {
            column.null_count() as f64 / total_rows as f64 * 100.0
        } else {
            0.0
        };

        let distinct_count = column.distinct_count();
        let mut top_values = column
            .top_values(TOP_VALUES)
            .iter()
            .map(|(value, _)| value.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if distinct_count > TOP_VALUES {
            top_values.push('…');
        }

        ColumnSummary {
            field: column.name.clone(),
            data_type: scan_type(column),
            null_percentage: format!("{:.1}%", null_percentage),
            distinct_count,
            top_values,
        }
    }
}

/// Report type of a column. Text columns whose every value reads as a date
/// are reported as dates.
fn scan_type(column: &Column) -> &'static str {
    match column.column_type {
        ColumnType::Integer => "Integer",
        ColumnType::Float => "Float",
        ColumnType::DateTime => "Date",
        ColumnType::Boolean => "Text",
        ColumnType::Text | ColumnType::Unknown => {
            let mut values = column.non_null().peekable();
            if values.peek().is_some() && values.all(|v| value_to_datetime(v).is_some()) {
                "Date"
            } else {
                "Text"
            }
        }
    }
}
