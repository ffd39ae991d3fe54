//! Core type definitions for columns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage type of a column, as produced by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Date and/or time values.
    DateTime,
    /// Text/string values.
    Text,
    /// No non-missing value to decide from.
    Unknown,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::DateTime)
    }

    /// Returns true for free-form storage (text, or nothing known).
    pub fn is_textual(&self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::Unknown)
    }

    /// Lowercase name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::DateTime => "datetime",
            ColumnType::Text => "text",
            ColumnType::Unknown => "unknown",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Unknown
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Analytical kind of a column; selects which statistics and tests apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Temporal,
}

impl ColumnKind {
    /// Decide the kind from storage type and column name.
    ///
    /// Numeric storage wins over a date-like name.
    pub fn infer(column_type: ColumnType, name: &str) -> Self {
        if column_type.is_numeric() {
            ColumnKind::Numeric
        } else if column_type.is_temporal() || name.to_lowercase().contains("date") {
            ColumnKind::Temporal
        } else {
            ColumnKind::Categorical
        }
    }

    /// Lowercase label used in notes.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Temporal => "temporal",
        }
    }
}
