//! Column set and storage type comparison of two tables.

use std::fmt;

use crate::schema::{ColumnType, Table};

/// A structural difference in one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaChange {
    Added(String),
    Missing(String),
    TypeChanged {
        column: String,
        from: ColumnType,
        to: ColumnType,
    },
}

impl SchemaChange {
    pub fn column(&self) -> &str {
        match self {
            SchemaChange::Added(c) | SchemaChange::Missing(c) => c,
            SchemaChange::TypeChanged { column, .. } => column,
        }
    }

    /// The same change seen from the other side.
    pub fn reversed(&self) -> Self {
        match self {
            SchemaChange::Added(c) => SchemaChange::Missing(c.clone()),
            SchemaChange::Missing(c) => SchemaChange::Added(c.clone()),
            SchemaChange::TypeChanged { column, from, to } => SchemaChange::TypeChanged {
                column: column.clone(),
                from: *to,
                to: *from,
            },
        }
    }
}

impl fmt::Display for SchemaChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaChange::Added(c) => write!(f, "new column detected: {}", c),
            SchemaChange::Missing(c) => write!(f, "column missing: {}", c),
            SchemaChange::TypeChanged { from, to, .. } => write!(f, "type change: {} → {}", from, to),
        }
    }
}

/// Compares column names and storage types.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaDiffer;

impl SchemaDiffer {
    pub fn new() -> Self {
        Self
    }

    /// Added columns (current order), then missing ones and type changes
    /// (baseline order).
    pub fn diff(&self, baseline: &Table, current: &Table) -> Vec<SchemaChange> {
        let mut changes = Vec::new();

        for column in current.columns() {
            if baseline.column(&column.name).is_none() {
                changes.push(SchemaChange::Added(column.name.clone()));
            }
        }

        for column in baseline.columns() {
            match current.column(&column.name) {
                None => changes.push(SchemaChange::Missing(column.name.clone())),
                Some(other) if other.column_type != column.column_type => {
                    changes.push(SchemaChange::TypeChanged {
                        column: column.name.clone(),
                        from: column.column_type,
                        to: other.column_type,
                    });
                }
                Some(_) => {}
            }
        }

        changes
    }
}
