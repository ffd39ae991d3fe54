//! Schema and data drift between a baseline and a current dataset.

mod analyzer;
mod finding;
mod schema_diff;

pub use analyzer::{AnalysisError, DriftAnalyzer, DriftFindings};
pub use finding::DriftFinding;
pub use schema_diff::{SchemaChange, SchemaDiffer};
