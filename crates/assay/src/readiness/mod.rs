//! Composite readiness scoring.

mod score;
mod scorer;
mod sql_schema;

pub use score::{ReadinessReport, ReadinessScore, ReadinessWeights};
pub use scorer::ReadinessScorer;
pub use sql_schema::split_statements;
