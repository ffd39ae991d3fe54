//! Per-field statistics and anomaly flags.

mod anomaly;
mod profiler;
mod statistics;

pub use anomaly::{Anomalies, AnomalyDetector, BaselineSchema, NewCategories, baseline_schema_from_json};
pub use profiler::{FieldProfiler, ProfileConfig, ProfileReport, TableProfile};
pub use statistics::FieldStatistics;
