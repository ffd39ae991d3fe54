//! Assay: schema, drift, profiling and readiness analysis for tabular datasets.
//!
//! Assay loads a data file (CSV, JSON, SQL dump, and with optional features
//! Excel workbooks and Parquet) into typed tables and answers three questions
//! about it:
//!
//! - **What does the schema look like?** Column types, null rates,
//!   cardinality and most frequent values.
//! - **How has it changed?** Schema changes and statistical drift against a
//!   baseline file (Kolmogorov-Smirnov for numbers, chi-square for
//!   categories, date ranges for temporal columns).
//! - **Is it ready to use?** Per-field profiles with anomaly flags, and a
//!   composite 0-100 readiness score.
//!
//! # Example
//!
//! ```no_run
//! use assay::Assay;
//!
//! let assay = Assay::new();
//! let report = assay.readiness_path("orders.csv").unwrap();
//! println!("Readiness: {}", report.readiness_score.overall);
//!
//! let drift = assay.drift_paths("orders_jan.csv", "orders_feb.csv").unwrap();
//! println!("{}", serde_json::to_string_pretty(&drift).unwrap());
//! ```

pub mod drift;
pub mod error;
pub mod inference;
pub mod input;
pub mod profile;
pub mod readiness;
pub mod report;
pub mod scan;
pub mod schema;
pub mod stats;

mod assay;

pub use crate::assay::{Assay, AssayConfig, DriftReport, ScanReport};
pub use drift::{DriftFinding, DriftFindings};
pub use error::{AssayError, ErrorClass, Result};
pub use input::{Dataset, InputFile, SourceKind, SourceMetadata, TableLoader};
pub use profile::{BaselineSchema, ProfileReport, TableProfile};
pub use readiness::{ReadinessReport, ReadinessScore};
pub use report::Keyed;
pub use scan::TableScan;
pub use schema::{Column, ColumnKind, ColumnType, Table, Value};
