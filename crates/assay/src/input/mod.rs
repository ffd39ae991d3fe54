//! Input parsing and data source handling.

#[cfg(feature = "excel")]
mod excel;
mod json;
mod loader;
#[cfg(feature = "parquet")]
mod parquet;
mod parser;
mod source;
mod sql;

pub use loader::{FileLoader, TableLoader};
pub use parser::{Parser, ParserConfig, detect_delimiter};
pub use source::{Dataset, InputFile, SourceKind, SourceMetadata};
pub use sql::{SqlWorkspace, load_sql_tables};
