//! Tabular data model: values, typed columns and tables.

mod column;
mod table;
mod types;
mod value;

pub use column::Column;
pub use table::Table;
pub use types::{ColumnKind, ColumnType};
pub use value::Value;
