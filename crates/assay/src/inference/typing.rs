//! Storage type inference for text-sourced columns.

use crate::schema::{Column, ColumnType, Value};

/// Cell spellings that load as missing values.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Check if a raw cell represents a missing value.
pub fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    NULL_TOKENS.contains(&trimmed)
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nan")
}

/// Infers storage types for columns of raw text cells and converts the
/// cells to typed values.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeInferrer;

impl TypeInferrer {
    pub fn new() -> Self {
        Self
    }

    /// Build a typed column from raw cells.
    pub fn build_column(&self, name: impl Into<String>, cells: &[String]) -> Column {
        let non_null: Vec<&str> = cells
            .iter()
            .map(String::as_str)
            .filter(|c| !is_null_token(c))
            .collect();
        let column_type = self.infer_type(&non_null);
        let values = cells.iter().map(|c| self.coerce(c, column_type)).collect();
        Column::new(name, column_type, values)
    }

    /// Infer the storage type from non-missing raw values.
    ///
    /// Every value must agree: one stray word turns a numeric column into text.
    pub fn infer_type(&self, values: &[&str]) -> ColumnType {
        if values.is_empty() {
            return ColumnType::Unknown;
        }

        let mut integers = 0usize;
        let mut floats = 0usize;
        let mut booleans = 0usize;

        for value in values {
            match self.detect_value_type(value) {
                ColumnType::Integer => integers += 1,
                ColumnType::Float => floats += 1,
                ColumnType::Boolean => booleans += 1,
                _ => return ColumnType::Text,
            }
        }

        if integers == values.len() {
            ColumnType::Integer
        } else if integers + floats == values.len() {
            ColumnType::Float
        } else if booleans == values.len() {
            ColumnType::Boolean
        } else {
            ColumnType::Text
        }
    }

    /// Detect the type of a single value.
    fn detect_value_type(&self, value: &str) -> ColumnType {
        let trimmed = value.trim();

        if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
            return ColumnType::Boolean;
        }
        if trimmed.parse::<i64>().is_ok() {
            return ColumnType::Integer;
        }
        if trimmed.parse::<f64>().is_ok() {
            return ColumnType::Float;
        }
        ColumnType::Text
    }

    /// Build a column from natively typed cells (JSON, SQL, workbooks, Arrow).
    ///
    /// Integers mixed with floats widen to floats; any other mix falls back to
    /// text, rendering each non-missing cell with its display form.
    pub fn unify(&self, name: impl Into<String>, values: Vec<Value>) -> Column {
        let mut integers = 0usize;
        let mut floats = 0usize;
        let mut booleans = 0usize;
        let mut datetimes = 0usize;
        let mut non_null = 0usize;

        for value in &values {
            match value {
                Value::Null => continue,
                Value::Integer(_) => integers += 1,
                Value::Float(_) => floats += 1,
                Value::Boolean(_) => booleans += 1,
                Value::DateTime(_) => datetimes += 1,
                Value::Text(_) => {}
            }
            non_null += 1;
        }

        let column_type = if non_null == 0 {
            ColumnType::Unknown
        } else if integers == non_null {
            ColumnType::Integer
        } else if integers + floats == non_null {
            ColumnType::Float
        } else if booleans == non_null {
            ColumnType::Boolean
        } else if datetimes == non_null {
            ColumnType::DateTime
        } else {
            ColumnType::Text
        };

        let values = match column_type {
            ColumnType::Float => values
                .into_iter()
                .map(|v| match v {
                    Value::Integer(i) => Value::Float(i as f64),
                    other => other,
                })
                .collect(),
            ColumnType::Text => values
                .into_iter()
                .map(|v| match v {
                    Value::Null | Value::Text(_) => v,
                    other => Value::Text(other.to_string()),
                })
                .collect(),
            _ => values,
        };

        Column::new(name, column_type, values)
    }

    /// Convert a raw cell to a value of the given storage type.
    pub fn coerce(&self, raw: &str, column_type: ColumnType) -> Value {
        if is_null_token(raw) {
            return Value::Null;
        }
        let trimmed = raw.trim();
        match column_type {
            ColumnType::Integer => trimmed.parse::<i64>().map(Value::Integer).unwrap_or(Value::Null),
            ColumnType::Float => trimmed.parse::<f64>().map(Value::Float).unwrap_or(Value::Null),
            ColumnType::Boolean => Value::Boolean(trimmed.eq_ignore_ascii_case("true")),
            _ => Value::Text(raw.to_string()),
        }
    }
}
