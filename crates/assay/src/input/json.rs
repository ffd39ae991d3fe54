//! JSON tables: an array of row objects, an object of column arrays, or an
//! object of `{index: value}` column maps.

use indexmap::IndexMap;
use serde_json::Value as Json;

use crate::error::{AssayError, Result};
use crate::inference::TypeInferrer;
use crate::schema::{Table, Value};

/// Parse JSON text into a single typed table.
pub fn parse_json_table(file_name: &str, text: &str) -> Result<Table> {
    let document: Json = serde_json::from_str(text)
        .map_err(|e| AssayError::parse(file_name, format!("invalid JSON: {}", e)))?;

    let cells = match document {
        Json::Array(rows) => from_records(file_name, rows)?,
        Json::Object(columns) => from_columns(file_name, columns)?,
        _ => {
            return Err(AssayError::parse(
                file_name,
                "expected an array of records or an object of columns",
            ));
        }
    };

    let inferrer = TypeInferrer::new();
    let columns = cells
        .into_iter()
        .map(|(name, values)| inferrer.unify(name, values))
        .collect();
    Table::new(columns)
}

/// `[{"a": 1, "b": "x"}, ...]`; keys missing from a row load as nulls.
fn from_records(file_name: &str, rows: Vec<Json>) -> Result<IndexMap<String, Vec<Value>>> {
    let mut columns: IndexMap<String, Vec<Value>> = IndexMap::new();

    for (row_idx, row) in rows.into_iter().enumerate() {
        let Json::Object(fields) = row else {
            return Err(AssayError::parse(
                file_name,
                format!("record {} is not an object", row_idx),
            ));
        };
        for (key, json) in fields {
            let column = columns
                .entry(key)
                .or_insert_with(|| vec![Value::Null; row_idx]);
            column.resize(row_idx, Value::Null);
            column.push(to_value(json));
        }
        for column in columns.values_mut() {
            column.resize(row_idx + 1, Value::Null);
        }
    }

    Ok(columns)
}

/// `{"a": [1, 2], ...}` or `{"a": {"0": 1, "1": 2}, ...}`.
fn from_columns(
    file_name: &str,
    columns: serde_json::Map<String, Json>,
) -> Result<IndexMap<String, Vec<Value>>> {
    // Index labels in first-seen order across all columns.
    let mut index: IndexMap<String, ()> = IndexMap::new();
    let mut parsed: Vec<(String, ColumnCells)> = Vec::with_capacity(columns.len());

    for (name, json) in columns {
        let cells = match json {
            Json::Array(values) => {
                ColumnCells::Positional(values.into_iter().map(to_value).collect())
            }
            Json::Object(map) => {
                let keyed: IndexMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, to_value(v))).collect();
                for key in keyed.keys() {
                    index.entry(key.clone()).or_insert(());
                }
                ColumnCells::Keyed(keyed)
            }
            _ => {
                return Err(AssayError::parse(
                    file_name,
                    format!("column '{}' is neither an array nor an object", name),
                ));
            }
        };
        parsed.push((name, cells));
    }

    let mut out = IndexMap::new();
    for (name, cells) in parsed {
        let values = match cells {
            ColumnCells::Positional(values) => values,
            ColumnCells::Keyed(mut keyed) => index
                .keys()
                .map(|k| keyed.swap_remove(k).unwrap_or(Value::Null))
                .collect(),
        };
        out.insert(name, values);
    }

    let lengths: Vec<usize> = out.values().map(Vec::len).collect();
    if lengths.windows(2).any(|w| w[0] != w[1]) {
        return Err(AssayError::parse(file_name, "columns have different lengths"));
    }

    Ok(out)
}

enum ColumnCells {
    Positional(Vec<Value>),
    Keyed(IndexMap<String, Value>),
}

fn to_value(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        Json::String(s) => Value::Text(s),
        nested => Value::Text(nested.to_string()),
    }
}
