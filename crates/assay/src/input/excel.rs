//! Excel and OpenDocument workbooks, one table per sheet.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use indexmap::IndexMap;

use crate::error::{AssayError, Result};
use crate::inference::{TypeInferrer, parse_datetime};
use crate::schema::{Column, ColumnType, Table, Value};

use super::parser::dedupe_headers;

/// Load every sheet of a workbook. The first row of each sheet is its header.
pub fn load_workbook(file_name: &str, bytes: &[u8]) -> Result<IndexMap<String, Table>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AssayError::parse(file_name, format!("unreadable workbook: {}", e)))?;

    let mut tables = IndexMap::new();
    for sheet in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| AssayError::parse(file_name, format!("sheet '{}': {}", sheet, e)))?;
        let rows: Vec<&[Data]> = range.rows().collect();
        tables.insert(sheet, sheet_table(&rows)?);
    }
    Ok(tables)
}

fn sheet_table(rows: &[&[Data]]) -> Result<Table> {
    let Some((header, body)) = rows.split_first() else {
        return Ok(Table::empty());
    };

    let names = dedupe_headers(
        header
            .iter()
            .enumerate()
            .map(|(idx, cell)| match cell {
                Data::Empty => format!("Unnamed: {}", idx),
                other => to_value(other).to_string(),
            })
            .collect(),
    );

    let inferrer = TypeInferrer::new();
    let mut columns = Vec::with_capacity(names.len());
    for (idx, name) in names.into_iter().enumerate() {
        let values = body
            .iter()
            .map(|row| row.get(idx).map(to_value).unwrap_or(Value::Null))
            .collect();
        columns.push(narrow_whole_floats(inferrer.unify(name, values)));
    }

    Table::new(columns)
}

/// Workbooks store every number as a float; columns of whole numbers are integers.
fn narrow_whole_floats(column: Column) -> Column {
    let whole = column.column_type == ColumnType::Float
        && column.non_null().all(|v| match v {
            Value::Float(f) => f.fract() == 0.0 && f.abs() < i64::MAX as f64,
            _ => false,
        });
    if !whole {
        return column;
    }

    let values = column
        .values
        .into_iter()
        .map(|v| match v {
            Value::Float(f) => Value::Integer(f as i64),
            other => other,
        })
        .collect();
    Column::new(column.name, ColumnType::Integer, values)
}

fn to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::Integer(*i),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Boolean(*b),
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Float(dt.as_f64())),
        Data::DateTimeIso(s) => parse_datetime(s)
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Text(s.clone())),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_table() {
        let header = [Data::String("id".into()), Data::String("name".into())];
        let r1 = [Data::Float(1.0), Data::String("a".into())];
        let r2 = [Data::Float(2.0), Data::Empty];
        let rows: Vec<&[Data]> = vec![&header, &r1, &r2];

        let table = sheet_table(&rows).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("id").unwrap().column_type, ColumnType::Integer);
        assert!(table.column("name").unwrap().values[1].is_null());
    }

    #[test]
    fn test_duplicate_headers_match_delimited_text() {
        let header = [
            Data::String("a".into()),
            Data::String("a.2".into()),
            Data::String("a".into()),
            Data::String("a".into()),
        ];
        let r1 = [Data::Int(1), Data::Int(2), Data::Int(3), Data::Int(4)];
        let rows: Vec<&[Data]> = vec![&header, &r1];

        let table = sheet_table(&rows).unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.2", "a.1", "a.3"]);
    }

    #[test]
    fn test_empty_sheet() {
        assert!(sheet_table(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_fractional_floats_stay_float() {
        let header = [Data::String("x".into())];
        let r1 = [Data::Float(1.5)];
        let rows: Vec<&[Data]> = vec![&header, &r1];
        let table = sheet_table(&rows).unwrap();
        assert_eq!(table.column("x").unwrap().column_type, ColumnType::Float);
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(load_workbook("book.xlsx", b"not a workbook").is_err());
    }
}
