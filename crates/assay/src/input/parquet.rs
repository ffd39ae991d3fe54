//! Parquet files, read through Arrow record batches.

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray,
    TimestampMillisecondArray,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use chrono::DateTime;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{AssayError, Result};
use crate::inference::TypeInferrer;
use crate::schema::{Table, Value};

/// Load a Parquet file into a single table.
pub fn load_parquet(file_name: &str, bytes: &[u8]) -> Result<Table> {
    let parse_err = |e: &dyn std::fmt::Display| AssayError::parse(file_name, e.to_string());

    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::copy_from_slice(bytes))
        .map_err(|e| parse_err(&e))?;
    let schema = builder.schema().clone();
    let reader = builder.build().map_err(|e| parse_err(&e))?;
    let batches: Vec<RecordBatch> = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| parse_err(&e))?;

    let inferrer = TypeInferrer::new();
    let mut columns = Vec::with_capacity(schema.fields().len());
    for (idx, field) in schema.fields().iter().enumerate() {
        let mut values = Vec::new();
        for batch in &batches {
            append_values(batch.column(idx), &mut values).map_err(|e| parse_err(&e))?;
        }
        columns.push(inferrer.unify(field.name().clone(), values));
    }

    Table::new(columns)
}

fn append_values(array: &ArrayRef, out: &mut Vec<Value>) -> std::result::Result<(), arrow::error::ArrowError> {
    match array.data_type() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => {
            let converted = cast(array, &DataType::Int64)?;
            if let Some(ints) = converted.as_any().downcast_ref::<Int64Array>() {
                out.extend(ints.iter().map(|v| v.map(Value::Integer).unwrap_or(Value::Null)));
            }
        }
        DataType::UInt64 | DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            let converted = cast(array, &DataType::Float64)?;
            if let Some(floats) = converted.as_any().downcast_ref::<Float64Array>() {
                out.extend(floats.iter().map(|v| v.map(Value::Float).unwrap_or(Value::Null)));
            }
        }
        DataType::Boolean => {
            if let Some(bools) = array.as_any().downcast_ref::<BooleanArray>() {
                out.extend(bools.iter().map(|v| v.map(Value::Boolean).unwrap_or(Value::Null)));
            }
        }
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            let converted = cast(array, &DataType::Timestamp(TimeUnit::Millisecond, None))?;
            if let Some(stamps) = converted.as_any().downcast_ref::<TimestampMillisecondArray>() {
                out.extend(stamps.iter().map(|v| {
                    v.and_then(DateTime::from_timestamp_millis)
                        .map(|dt| Value::DateTime(dt.naive_utc()))
                        .unwrap_or(Value::Null)
                }));
            }
        }
        _ => {
            let converted = cast(array, &DataType::Utf8)?;
            if let Some(strings) = converted.as_any().downcast_ref::<StringArray>() {
                out.extend(
                    strings
                        .iter()
                        .map(|v| v.map(|s| Value::Text(s.to_string())).unwrap_or(Value::Null)),
                );
            }
        }
    }
    Ok(())
}
