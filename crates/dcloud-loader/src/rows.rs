//! Decoding of columnar (Arrow) query results into [`ResultRow`]s.
//!
//! Query clients that receive Arrow batches call [`rows_from_batch`] from their
//! `read_data`. Arrow nulls become `None`; the loader decides what that means.

use arrow_array::cast::AsArray;
use arrow_array::types::{Float32Type, Float64Type};
use arrow_array::{Array, ArrayRef, RecordBatch};
use arrow_schema::DataType;

use dcloud_core::error::{Error, Result};
use dcloud_core::types::{ColumnNames, ResultRow};

pub fn rows_from_batch(batch: &RecordBatch, columns: &ColumnNames) -> Result<Vec<ResultRow>> {
    let ids = column(batch, &columns.record_id)?;
    let scores = column(batch, &columns.score)?;
    let payloads = column(batch, &columns.chunk_text)?;

    let mut rows = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        rows.push(ResultRow {
            id: string_at(ids, &columns.record_id, i)?,
            score: float_at(scores, &columns.score, i)?,
            payload: string_at(payloads, &columns.chunk_text, i)?,
        });
    }
    Ok(rows)
}

/// Decode several batches, keeping batch and row order.
pub fn rows_from_batches<'a, I>(batches: I, columns: &ColumnNames) -> Result<Vec<ResultRow>>
where
    I: IntoIterator<Item = &'a RecordBatch>,
{
    let mut rows = Vec::new();
    for batch in batches {
        rows.extend(rows_from_batch(batch, columns)?);
    }
    Ok(rows)
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch.column_by_name(name).ok_or_else(|| Error::MissingColumn(name.to_string()))
}

fn string_at(array: &ArrayRef, name: &str, i: usize) -> Result<Option<String>> {
    if array.is_null(i) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Utf8 => array.as_string::<i32>().value(i),
        DataType::LargeUtf8 => array.as_string::<i64>().value(i),
        _ => {
            return Err(Error::ColumnType {
                column: name.to_string(),
                expected: "Utf8 or LargeUtf8",
            })
        }
    };
    Ok(Some(value.to_string()))
}

fn float_at(array: &ArrayRef, name: &str, i: usize) -> Result<Option<f64>> {
    if array.is_null(i) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Float64 => array.as_primitive::<Float64Type>().value(i),
        DataType::Float32 => f64::from(array.as_primitive::<Float32Type>().value(i)),
        _ => {
            return Err(Error::ColumnType {
                column: name.to_string(),
                expected: "Float64 or Float32",
            })
        }
    };
    Ok(Some(value))
}
