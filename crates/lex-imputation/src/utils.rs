//! Shared helpers for moving numeric columns in and out of a `DataFrame`.

use crate::error::{ImputationError, Result};
use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// A cell counts as missing when it is null or NaN.
#[inline]
pub fn is_missing(cell: Option<f64>) -> bool {
    cell.is_none_or(f64::is_nan)
}

/// Read a column as `f64` cells, keeping nulls in place.
pub fn column_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| ImputationError::ColumnNotFound(name.to_string()))?;
    let float_series = column.as_materialized_series().cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().collect())
}

/// Replace a column with the given cells as a `Float64` series.
pub fn replace_cells(df: &mut DataFrame, name: &str, cells: Vec<Option<f64>>) -> Result<()> {
    let series = Series::new(name.into(), cells);
    df.replace(name, series)?;
    Ok(())
}
