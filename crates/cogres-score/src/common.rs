//! Shared cell-extraction helpers for the scorers.

use polars::prelude::{AnyValue, DataFrame};

use cogres_ingest::{any_to_f64, any_to_string};
use cogres_model::{CogresError, Result};

/// Numeric cell by column position; None for missing/non-numeric.
pub(crate) fn cell_at(df: &DataFrame, col: usize, row: usize) -> Option<f64> {
    let column = df.get_columns().get(col)?;
    any_to_f64(column.get(row).unwrap_or(AnyValue::Null))
}

/// Numeric cell by column position with the questionnaire convention that
/// missing responses count as zero.
pub(crate) fn cell_or_zero(df: &DataFrame, col: usize, row: usize) -> f64 {
    cell_at(df, col, row).unwrap_or(0.0)
}

/// Numeric cell by column name; errors if the column does not exist.
pub(crate) fn named_cell(df: &DataFrame, name: &str, row: usize) -> Result<Option<f64>> {
    let column = df
        .column(name)
        .map_err(|_| CogresError::InvalidInput(format!("required column '{name}' not found")))?;
    Ok(any_to_f64(column.get(row).unwrap_or(AnyValue::Null)))
}

/// Named numeric cell with missing-as-zero semantics.
pub(crate) fn named_cell_or_zero(df: &DataFrame, name: &str, row: usize) -> Result<f64> {
    Ok(named_cell(df, name, row)?.unwrap_or(0.0))
}

/// Subject identifiers from a named column.
pub(crate) fn subject_ids(df: &DataFrame, subject_col: &str) -> Result<Vec<String>> {
    let column = df.column(subject_col).map_err(|_| {
        CogresError::InvalidInput(format!("subject column '{subject_col}' not found"))
    })?;
    Ok((0..df.height())
        .map(|row| any_to_string(column.get(row).unwrap_or(AnyValue::Null)))
        .collect())
}

/// Subject identifiers from the first column (positional layouts).
pub(crate) fn subject_ids_at(df: &DataFrame, col: usize) -> Result<Vec<String>> {
    let column = df.get_columns().get(col).ok_or_else(|| {
        CogresError::InvalidInput(format!("expected a subject column at position {col}"))
    })?;
    Ok((0..df.height())
        .map(|row| any_to_string(column.get(row).unwrap_or(AnyValue::Null)))
        .collect())
}

/// Round up to the nearest multiple of 5, per the CRIq paper scale.
pub(crate) fn roundup5(value: f64) -> f64 {
    (value / 5.0).ceil() * 5.0
}
