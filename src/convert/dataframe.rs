//! DataFrame export for decoded batches.
//!
//! Each decoded column becomes one Polars `Series`: string columns map to
//! `String`, int32 to `Int32`, int64 to `Int64` and float32 to `Float32`.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PlSmallStr, PolarsError, Series};

use crate::reader::{Column, DecodedBatch};

/// Error type for DataFrame export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The number of names does not match the number of columns.
    #[error("Expected {expected} column names but got {actual}")]
    NameCount { expected: usize, actual: usize },
    /// Polars error during DataFrame creation.
    #[error("Polars error: {0}")]
    Polars(String),
}

impl From<PolarsError> for ExportError {
    fn from(err: PolarsError) -> Self {
        ExportError::Polars(err.to_string())
    }
}

/// Convert one decoded column into a named Series.
pub fn column_to_series(name: &str, column: Column) -> Series {
    let name = PlSmallStr::from(name);
    match column {
        Column::String(values) => Series::new(name, values),
        Column::Int32(values) => Series::new(name, values),
        Column::Int64(values) => Series::new(name, values),
        Column::Float32(values) => Series::new(name, values),
    }
}

impl DecodedBatch {
    /// Convert the batch into a DataFrame with the given column names.
    ///
    /// # Errors
    /// `ExportError::NameCount` when `names` does not have one entry per
    /// column, or `ExportError::Polars` if Polars rejects the columns (for
    /// example, duplicate names).
    pub fn to_dataframe<N: AsRef<str>>(self, names: &[N]) -> Result<DataFrame, ExportError> {
        if names.len() != self.num_columns() {
            return Err(ExportError::NameCount {
                expected: self.num_columns(),
                actual: names.len(),
            });
        }

        let columns = names
            .iter()
            .zip(self.into_columns())
            .map(|(name, column)| column_to_series(name.as_ref(), column).into_column())
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}
