//! Conversion of decoded batches into Polars DataFrames
//!
//! Only available with the `polars` feature. The decoding core never depends
//! on it.

mod dataframe;

pub use dataframe::{column_to_series, ExportError};
