//! Selected-column CSV decoding into typed columns
//!
//! This library parses batches of RFC 4180 records that share one schema. Only
//! the requested fields are read, each is converted to its column's type
//! (string, int32, int64 or float32), and empty fields are replaced by
//! per-column defaults.
//!
//! Decoding is a two-phase process:
//! 1. [`resolve_columns`] validates the column selection and defaults once per
//!    batch and computes how many leading fields every record must provide.
//! 2. [`decode_batch`] (or [`decode_row`] for a single record) tokenizes each
//!    record up to that bound and converts the selected fields.
//!
//! [`decode_csv`] combines both steps.
//!
//! # Example
//! ```
//! use csvpick::{decode_csv, ColumnType, DecodeOptions, Scalar};
//!
//! let batch = decode_csv(
//!     &["\"a,b\",7", "c,"],
//!     &[vec![], vec![Scalar::Int64(0)]],
//!     &[],
//!     &[ColumnType::String, ColumnType::Int64],
//!     &DecodeOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(batch.column(0).unwrap().as_strings().unwrap(), ["a,b", "c"]);
//! assert_eq!(batch.column(1).unwrap().as_int64().unwrap(), [7, 0]);
//! ```
//!
//! # Features
//! - `parallel` (default): decode large batches on a rayon thread pool
//! - `polars`: export decoded batches as Polars DataFrames

pub mod api;
#[cfg(feature = "polars")]
pub mod convert;
pub mod error;
pub mod reader;
pub mod schema;

// Re-export main types
pub use api::{decode_csv, DecodeOptions};
pub use error::{ConfigError, ConversionError, DecodeCsvError, FormatError, RecordError};
pub use reader::{
    decode_batch, decode_float32, decode_int32, decode_int64, decode_row, decode_string,
    extract_fields, tokenize, Column, DecodedBatch, RecordDecoder,
};
pub use schema::{resolve_columns, ColumnKind, ColumnSpec, ColumnType, ResolvedSchema, Scalar};
