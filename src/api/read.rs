//! One-call batch decoding.
//!
//! `decode_csv()` takes the raw batch configuration, resolves it and decodes
//! the batch. Callers that decode many batches with one schema can call
//! `resolve_columns()` once and `decode_batch()` per batch instead.

use crate::error::DecodeCsvError;
use crate::reader::{decode_batch, DecodedBatch};
use crate::schema::{resolve_columns, ColumnType, Scalar};

use super::options::DecodeOptions;

/// Decode a batch of CSV records into typed columns.
///
/// # Arguments
/// * `records` - Complete records, one per element. Records must be valid
///   UTF-8; byte strings in other encodings have to be converted (or lossily
///   decoded) by the caller first, since string columns hold `String`s
/// * `defaults` - Per output column, an empty vector (required column) or a
///   single default scalar
/// * `field_indices` - Source field of each output column, or empty to take
///   the leading fields in order
/// * `output_types` - Output type of each column
/// * `options` - Delimiter and parallelism settings
///
/// # Returns
/// One column per output type, each as long as `records`.
///
/// # Errors
/// Configuration errors are reported before any record is scanned. Otherwise
/// the error names the lowest-indexed failing record. No partial output is
/// returned.
///
/// # Example
/// ```
/// use csvpick::api::{decode_csv, DecodeOptions};
/// use csvpick::reader::Column;
/// use csvpick::schema::{ColumnType, Scalar};
///
/// let batch = decode_csv(
///     &["1,2.5,x", "3,,y"],
///     &[vec![], vec![Scalar::Float32(9.0)], vec![]],
///     &[],
///     &[ColumnType::Int32, ColumnType::Float32, ColumnType::String],
///     &DecodeOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(batch.column(1), Some(&Column::Float32(vec![2.5, 9.0])));
/// ```
pub fn decode_csv<S>(
    records: &[S],
    defaults: &[Vec<Scalar>],
    field_indices: &[i32],
    output_types: &[ColumnType],
    options: &DecodeOptions,
) -> Result<DecodedBatch, DecodeCsvError>
where
    S: AsRef<str> + Sync,
{
    options.validate()?;
    let schema = resolve_columns(field_indices, defaults, output_types)?;
    decode_batch(records, &schema, options)
}
