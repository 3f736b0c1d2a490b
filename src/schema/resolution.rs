//! Column selection resolution.
//!
//! Turns the raw batch configuration (requested field indices, per-column
//! defaults and output types) into a `ResolvedSchema`. This runs once per
//! batch, before any record is scanned.

use tracing::debug;

use crate::error::ConfigError;
use crate::schema::{ColumnKind, ColumnSpec, ColumnType, ResolvedSchema, Scalar};

/// Resolve the requested columns of a batch.
///
/// # Arguments
/// * `field_indices` - Source field position of each output column, or empty
///   to take the first `output_types.len()` fields in order
/// * `defaults` - Zero or one default scalar per output column
/// * `output_types` - Output type of each column
///
/// # Errors
/// Any `ConfigError` about lengths, default counts or types, or negative
/// indices. Checks run in that order.
pub fn resolve_columns(
    field_indices: &[i32],
    defaults: &[Vec<Scalar>],
    output_types: &[ColumnType],
) -> Result<ResolvedSchema, ConfigError> {
    if defaults.len() != output_types.len() {
        return Err(ConfigError::DefaultsLengthMismatch {
            defaults: defaults.len(),
            output_types: output_types.len(),
        });
    }

    let mut kinds = Vec::with_capacity(output_types.len());
    for (column, (column_type, default)) in output_types.iter().zip(defaults).enumerate() {
        if default.len() > 1 {
            return Err(ConfigError::TooManyDefaults {
                column,
                count: default.len(),
            });
        }
        kinds.push(ColumnKind::new(column, *column_type, default.first())?);
    }

    let source_indices: Vec<usize> = if field_indices.is_empty() {
        (0..kinds.len()).collect()
    } else {
        if field_indices.len() != kinds.len() {
            return Err(ConfigError::FieldIndicesLength {
                expected: kinds.len(),
                actual: field_indices.len(),
            });
        }
        field_indices
            .iter()
            .enumerate()
            .map(|(column, &index)| {
                usize::try_from(index)
                    .map_err(|_| ConfigError::NegativeFieldIndex { column, index })
            })
            .collect::<Result<_, _>>()?
    };

    let columns: Vec<ColumnSpec> = source_indices
        .into_iter()
        .zip(kinds)
        .map(|(source_index, kind)| ColumnSpec::new(source_index, kind))
        .collect();

    let schema = ResolvedSchema::new(columns);
    debug!(
        columns = schema.num_columns(),
        field_bound = schema.field_bound(),
        "Resolved CSV column selection"
    );
    Ok(schema)
}
