//! Column schema: output types, defaults and column selection.

mod resolution;
mod types;

pub use resolution::resolve_columns;
pub use types::{ColumnKind, ColumnSpec, ColumnType, ResolvedSchema, Scalar};
