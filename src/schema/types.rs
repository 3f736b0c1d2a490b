//! Column type system.
//!
//! The set of output types is closed: string, int32, int64 and float32.
//! `ColumnKind` carries the type together with its typed default, so a
//! resolved column can never hold a default of the wrong type.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Output type of a decoded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// UTF-8 string, copied verbatim from the field.
    String,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit IEEE 754 floating-point.
    Float32,
}

impl ColumnType {
    /// Canonical lowercase name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::Float32 => "float32",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = ConfigError;

    /// Parse an output type name.
    ///
    /// `float` is accepted as an alias for `float32`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ColumnType::String),
            "int32" => Ok(ColumnType::Int32),
            "int64" => Ok(ColumnType::Int64),
            "float32" | "float" => Ok(ColumnType::Float32),
            other => Err(ConfigError::UnsupportedType(other.to_string())),
        }
    }
}

/// A single typed value: a default supplied by the caller, or one decoded cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int32(i32),
    Int64(i64),
    Float32(f32),
}

impl Scalar {
    /// The column type this scalar belongs to.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Scalar::String(_) => ColumnType::String,
            Scalar::Int32(_) => ColumnType::Int32,
            Scalar::Int64(_) => ColumnType::Int64,
            Scalar::Float32(_) => ColumnType::Float32,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int32(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int64(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float32(value)
    }
}

/// Output type of a column paired with its optional default.
///
/// `None` marks the column as required: an empty field is an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    String(Option<String>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
}

impl ColumnKind {
    /// Build a kind from a type and an optional untyped default.
    ///
    /// `column` is only used for the error message.
    pub fn new(
        column: usize,
        column_type: ColumnType,
        default: Option<&Scalar>,
    ) -> Result<Self, ConfigError> {
        let kind = match (column_type, default) {
            (ColumnType::String, None) => ColumnKind::String(None),
            (ColumnType::Int32, None) => ColumnKind::Int32(None),
            (ColumnType::Int64, None) => ColumnKind::Int64(None),
            (ColumnType::Float32, None) => ColumnKind::Float32(None),
            (ColumnType::String, Some(Scalar::String(v))) => ColumnKind::String(Some(v.clone())),
            (ColumnType::Int32, Some(Scalar::Int32(v))) => ColumnKind::Int32(Some(*v)),
            (ColumnType::Int64, Some(Scalar::Int64(v))) => ColumnKind::Int64(Some(*v)),
            (ColumnType::Float32, Some(Scalar::Float32(v))) => ColumnKind::Float32(Some(*v)),
            (expected, Some(other)) => {
                return Err(ConfigError::DefaultTypeMismatch {
                    column,
                    expected: expected.name(),
                    actual: other.column_type().name(),
                })
            }
        };
        Ok(kind)
    }

    /// The output type of the column.
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnKind::String(_) => ColumnType::String,
            ColumnKind::Int32(_) => ColumnType::Int32,
            ColumnKind::Int64(_) => ColumnType::Int64,
            ColumnKind::Float32(_) => ColumnType::Float32,
        }
    }

    /// The default as an untyped scalar, if the column has one.
    pub fn default_value(&self) -> Option<Scalar> {
        match self {
            ColumnKind::String(d) => d.clone().map(Scalar::String),
            ColumnKind::Int32(d) => d.map(Scalar::Int32),
            ColumnKind::Int64(d) => d.map(Scalar::Int64),
            ColumnKind::Float32(d) => d.map(Scalar::Float32),
        }
    }

    /// Whether an empty field in this column is an error.
    pub fn is_required(&self) -> bool {
        match self {
            ColumnKind::String(d) => d.is_none(),
            ColumnKind::Int32(d) => d.is_none(),
            ColumnKind::Int64(d) => d.is_none(),
            ColumnKind::Float32(d) => d.is_none(),
        }
    }
}

/// One requested output column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Position of the source field within a record.
    pub source_index: usize,
    /// Output type and default.
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(source_index: usize, kind: ColumnKind) -> Self {
        Self { source_index, kind }
    }

    pub fn column_type(&self) -> ColumnType {
        self.kind.column_type()
    }
}

/// Column specs plus the number of leading fields every record must provide.
///
/// Computed once per batch and read-only afterwards. The bound is always
/// derived from the columns, so every `source_index` is below it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    columns: Vec<ColumnSpec>,
    /// `1 + max(source_index)`, or 0 without columns.
    field_bound: usize,
}

impl ResolvedSchema {
    /// Create a schema, deriving the field bound from the columns.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        let field_bound = columns
            .iter()
            .map(|c| c.source_index + 1)
            .max()
            .unwrap_or(0);
        Self {
            columns,
            field_bound,
        }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Number of leading fields every record must provide.
    pub fn field_bound(&self) -> usize {
        self.field_bound
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Output types in column order.
    pub fn output_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(ColumnSpec::column_type).collect()
    }
}
