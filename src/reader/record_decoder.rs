//! Record decoder: tokenize a record and convert its selected fields.
//!
//! `RecordDecoder` accumulates decoded values in one typed `ColumnBuilder`
//! per output column, the same way a columnar reader fills Arrow builders.
//! `decode_row` is the single-record form returning the values directly.

use std::borrow::Cow;

use crate::error::{ConversionError, RecordError};
use crate::schema::{ColumnKind, ColumnSpec, ColumnType, ResolvedSchema, Scalar};

use super::decode::{decode_float32, decode_int32, decode_int64, decode_string};
use super::tokenizer::extract_fields;

/// One decoded output column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    String(Vec<String>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
}

impl Column {
    /// The column's output type.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::String(_) => ColumnType::String,
            Column::Int32(_) => ColumnType::Int32,
            Column::Int64(_) => ColumnType::Int64,
            Column::Float32(_) => ColumnType::Float32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::String(v) => v.len(),
            Column::Int32(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Float32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `row` as an untyped scalar.
    pub fn get(&self, row: usize) -> Option<Scalar> {
        match self {
            Column::String(v) => v.get(row).cloned().map(Scalar::String),
            Column::Int32(v) => v.get(row).copied().map(Scalar::Int32),
            Column::Int64(v) => v.get(row).copied().map(Scalar::Int64),
            Column::Float32(v) => v.get(row).copied().map(Scalar::Float32),
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Column::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int32(&self) -> Option<&[i32]> {
        match self {
            Column::Int32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int64(&self) -> Option<&[i64]> {
        match self {
            Column::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float32(&self) -> Option<&[f32]> {
        match self {
            Column::Float32(v) => Some(v),
            _ => None,
        }
    }

    /// Append another column of the same type.
    ///
    /// Used to stitch together chunks decoded against one schema.
    pub(crate) fn append(&mut self, other: Column) {
        match (self, other) {
            (Column::String(a), Column::String(b)) => a.extend(b),
            (Column::Int32(a), Column::Int32(b)) => a.extend(b),
            (Column::Int64(a), Column::Int64(b)) => a.extend(b),
            (Column::Float32(a), Column::Float32(b)) => a.extend(b),
            (a, b) => unreachable!(
                "chunks of one schema produced {} and {} columns",
                a.column_type(),
                b.column_type()
            ),
        }
    }
}

/// Resolve an empty or non-empty field against a typed default.
///
/// Empty text takes the default, or fails when the column is required.
#[inline]
fn field_or_default<T: Clone>(
    raw: &str,
    default: &Option<T>,
    column: usize,
    convert: impl FnOnce(&str) -> Result<T, ConversionError>,
) -> Result<T, ConversionError> {
    if raw.is_empty() {
        default
            .clone()
            .ok_or(ConversionError::MissingRequired { column })
    } else {
        convert(raw)
    }
}

/// Convert one field to the column's value.
fn convert_field(column: usize, kind: &ColumnKind, raw: &str) -> Result<Scalar, ConversionError> {
    let value = match kind {
        ColumnKind::String(d) => {
            Scalar::String(field_or_default(raw, d, column, |t| Ok(decode_string(t)))?)
        }
        ColumnKind::Int32(d) => {
            Scalar::Int32(field_or_default(raw, d, column, |t| int32_field(column, t))?)
        }
        ColumnKind::Int64(d) => {
            Scalar::Int64(field_or_default(raw, d, column, |t| int64_field(column, t))?)
        }
        ColumnKind::Float32(d) => {
            Scalar::Float32(field_or_default(raw, d, column, |t| float32_field(column, t))?)
        }
    };
    Ok(value)
}

fn int32_field(column: usize, text: &str) -> Result<i32, ConversionError> {
    decode_int32(text).ok_or_else(|| invalid_integer(column, ColumnType::Int32, text))
}

fn int64_field(column: usize, text: &str) -> Result<i64, ConversionError> {
    decode_int64(text).ok_or_else(|| invalid_integer(column, ColumnType::Int64, text))
}

fn float32_field(column: usize, text: &str) -> Result<f32, ConversionError> {
    decode_float32(text).ok_or_else(|| ConversionError::InvalidFloat {
        column,
        text: text.to_string(),
    })
}

fn invalid_integer(column: usize, column_type: ColumnType, text: &str) -> ConversionError {
    ConversionError::InvalidInteger {
        column,
        type_name: column_type.name(),
        text: text.to_string(),
    }
}

/// Builder for a single output column, holding its typed default.
enum ColumnBuilder {
    String(TypedBuilder<String>),
    Int32(TypedBuilder<i32>),
    Int64(TypedBuilder<i64>),
    Float32(TypedBuilder<f32>),
}

struct TypedBuilder<T> {
    default: Option<T>,
    values: Vec<T>,
}

impl<T: Clone> TypedBuilder<T> {
    fn new(default: Option<T>) -> Self {
        Self {
            default,
            values: Vec::new(),
        }
    }

    #[inline]
    fn push_field(
        &mut self,
        raw: &str,
        column: usize,
        convert: impl FnOnce(&str) -> Result<T, ConversionError>,
    ) -> Result<(), ConversionError> {
        let value = field_or_default(raw, &self.default, column, convert)?;
        self.values.push(value);
        Ok(())
    }

    fn finish(&mut self) -> Vec<T> {
        std::mem::take(&mut self.values)
    }
}

impl ColumnBuilder {
    fn new(kind: &ColumnKind) -> Self {
        match kind {
            ColumnKind::String(d) => ColumnBuilder::String(TypedBuilder::new(d.clone())),
            ColumnKind::Int32(d) => ColumnBuilder::Int32(TypedBuilder::new(*d)),
            ColumnKind::Int64(d) => ColumnBuilder::Int64(TypedBuilder::new(*d)),
            ColumnKind::Float32(d) => ColumnBuilder::Float32(TypedBuilder::new(*d)),
        }
    }

    #[inline]
    fn push_field(&mut self, raw: &str, column: usize) -> Result<(), ConversionError> {
        match self {
            ColumnBuilder::String(b) => b.push_field(raw, column, |t| Ok(decode_string(t))),
            ColumnBuilder::Int32(b) => b.push_field(raw, column, |t| int32_field(column, t)),
            ColumnBuilder::Int64(b) => b.push_field(raw, column, |t| int64_field(column, t)),
            ColumnBuilder::Float32(b) => b.push_field(raw, column, |t| float32_field(column, t)),
        }
    }

    /// Shrink to `len` values, rolling back a partially decoded record.
    fn truncate(&mut self, len: usize) {
        match self {
            ColumnBuilder::String(b) => b.values.truncate(len),
            ColumnBuilder::Int32(b) => b.values.truncate(len),
            ColumnBuilder::Int64(b) => b.values.truncate(len),
            ColumnBuilder::Float32(b) => b.values.truncate(len),
        }
    }

    fn reserve(&mut self, additional: usize) {
        match self {
            ColumnBuilder::String(b) => b.values.reserve(additional),
            ColumnBuilder::Int32(b) => b.values.reserve(additional),
            ColumnBuilder::Int64(b) => b.values.reserve(additional),
            ColumnBuilder::Float32(b) => b.values.reserve(additional),
        }
    }

    fn finish(&mut self) -> Column {
        match self {
            ColumnBuilder::String(b) => Column::String(b.finish()),
            ColumnBuilder::Int32(b) => Column::Int32(b.finish()),
            ColumnBuilder::Int64(b) => Column::Int64(b.finish()),
            ColumnBuilder::Float32(b) => Column::Float32(b.finish()),
        }
    }
}

/// Decodes records against a resolved schema into typed column builders.
///
/// A failed record leaves the builders as they were before the call, so a
/// decoder can keep going if the caller wants to.
pub struct RecordDecoder<'s> {
    schema: &'s ResolvedSchema,
    delimiter: u8,
    builders: Vec<ColumnBuilder>,
    record_count: usize,
    // Field buffer kept between records; always empty outside `decode_record`.
    scratch: Vec<Cow<'static, str>>,
}

impl<'s> RecordDecoder<'s> {
    /// Create a decoder for `schema` splitting fields on the ASCII `delimiter`.
    pub fn new(schema: &'s ResolvedSchema, delimiter: u8) -> Self {
        let builders = schema
            .columns()
            .iter()
            .map(|c| ColumnBuilder::new(&c.kind))
            .collect();
        Self {
            schema,
            delimiter,
            builders,
            record_count: 0,
            scratch: Vec::with_capacity(schema.field_bound()),
        }
    }

    /// Reserve capacity for `record_count` more records in every column.
    pub fn reserve_for_batch(&mut self, record_count: usize) {
        for builder in &mut self.builders {
            builder.reserve(record_count);
        }
    }

    /// Decode one record and append its values.
    pub fn decode_record(&mut self, record: &str) -> Result<(), RecordError> {
        let mut fields = recycle(std::mem::take(&mut self.scratch));
        let result = self.push_record(record, &mut fields);
        self.scratch = recycle(fields);
        result
    }

    fn push_record<'r>(
        &mut self,
        record: &'r str,
        fields: &mut Vec<Cow<'r, str>>,
    ) -> Result<(), RecordError> {
        let schema = self.schema;
        tokenize_checked(record, self.delimiter, schema.field_bound(), fields)?;

        let mut failure = None;
        for (column, (spec, builder)) in schema
            .columns()
            .iter()
            .zip(self.builders.iter_mut())
            .enumerate()
        {
            if let Err(err) = builder.push_field(&fields[spec.source_index], column) {
                failure = Some((column, err));
                break;
            }
        }

        if let Some((column, err)) = failure {
            for earlier in &mut self.builders[..column] {
                earlier.truncate(self.record_count);
            }
            return Err(err.into());
        }

        self.record_count += 1;
        Ok(())
    }

    /// Number of records decoded since the last `finish`.
    pub fn pending_records(&self) -> usize {
        self.record_count
    }

    /// Take the accumulated columns and reset the decoder.
    pub fn finish(&mut self) -> Vec<Column> {
        self.record_count = 0;
        self.builders.iter_mut().map(ColumnBuilder::finish).collect()
    }
}

/// Empty `buf` and hand back its allocation with a new borrow lifetime.
///
/// The element types share a layout, so the collect reuses the buffer.
fn recycle<'a, 'b>(mut buf: Vec<Cow<'a, str>>) -> Vec<Cow<'b, str>> {
    buf.clear();
    buf.into_iter().map(|_| Cow::Borrowed("")).collect()
}

/// Tokenize and require at least `bound` fields.
fn tokenize_checked<'a>(
    record: &'a str,
    delimiter: u8,
    bound: usize,
    fields: &mut Vec<Cow<'a, str>>,
) -> Result<(), RecordError> {
    extract_fields(record, delimiter, bound, fields)?;
    if fields.len() < bound {
        return Err(crate::error::FormatError::TooFewFields {
            expected: bound,
            actual: fields.len(),
        }
        .into());
    }
    Ok(())
}

/// Decode a single record into one value per output column.
///
/// This is the explicit per-record step: resolve the schema once, then call
/// this for every record with the same schema.
pub fn decode_row(
    schema: &ResolvedSchema,
    delimiter: u8,
    record: &str,
) -> Result<Vec<Scalar>, RecordError> {
    let mut fields = Vec::with_capacity(schema.field_bound());
    tokenize_checked(record, delimiter, schema.field_bound(), &mut fields)?;

    schema
        .columns()
        .iter()
        .enumerate()
        .map(|(column, ColumnSpec { source_index, kind })| {
            convert_field(column, kind, &fields[*source_index]).map_err(RecordError::from)
        })
        .collect()
}
