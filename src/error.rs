//! Error types for selected-column CSV decoding

use thiserror::Error;

/// Errors in the batch configuration, raised before any record is scanned
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `record_defaults` and `output_types` disagree in length
    #[error("Expected {output_types} record defaults (one per output type) but got {defaults}")]
    DefaultsLengthMismatch { defaults: usize, output_types: usize },

    /// A column was given more than one default scalar
    #[error("There should only be 1 default per field but field {column} has {count}")]
    TooManyDefaults { column: usize, count: usize },

    /// A default scalar has a different type than its column
    #[error("Default for field {column} is {actual} but the column type is {expected}")]
    DefaultTypeMismatch {
        column: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// `field_indices` is neither empty nor one entry per column
    #[error("field_indices must be empty or the same size as record_defaults ({expected}), got {actual}")]
    FieldIndicesLength { expected: usize, actual: usize },

    /// A requested field index is below zero
    #[error("field index for column {column} is smaller than 0: the index is {index}")]
    NegativeFieldIndex { column: usize, index: i32 },

    /// Output type name outside the supported set
    #[error("Unsupported output type: {0} (expected one of string, int32, int64, float32)")]
    UnsupportedType(String),

    /// Delimiter that is not a single usable character
    #[error("field_delim should be only 1 char, got {0:?}")]
    InvalidDelimiter(String),
}

/// Malformed record content found while tokenizing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Lone quote inside a quoted field
    #[error("Quote inside a string has to be escaped by another quote (offset {offset})")]
    UnescapedQuote { offset: usize },

    /// Quoted field not closed by a quote followed by the delimiter or end of record
    #[error("Quoted field has to end with quote followed by delim or end (offset {offset})")]
    UnterminatedQuote { offset: usize },

    /// Quote, CR or LF inside an unquoted field
    #[error("Unquoted fields cannot have quotes/CRLFs inside (found {byte:?} at offset {offset})")]
    InvalidUnquotedByte { offset: usize, byte: char },

    /// Record ran out before the field bound was reached
    #[error("Expect at least {expected} fields but have {actual}")]
    TooFewFields { expected: usize, actual: usize },
}

/// Field text that cannot be turned into its column's value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Empty field in a column without default
    #[error("Field {column} is required but missing")]
    MissingRequired { column: usize },

    /// Text is not an integer of the column's width
    #[error("Field {column} is not a valid {type_name}: {text}")]
    InvalidInteger {
        column: usize,
        type_name: &'static str,
        text: String,
    },

    /// Text is not a float literal
    #[error("Field {column} is not a valid float: {text}")]
    InvalidFloat { column: usize, text: String },
}

/// Failure while decoding a single record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Top-level error for a batch decode
///
/// Decoding is all-or-nothing: any of these aborts the whole batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeCsvError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Malformed record
    #[error("Format error in record {record_index}: {source}")]
    Format {
        record_index: usize,
        #[source]
        source: FormatError,
    },

    /// Unconvertible or missing field
    #[error("Conversion error in record {record_index}: {source}")]
    Conversion {
        record_index: usize,
        #[source]
        source: ConversionError,
    },
}

impl DecodeCsvError {
    /// Attach the batch position to a record-level error.
    pub fn at_record(record_index: usize, err: RecordError) -> Self {
        match err {
            RecordError::Format(source) => DecodeCsvError::Format {
                record_index,
                source,
            },
            RecordError::Conversion(source) => DecodeCsvError::Conversion {
                record_index,
                source,
            },
        }
    }

    /// Index of the failing record, if the error came from decoding.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            DecodeCsvError::Configuration(_) => None,
            DecodeCsvError::Format { record_index, .. }
            | DecodeCsvError::Conversion { record_index, .. } => Some(*record_index),
        }
    }
}
