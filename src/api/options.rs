//! Batch decoding options.
//!
//! `DecodeOptions` holds the settings that are not part of the column schema:
//! the field delimiter and how large batches are split for parallel decoding.

use crate::error::ConfigError;

/// Options for a batch decode.
///
/// # Example
/// ```
/// use csvpick::api::DecodeOptions;
///
/// let opts = DecodeOptions::new()
///     .with_field_delim('|')
///     .with_chunk_size(4096);
/// assert_eq!(opts.validate().unwrap(), b'|');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Field delimiter (default: `,`).
    ///
    /// Must be a single ASCII character other than `"`, CR or LF.
    pub field_delim: char,

    /// Minimum number of records before a batch is decoded in parallel
    /// (default: 4096). Smaller batches stay on the calling thread.
    ///
    /// Ignored without the `parallel` feature.
    pub parallel_threshold: usize,

    /// Records per parallel work unit (default: 1024).
    pub chunk_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            field_delim: ',',
            parallel_threshold: 4096,
            chunk_size: 1024,
        }
    }
}

impl DecodeOptions {
    /// Create a new `DecodeOptions` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a delimiter given as a string attribute.
    ///
    /// The string must hold exactly one character.
    pub fn from_delimiter_str(delim: &str) -> Result<Self, ConfigError> {
        let mut chars = delim.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                let opts = Self::default().with_field_delim(c);
                opts.validate()?;
                Ok(opts)
            }
            _ => Err(ConfigError::InvalidDelimiter(delim.to_string())),
        }
    }

    /// Set the field delimiter.
    pub fn with_field_delim(mut self, field_delim: char) -> Self {
        self.field_delim = field_delim;
        self
    }

    /// Set the parallel decoding threshold.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Set the number of records per parallel work unit.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Check the options and return the delimiter as a byte.
    pub fn validate(&self) -> Result<u8, ConfigError> {
        let c = self.field_delim;
        if !c.is_ascii() || matches!(c, '"' | '\n' | '\r') {
            return Err(ConfigError::InvalidDelimiter(c.to_string()));
        }
        Ok(c as u8)
    }

    /// Chunk size with zero treated as one.
    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_options_default() {
        let opts = DecodeOptions::default();
        assert_eq!(opts.field_delim, ',');
        assert_eq!(opts.parallel_threshold, 4096);
        assert_eq!(opts.chunk_size, 1024);
        assert_eq!(opts, DecodeOptions::new());
    }

    #[test]
    fn test_decode_options_builder() {
        let opts = DecodeOptions::new()
            .with_field_delim('\t')
            .with_parallel_threshold(10)
            .with_chunk_size(0);

        assert_eq!(opts.field_delim, '\t');
        assert_eq!(opts.parallel_threshold, 10);
        assert_eq!(opts.effective_chunk_size(), 1);
        assert_eq!(opts.validate().unwrap(), b'\t');
    }

    #[test]
    fn test_validate_rejects_unusable_delimiters() {
        for c in ['"', '\n', '\r', 'é', '→'] {
            let err = DecodeOptions::new().with_field_delim(c).validate().unwrap_err();
            assert_eq!(err, ConfigError::InvalidDelimiter(c.to_string()));
        }
    }

    #[test]
    fn test_from_delimiter_str() {
        assert_eq!(
            DecodeOptions::from_delimiter_str(";").unwrap().field_delim,
            ';'
        );
        assert!(matches!(
            DecodeOptions::from_delimiter_str(""),
            Err(ConfigError::InvalidDelimiter(_))
        ));
        assert!(matches!(
            DecodeOptions::from_delimiter_str(",,"),
            Err(ConfigError::InvalidDelimiter(_))
        ));
        assert!(matches!(
            DecodeOptions::from_delimiter_str("\""),
            Err(ConfigError::InvalidDelimiter(_))
        ));
    }
}
