//! Quote-aware field extraction for a single RFC 4180 record.
//!
//! The scanner is single-pass and stops as soon as `bound` fields have been
//! collected. Content after the last needed field is never looked at, so
//! malformed trailing columns go unnoticed.
//!
//! Fields are returned as `Cow<str>`: unquoted fields and quoted fields
//! without escaped quotes borrow from the record, only fields containing `""`
//! allocate.

use std::borrow::Cow;

use crate::error::FormatError;

const QUOTE: u8 = b'"';

/// Extract up to `bound` fields of `record` into `fields`.
///
/// `fields` is cleared first. On success it holds at most `bound` entries;
/// fewer means the record ran out. Callers check the count themselves.
///
/// # Arguments
/// * `record` - One complete UTF-8 record, without streaming across lines
/// * `delimiter` - ASCII field delimiter
/// * `bound` - Number of leading fields needed
pub fn extract_fields<'a>(
    record: &'a str,
    delimiter: u8,
    bound: usize,
    fields: &mut Vec<Cow<'a, str>>,
) -> Result<(), FormatError> {
    fields.clear();

    let input = record.as_bytes();
    if input.is_empty() {
        return Ok(());
    }

    let mut idx = 0;
    while idx < input.len() && fields.len() < bound {
        match input[idx] {
            // Stray line breaks between fields are skipped.
            b'\n' | b'\r' => {
                idx += 1;
                continue;
            }
            QUOTE => {
                let (field, next) = scan_quoted(record, idx + 1, delimiter)?;
                fields.push(field);
                idx = next;
            }
            _ => {
                let (field, next) = scan_unquoted(record, idx, delimiter)?;
                fields.push(field);
                idx = next;
            }
        }
    }

    // A trailing delimiter denotes one more, empty, field. Only relevant when
    // the loop stopped because the record was exhausted.
    if fields.len() < bound && input[input.len() - 1] == delimiter {
        fields.push(Cow::Borrowed(""));
    }

    Ok(())
}

/// Convenience wrapper around [`extract_fields`] returning a fresh vector.
pub fn tokenize(record: &str, delimiter: u8, bound: usize) -> Result<Vec<Cow<'_, str>>, FormatError> {
    let mut fields = Vec::with_capacity(bound);
    extract_fields(record, delimiter, bound, &mut fields)?;
    Ok(fields)
}

/// Scan an unquoted field starting at `start`.
///
/// Returns the field and the offset just past the terminating delimiter.
fn scan_unquoted(
    record: &str,
    start: usize,
    delimiter: u8,
) -> Result<(Cow<'_, str>, usize), FormatError> {
    let input = record.as_bytes();
    let mut idx = start;

    while idx < input.len() && input[idx] != delimiter {
        match input[idx] {
            QUOTE | b'\n' | b'\r' => {
                return Err(FormatError::InvalidUnquotedByte {
                    offset: idx,
                    byte: input[idx] as char,
                })
            }
            _ => idx += 1,
        }
    }

    Ok((Cow::Borrowed(&record[start..idx]), idx + 1))
}

/// Scan a quoted field whose body starts at `start` (just after the opening quote).
///
/// The field ends at a quote followed by the delimiter or by the end of the
/// record. Returns the unescaped field and the offset past quote and delimiter.
fn scan_quoted(
    record: &str,
    start: usize,
    delimiter: u8,
) -> Result<(Cow<'_, str>, usize), FormatError> {
    let input = record.as_bytes();
    let len = input.len();
    let mut idx = start;
    // Only allocated once an escaped quote shows up.
    let mut unescaped: Option<String> = None;
    let mut run_start = start;

    while idx + 1 < len && (input[idx] != QUOTE || input[idx + 1] != delimiter) {
        if input[idx] != QUOTE {
            idx += 1;
            continue;
        }
        if input[idx + 1] != QUOTE {
            return Err(FormatError::UnescapedQuote { offset: idx });
        }
        // `""` keeps the first quote and drops the second.
        unescaped
            .get_or_insert_with(String::new)
            .push_str(&record[run_start..=idx]);
        idx += 2;
        run_start = idx;
    }

    let closed = idx < len && input[idx] == QUOTE && (idx == len - 1 || input[idx + 1] == delimiter);
    if !closed {
        return Err(FormatError::UnterminatedQuote { offset: idx });
    }

    let field = match unescaped {
        Some(mut buf) => {
            buf.push_str(&record[run_start..idx]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(&record[start..idx]),
    };

    Ok((field, idx + 2))
}
