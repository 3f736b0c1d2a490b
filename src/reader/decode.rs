//! Field text to typed value conversion.
//!
//! One function per output type. Each returns `None` when the text is not a
//! valid literal of that type; the caller attaches column context.

/// Strict integer check: optional sign, then at least one ASCII digit.
fn is_integer_literal(text: &str) -> bool {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Decode a 32-bit signed integer. Out-of-range values are rejected.
#[inline]
pub fn decode_int32(text: &str) -> Option<i32> {
    if !is_integer_literal(text) {
        return None;
    }
    text.parse().ok()
}

/// Decode a 64-bit signed integer. Out-of-range values are rejected.
#[inline]
pub fn decode_int64(text: &str) -> Option<i64> {
    if !is_integer_literal(text) {
        return None;
    }
    text.parse().ok()
}

/// Decode a 32-bit float.
///
/// Accepts decimal and exponent forms as well as `inf`, `infinity` and `nan`
/// (case-insensitive). Leading and trailing ASCII whitespace is ignored,
/// unlike for integers.
#[inline]
pub fn decode_float32(text: &str) -> Option<f32> {
    text.trim_matches(|c: char| c.is_ascii_whitespace()).parse().ok()
}

/// Decode a string: the field text, verbatim.
#[inline]
pub fn decode_string(text: &str) -> String {
    text.to_string()
}
