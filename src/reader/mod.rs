//! Record reader components
//!
//! This module provides the core decoding path: quote-aware field
//! extraction, typed field conversion, per-record decoding into column
//! builders and batch decoding.

mod batch;
pub mod decode;
pub mod record_decoder;
pub mod tokenizer;

pub use batch::{decode_batch, DecodedBatch};
pub use decode::{decode_float32, decode_int32, decode_int64, decode_string};
pub use record_decoder::{decode_row, Column, RecordDecoder};
pub use tokenizer::{extract_fields, tokenize};
