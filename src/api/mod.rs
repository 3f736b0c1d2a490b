//! Public API module for csvpick.
//!
//! # Module Structure
//! - `options`: Batch decoding options (`DecodeOptions`)
//! - `read`: The one-call entry point `decode_csv()`

pub mod options;
pub mod read;

pub use options::DecodeOptions;
pub use read::decode_csv;
