//! Errors raised while decoding a block template.

use thiserror::Error;

use crate::header::PREIMAGE_SIZE;

/// Reasons a block template is rejected.
///
/// Any of these aborts the whole parse; no partially decoded template is
/// ever handed out.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The template value is not a JSON object.
    #[error("block template is not a JSON object")]
    NotAnObject,

    /// A required field is absent or empty.
    #[error("block template is missing required field `{field}`")]
    MissingField { field: &'static str },

    /// A 32-byte hash field decoded to the wrong number of bytes.
    #[error("field `{field}` decoded to {len} bytes, expected 32")]
    InvalidHashLength { field: &'static str, len: usize },

    /// The header writer did not finish exactly at the end of the preimage.
    #[error("header preimage ended at offset {offset}, expected {}", PREIMAGE_SIZE)]
    CursorMismatch { offset: usize },

    /// The template text is not valid JSON.
    #[error("invalid block template JSON: {0}")]
    Json(#[from] serde_json::Error),
}
