//! Error types for record generation.

use thiserror::Error;

/// Errors that can occur while building a record.
///
/// Encoding a payload only fails on a broken invariant, so callers treat
/// every variant as fatal.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Payload encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
