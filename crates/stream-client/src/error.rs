//! Error types for submission clients.

use thiserror::Error;

/// Errors raised while building a client or resolving a submission.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Provisioned throughput exceeded: {0}")]
    Throttled(String),

    #[error("Stream service error: {0}")]
    Service(String),

    #[error("Submission dropped before it resolved")]
    Dropped,
}
