//! Error types for the worker pool.

use stream_client::ClientError;
use stress_record::RecordError;
use thiserror::Error;

/// Fatal errors. Submission failures are never reported here; workers
/// count and log those and keep going.
#[derive(Error, Debug)]
pub enum StressError {
    #[error("Invalid settings: {0}")]
    InvalidConfig(String),

    #[error("Failed to create client for worker {worker_id}: {source}")]
    ClientInit {
        worker_id: usize,
        #[source]
        source: ClientError,
    },

    #[error("Worker {worker_id} could not build a record: {source}")]
    Record {
        worker_id: usize,
        #[source]
        source: RecordError,
    },

    #[error("Worker task failed: {0}")]
    WorkerTask(#[from] tokio::task::JoinError),
}
