//! The submission contract consumed by workers.

use crate::error::ClientError;
use async_trait::async_trait;

/// Where the service stored an accepted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub shard_id: String,
    pub sequence_number: String,
}

/// Final result of one submission.
pub type SubmissionOutcome = Result<SubmissionReceipt, ClientError>;

/// Snapshot of a handle's state.
#[derive(Debug)]
pub enum SubmissionStatus {
    Pending,
    Resolved(SubmissionOutcome),
}

impl SubmissionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }
}

/// Pending outcome of a single submitted record.
pub trait SubmissionHandle: Send + 'static {
    /// Non-blocking status check.
    ///
    /// Once this returns [`SubmissionStatus::Resolved`] the handle is spent
    /// and should be dropped.
    fn poll(&mut self) -> SubmissionStatus;
}

/// Accepts records and hands back a handle to their asynchronous outcome.
pub trait SubmissionClient: Send + 'static {
    type Handle: SubmissionHandle;

    /// Queue a record for delivery and return immediately.
    ///
    /// `timestamp_key` is used as the partition key and `partition_key` as
    /// the explicit hash key, so shard placement follows `partition_key`.
    fn submit(
        &mut self,
        stream_name: &str,
        timestamp_key: &str,
        partition_key: &str,
        payload: &[u8],
    ) -> Self::Handle;
}

/// Builds one client per worker.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    type Client: SubmissionClient;

    async fn create(&self, worker_id: usize) -> Result<Self::Client, ClientError>;
}
