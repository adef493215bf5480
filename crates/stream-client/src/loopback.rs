//! Client that accepts records without touching the network.
//!
//! Used for `--dry-run`: the whole worker pipeline runs, but every
//! submission resolves successfully on its first poll.

use crate::client::{ClientFactory, SubmissionClient, SubmissionReceipt};
use crate::error::ClientError;
use crate::handle::ChannelHandle;
use async_trait::async_trait;
use tracing::debug;

pub struct LoopbackClient {
    shard_id: String,
    accepted: u64,
}

impl LoopbackClient {
    pub fn new(worker_id: usize) -> Self {
        Self {
            shard_id: format!("loopback-{worker_id:012}"),
            accepted: 0,
        }
    }

    /// Number of records accepted so far.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }
}

impl SubmissionClient for LoopbackClient {
    type Handle = ChannelHandle;

    fn submit(
        &mut self,
        stream_name: &str,
        timestamp_key: &str,
        partition_key: &str,
        payload: &[u8],
    ) -> ChannelHandle {
        self.accepted += 1;
        debug!(
            "Loopback accepted record for '{}' (key: {}, hash key: {}, {} bytes)",
            stream_name,
            timestamp_key,
            partition_key,
            payload.len()
        );
        ChannelHandle::resolved(Ok(SubmissionReceipt {
            shard_id: self.shard_id.clone(),
            sequence_number: self.accepted.to_string(),
        }))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopbackClientFactory;

#[async_trait]
impl ClientFactory for LoopbackClientFactory {
    type Client = LoopbackClient;

    async fn create(&self, worker_id: usize) -> Result<LoopbackClient, ClientError> {
        Ok(LoopbackClient::new(worker_id))
    }
}
