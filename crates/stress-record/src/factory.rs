//! Record payload and partition key generation.

use crate::error::RecordError;
use crate::sequence::SequenceCounter;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fixed greeting carried by every payload.
pub const GREETING: &str = "Hello World!";

/// JSON document submitted as the record payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
    pub consec: u64,
}

/// A record ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// UTF-8 encoded [`Greeting`].
    pub payload: Vec<u8>,
    /// Explicit hash key: decimal rendering of a random 128-bit integer.
    pub partition_key: String,
    /// Sequence value embedded in the payload.
    pub sequence: u64,
}

/// Builds outgoing records for one worker.
///
/// Factories are cheap; each worker gets its own, all sharing the
/// process-wide [`SequenceCounter`].
#[derive(Debug, Clone)]
pub struct RecordFactory {
    sequence: Arc<SequenceCounter>,
}

impl RecordFactory {
    pub fn new(sequence: Arc<SequenceCounter>) -> Self {
        Self { sequence }
    }

    /// Random explicit hash key used to spread records across shards.
    ///
    /// Keys are drawn uniformly from `0..2^128`, which is exactly the
    /// hash key space the stream partitions. Collisions are allowed.
    pub fn generate_partition_key(&self) -> String {
        partition_key_from(&mut rand::rng())
    }

    /// Encode the next greeting payload, consuming one sequence value.
    pub fn generate_payload(&self) -> Result<(Vec<u8>, u64), RecordError> {
        let consec = self.sequence.next();
        let payload = serde_json::to_vec(&Greeting {
            message: GREETING.to_string(),
            consec,
        })?;
        Ok((payload, consec))
    }

    /// Build a complete record: payload plus partition key.
    pub fn next_record(&self) -> Result<Record, RecordError> {
        let (payload, sequence) = self.generate_payload()?;
        Ok(Record {
            payload,
            partition_key: self.generate_partition_key(),
            sequence,
        })
    }
}

/// Render a random `u128` drawn from `rng` as a base-10 string.
pub fn partition_key_from<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.random::<u128>().to_string()
}
