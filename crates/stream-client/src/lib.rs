//! Submission clients for the stream-stress load harness.
//!
//! The harness only needs "submit a record, get a handle, poll the handle".
//! That contract is the [`SubmissionClient`] / [`SubmissionHandle`] pair;
//! everything behind it is opaque to the workers.
//!
//! ## Implementations
//!
//! - [`KinesisClient`]: `PutRecord` against AWS Kinesis Data Streams, with
//!   in-flight requests bounded by `max_connections`
//! - [`LoopbackClient`]: resolves every submission locally (dry runs)
//! - [`testing::ScriptedClient`]: deterministic outcomes for tests
//!
//! Each worker builds its own client through a [`ClientFactory`]; clients are
//! never shared between workers.

pub mod client;
pub mod config;
pub mod error;
pub mod handle;
pub mod kinesis;
pub mod loopback;
pub mod testing;

pub use client::{
    ClientFactory, SubmissionClient, SubmissionHandle, SubmissionOutcome, SubmissionReceipt,
    SubmissionStatus,
};
pub use config::{ClientConfig, CredentialStrategy};
pub use error::ClientError;
pub use handle::ChannelHandle;
pub use kinesis::{KinesisClient, KinesisClientFactory};
pub use loopback::{LoopbackClient, LoopbackClientFactory};
