//! Oneshot-backed submission handle.

use crate::client::{SubmissionHandle, SubmissionOutcome, SubmissionStatus};
use crate::error::ClientError;
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Handle fed by whatever task performs the actual delivery.
#[derive(Debug)]
pub struct ChannelHandle {
    rx: oneshot::Receiver<SubmissionOutcome>,
}

impl ChannelHandle {
    /// Create a handle and the sender that resolves it.
    pub fn channel() -> (oneshot::Sender<SubmissionOutcome>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// A handle that is already resolved.
    pub fn resolved(outcome: SubmissionOutcome) -> Self {
        let (tx, handle) = Self::channel();
        // The receiver lives in `handle`, so this send cannot fail.
        let _ = tx.send(outcome);
        handle
    }
}

impl SubmissionHandle for ChannelHandle {
    fn poll(&mut self) -> SubmissionStatus {
        match self.rx.try_recv() {
            Ok(outcome) => SubmissionStatus::Resolved(outcome),
            Err(TryRecvError::Empty) => SubmissionStatus::Pending,
            Err(TryRecvError::Closed) => SubmissionStatus::Resolved(Err(ClientError::Dropped)),
        }
    }
}
