//! Scripted clients for exercising workers without a stream service.
//!
//! A [`Script`] fixes how many polls a handle stays pending and how it
//! finally resolves. A shared [`Recorder`] records what the clients saw.

use crate::client::{
    ClientFactory, SubmissionClient, SubmissionHandle, SubmissionReceipt, SubmissionStatus,
};
use crate::error::ClientError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// How every handle issued by a [`ScriptedClient`] behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script {
    /// Polls answered with `Pending` before resolving; `None` never resolves.
    pub pending_polls: Option<usize>,
    pub succeed: bool,
}

impl Script {
    pub fn succeed_immediately() -> Self {
        Self {
            pending_polls: Some(0),
            succeed: true,
        }
    }

    pub fn fail_after(pending_polls: usize) -> Self {
        Self {
            pending_polls: Some(pending_polls),
            succeed: false,
        }
    }

    pub fn never_resolve() -> Self {
        Self {
            pending_polls: None,
            succeed: true,
        }
    }
}

/// Submitted record as seen by a scripted client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub stream_name: String,
    pub timestamp_key: String,
    pub partition_key: String,
    pub payload: Vec<u8>,
}

/// Observations shared by every scripted client and handle.
#[derive(Debug, Default)]
pub struct Recorder {
    polls: AtomicUsize,
    created: AtomicUsize,
    submitted: Mutex<Vec<Submitted>>,
}

impl Recorder {
    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    /// Number of clients built by a [`ScriptedClientFactory`].
    pub fn clients_created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> usize {
        self.lock().len()
    }

    pub fn submitted(&self) -> Vec<Submitted> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Submitted>> {
        self.submitted.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct ScriptedClient {
    script: Script,
    recorder: Arc<Recorder>,
}

impl ScriptedClient {
    pub fn new(script: Script, recorder: Arc<Recorder>) -> Self {
        Self { script, recorder }
    }
}

impl SubmissionClient for ScriptedClient {
    type Handle = ScriptedHandle;

    fn submit(
        &mut self,
        stream_name: &str,
        timestamp_key: &str,
        partition_key: &str,
        payload: &[u8],
    ) -> ScriptedHandle {
        let index = {
            let mut submitted = self.recorder.lock();
            submitted.push(Submitted {
                stream_name: stream_name.to_string(),
                timestamp_key: timestamp_key.to_string(),
                partition_key: partition_key.to_string(),
                payload: payload.to_vec(),
            });
            submitted.len()
        };

        ScriptedHandle {
            remaining: self.script.pending_polls,
            succeed: self.script.succeed,
            index,
            recorder: self.recorder.clone(),
        }
    }
}

pub struct ScriptedHandle {
    remaining: Option<usize>,
    succeed: bool,
    index: usize,
    recorder: Arc<Recorder>,
}

impl SubmissionHandle for ScriptedHandle {
    fn poll(&mut self) -> SubmissionStatus {
        self.recorder.polls.fetch_add(1, Ordering::SeqCst);
        match self.remaining {
            None => SubmissionStatus::Pending,
            Some(n) if n > 0 => {
                self.remaining = Some(n - 1);
                SubmissionStatus::Pending
            }
            Some(_) if self.succeed => SubmissionStatus::Resolved(Ok(SubmissionReceipt {
                shard_id: "shardId-000000000000".to_string(),
                sequence_number: self.index.to_string(),
            })),
            Some(_) => SubmissionStatus::Resolved(Err(ClientError::Service(
                "scripted failure".to_string(),
            ))),
        }
    }
}

/// Factory handing out [`ScriptedClient`]s, optionally failing for one worker.
pub struct ScriptedClientFactory {
    script: Script,
    recorder: Arc<Recorder>,
    fail_worker: Option<usize>,
}

impl ScriptedClientFactory {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            recorder: Arc::new(Recorder::default()),
            fail_worker: None,
        }
    }

    /// Make client creation fail for `worker_id`.
    pub fn failing_for(mut self, worker_id: usize) -> Self {
        self.fail_worker = Some(worker_id);
        self
    }

    pub fn recorder(&self) -> Arc<Recorder> {
        self.recorder.clone()
    }
}

#[async_trait]
impl ClientFactory for ScriptedClientFactory {
    type Client = ScriptedClient;

    async fn create(&self, worker_id: usize) -> Result<ScriptedClient, ClientError> {
        if self.fail_worker == Some(worker_id) {
            return Err(ClientError::InvalidConfig(format!(
                "scripted client refused worker {worker_id}"
            )));
        }
        self.recorder.created.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedClient::new(self.script, self.recorder.clone()))
    }
}
