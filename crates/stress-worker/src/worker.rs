//! A single worker's submit-and-wait loop.

use crate::error::StressError;
use crate::settings::StreamTarget;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use stream_client::{SubmissionClient, SubmissionHandle, SubmissionOutcome, SubmissionStatus};
use stress_record::RecordFactory;
use tokio::time::Instant;
use tracing::{info, warn};

/// Lifecycle of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
    Finished,
}

/// Tallies for one worker, reported when its loop ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerResult {
    pub worker_id: usize,
    pub iterations_completed: u64,
    pub elapsed: Duration,
    pub succeeded: u64,
    pub failed: u64,
}

impl WorkerResult {
    fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            iterations_completed: 0,
            elapsed: Duration::ZERO,
            succeeded: 0,
            failed: 0,
        }
    }

    /// Resolved submissions per second.
    pub fn records_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            (self.succeeded + self.failed) as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Submits `iterations` records one after another through its own client.
///
/// Iteration `k + 1` is only built once iteration `k` has resolved. While a
/// submission is pending the worker sleeps `poll_interval` between polls;
/// that sleep suspends this worker's task and nothing else.
///
/// There is no upper bound on how long a submission may stay pending. A
/// client that never resolves a handle stalls its worker forever; the
/// client's own request timeout is the only thing that ends the wait.
pub struct Worker<C: SubmissionClient> {
    id: usize,
    client: C,
    records: RecordFactory,
    target: Arc<StreamTarget>,
    iterations: u64,
    poll_interval: Duration,
    state: WorkerState,
}

impl<C: SubmissionClient> Worker<C> {
    pub fn new(
        id: usize,
        client: C,
        records: RecordFactory,
        target: Arc<StreamTarget>,
        iterations: u64,
        poll_interval: Duration,
    ) -> Self {
        Self {
            id,
            client,
            records,
            target,
            iterations,
            poll_interval,
            state: WorkerState::Idle,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Run the loop to completion.
    ///
    /// Only a record that cannot be built aborts the loop. Failed
    /// submissions are logged, counted and skipped.
    pub async fn run(&mut self) -> Result<WorkerResult, StressError> {
        self.state = WorkerState::Running;
        let start = Instant::now();
        let mut result = WorkerResult::new(self.id);

        for iteration in 0..self.iterations {
            info!("Processing worker ({}) iteration #{}", self.id, iteration);

            let record = self
                .records
                .next_record()
                .map_err(|source| StressError::Record {
                    worker_id: self.id,
                    source,
                })?;
            let timestamp_key = Utc::now().timestamp_millis().to_string();

            let mut handle = self.client.submit(
                &self.target.stream_name,
                &timestamp_key,
                &record.partition_key,
                &record.payload,
            );

            match wait_for_outcome(&mut handle, self.poll_interval).await {
                Ok(receipt) => {
                    result.succeeded += 1;
                    info!(
                        "Worker ({}) record {} successful = true (shard: {}, sequence: {})",
                        self.id, record.sequence, receipt.shard_id, receipt.sequence_number
                    );
                }
                Err(err) => {
                    result.failed += 1;
                    warn!(
                        "Worker ({}) record {} successful = false: {}",
                        self.id, record.sequence, err
                    );
                }
            }
            result.iterations_completed += 1;
        }

        result.elapsed = start.elapsed();
        self.state = WorkerState::Finished;

        info!(
            "Worker ({}) finished in {} ms ({} ok, {} failed)",
            self.id,
            result.elapsed.as_millis(),
            result.succeeded,
            result.failed
        );

        Ok(result)
    }
}

/// Poll `handle` until it resolves, sleeping `interval` between polls.
pub async fn wait_for_outcome<H: SubmissionHandle>(
    handle: &mut H,
    interval: Duration,
) -> SubmissionOutcome {
    loop {
        match handle.poll() {
            SubmissionStatus::Pending => tokio::time::sleep(interval).await,
            SubmissionStatus::Resolved(outcome) => return outcome,
        }
    }
}
