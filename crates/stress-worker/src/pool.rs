//! Fixed-size pool of parallel workers.

use crate::error::StressError;
use crate::settings::StreamTarget;
use crate::worker::{Worker, WorkerResult};
use std::sync::Arc;
use std::time::Duration;
use stream_client::ClientFactory;
use stress_record::{RecordFactory, SequenceCounter};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{error, info};

/// Results of a completed pool run.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolReport {
    /// One entry per worker, ordered by worker id.
    pub workers: Vec<WorkerResult>,
    /// Time from spawning the first worker until the last one finished.
    pub wall_clock: Duration,
}

impl PoolReport {
    pub fn total_succeeded(&self) -> u64 {
        self.workers.iter().map(|w| w.succeeded).sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.workers.iter().map(|w| w.failed).sum()
    }

    pub fn total_submissions(&self) -> u64 {
        self.total_succeeded() + self.total_failed()
    }

    /// The worker that took longest.
    pub fn slowest(&self) -> Option<&WorkerResult> {
        self.workers.iter().max_by_key(|w| w.elapsed)
    }

    /// Resolved submissions per second across all workers.
    pub fn aggregate_records_per_second(&self) -> f64 {
        if self.wall_clock.as_secs_f64() > 0.0 {
            self.total_submissions() as f64 / self.wall_clock.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Spawns a fixed number of workers, each with its own client, and waits
/// for all of them.
///
/// Workers are spawned onto the ambient runtime. On a multi-thread runtime
/// with one thread per worker they run fully in parallel.
pub struct WorkerPool<F: ClientFactory> {
    factory: F,
    target: Arc<StreamTarget>,
    sequence: Arc<SequenceCounter>,
    poll_interval: Duration,
}

impl<F: ClientFactory> WorkerPool<F> {
    pub fn new(factory: F, target: StreamTarget, sequence: Arc<SequenceCounter>) -> Self {
        Self {
            factory,
            target: Arc::new(target),
            sequence,
            poll_interval: crate::settings::DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run `worker_count` workers of `iterations` submissions each.
    ///
    /// Every client is created before any worker starts; a client that fails
    /// to build aborts the whole run. Returns once every worker has
    /// finished. Submission failures only show up in the per-worker tallies.
    pub async fn run(
        &self,
        worker_count: usize,
        iterations: u64,
    ) -> Result<PoolReport, StressError> {
        if worker_count == 0 {
            return Err(StressError::InvalidConfig(
                "worker pool needs at least one worker".to_string(),
            ));
        }

        let mut workers = Vec::with_capacity(worker_count);
        for worker_id in 1..=worker_count {
            let client = self
                .factory
                .create(worker_id)
                .await
                .map_err(|source| StressError::ClientInit { worker_id, source })?;
            workers.push(Worker::new(
                worker_id,
                client,
                RecordFactory::new(self.sequence.clone()),
                self.target.clone(),
                iterations,
                self.poll_interval,
            ));
        }

        info!(
            "Starting {} workers x {} iterations against stream '{}' ({})",
            worker_count, iterations, self.target.stream_name, self.target.region
        );

        let start = Instant::now();
        let mut tasks = JoinSet::new();
        for mut worker in workers {
            tasks.spawn(async move { worker.run().await });
        }

        let mut results = Vec::with_capacity(worker_count);
        let mut fatal = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(result)) => results.push(result),
                Ok(Err(err)) => {
                    error!("Worker aborted: {}", err);
                    fatal.get_or_insert(err);
                }
                Err(err) => {
                    error!("Worker task failed: {}", err);
                    fatal.get_or_insert(StressError::WorkerTask(err));
                }
            }
        }
        let wall_clock = start.elapsed();

        if let Some(err) = fatal {
            return Err(err);
        }

        results.sort_by_key(|r| r.worker_id);
        info!(
            "All {} workers finished in {} ms",
            results.len(),
            wall_clock.as_millis()
        );

        Ok(PoolReport {
            workers: results,
            wall_clock,
        })
    }
}
