//! Immutable run settings.

use std::time::Duration;
use stream_client::ClientConfig;

/// Interval a worker sleeps between polls of a pending submission.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The stream every worker writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamTarget {
    pub stream_name: String,
    pub region: String,
}

/// Everything a run needs, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressSettings {
    pub worker_count: usize,
    pub iterations: u64,
    pub poll_interval: Duration,
    pub target: StreamTarget,
    pub client: ClientConfig,
    /// Use the loopback client instead of Kinesis.
    pub dry_run: bool,
}

impl StressSettings {
    pub fn total_records(&self) -> u64 {
        self.worker_count as u64 * self.iterations
    }
}
