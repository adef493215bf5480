//! Worker pool for the stream-stress load harness.
//!
//! A [`WorkerPool`] builds one client per worker, then runs every
//! [`Worker`] in parallel. Each worker submits its records strictly one at a
//! time: build a record, submit it, poll the handle until it resolves, tally
//! the outcome, move on.
//!
//! ```text
//!                  ┌──────────────┐
//!                  │  WorkerPool  │  ClientFactory::create(1..=W)
//!                  └──────┬───────┘
//!          ┌──────────────┼──────────────┐
//!          ▼              ▼              ▼
//!     ┌─────────┐    ┌─────────┐    ┌─────────┐
//!     │Worker 1 │    │Worker 2 │    │Worker W │   own client each
//!     └────┬────┘    └────┬────┘    └────┬────┘
//!          │ submit → poll/sleep → tally (× iterations)
//!          ▼              ▼              ▼
//!     WorkerResult   WorkerResult   WorkerResult ──► PoolReport
//! ```
//!
//! The only state shared between workers is the atomic
//! [`stress_record::SequenceCounter`] and the immutable [`StreamTarget`].

pub mod args;
pub mod error;
pub mod pool;
pub mod report;
pub mod settings;
pub mod worker;

pub use args::StressArgs;
pub use error::StressError;
pub use pool::{PoolReport, WorkerPool};
pub use report::format_table;
pub use settings::{StreamTarget, StressSettings, DEFAULT_POLL_INTERVAL};
pub use worker::{Worker, WorkerResult, WorkerState};
