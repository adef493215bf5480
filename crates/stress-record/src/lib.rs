//! Record generation for the stream-stress load harness.
//!
//! Every worker owns a [`RecordFactory`]; all factories share one
//! [`SequenceCounter`] so the `consec` value embedded in each payload is
//! unique across the whole process.
//!
//! ```text
//!   SequenceCounter (Arc, atomic)
//!        │  fetch_add
//!        ▼
//! ┌─────────────────┐
//! │  RecordFactory  │──► Record { payload, partition_key, sequence }
//! └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stress_record::{RecordFactory, SequenceCounter};
//!
//! let counter = Arc::new(SequenceCounter::new());
//! let factory = RecordFactory::new(counter.clone());
//! let record = factory.next_record().unwrap();
//! assert_eq!(record.sequence, 0);
//! assert_eq!(counter.current(), 1);
//! ```

pub mod error;
pub mod factory;
pub mod sequence;

pub use error::RecordError;
pub use factory::{Greeting, Record, RecordFactory, GREETING};
pub use sequence::SequenceCounter;
