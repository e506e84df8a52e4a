//! Memory telemetry for churn runs.
//!
//! Pairs the pool's [`AllocTracker`](churn_pool::AllocTracker) counters
//! with the process's own virtual-memory statistics and streams them as
//! CSV. Nothing here feeds back into the simulation: sampling reads the
//! pool and never touches the PRNG.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod proc_status;
pub mod sample;
pub mod sink;

pub use proc_status::{parse_status, SystemMemoryStats};
pub use sample::Sample;
pub use sink::{CsvSink, Sampler, CSV_HEADER};
