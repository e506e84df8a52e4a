//! Workload engine for churn.
//!
//! Turns a [`WorkloadConfig`] into a stream of pool mutations. Each tick
//! the [`ActionEngine`] ages the pool (when lifetimes are enabled),
//! flips the allocation gate, and either evicts by policy or adds a
//! block whose size comes from the [`SizeGenerator`] and whose lifetime
//! comes from the [`TtlGenerator`]. [`Simulation`] owns the pool, PRNG
//! and engine for a whole run.
//!
//! Everything is single-threaded and deterministic for a given non-zero
//! seed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod config;
pub mod metrics;
pub mod simulation;
pub mod size;
pub mod ttl;

pub use action::{ActionEngine, TickOutcome, TickReport};
pub use config::{ConfigError, SizeConfig, TtlConfig, ValueList, WorkloadConfig};
pub use metrics::RunStats;
pub use simulation::Simulation;
pub use size::SizeGenerator;
pub use ttl::TtlGenerator;
