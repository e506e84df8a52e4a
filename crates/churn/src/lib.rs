//! Churn: a synthetic allocation/eviction workload simulator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all churn sub-crates. For most users, adding `churn` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use churn::prelude::*;
//!
//! let config = WorkloadConfig {
//!     capacity: 128,
//!     seed: 42,
//!     policy: EvictionPolicy::BigFirst,
//!     ..WorkloadConfig::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//! let stats = sim.run(1_000);
//!
//! assert_eq!(stats.ticks, 1_000);
//! assert!(sim.pool().count() <= 128);
//! assert_eq!(sim.current_tick(), TickId(1_000));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `churn-core` | Tick and TTL types, option enums, the PRNG |
//! | [`pool`] | `churn-pool` | Block store, capacity-bounded pool, allocation tracker |
//! | [`engine`] | `churn-engine` | Configuration, size/TTL generators, tick engine, simulation |
//! | [`telemetry`] | `churn-telemetry` | Process memory stats and CSV sampling |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the PRNG (`churn-core`).
///
/// Contains [`types::TickId`], [`types::Ttl`], the policy and mode enums,
/// and [`types::Prng`].
pub use churn_core as types;

/// Block storage and the pool (`churn-pool`).
///
/// [`pool::BlockStore`] is the ordered store; [`pool::Pool`] bounds it by
/// capacity and implements the eviction policies and TTL aging.
pub use churn_pool as pool;

/// Workload engine (`churn-engine`).
///
/// [`engine::Simulation`] drives a run; [`engine::ActionEngine`] is the
/// per-tick entry point for callers that own their own loop.
pub use churn_engine as engine;

/// Memory telemetry (`churn-telemetry`).
pub use churn_telemetry as telemetry;

/// Common imports for typical churn usage.
///
/// ```rust
/// use churn::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use churn_core::{
        Distribution, EvictionPolicy, Prng, SizeMode, TickId, Trend, Ttl, TtlMode,
    };

    // Pool
    pub use churn_pool::{AllocTracker, Block, BlockStore, NodeHandle, Pool};

    // Engine
    pub use churn_engine::{
        ActionEngine, ConfigError, RunStats, Simulation, SizeConfig,
        TickOutcome, TickReport, TtlConfig, WorkloadConfig,
    };

    // Telemetry
    pub use churn_telemetry::{CsvSink, Sample, Sampler, SystemMemoryStats};
}
