//! Benchmark profiles for the churn workload generator.
//!
//! Provides pre-built [`WorkloadConfig`] profiles for the benches:
//!
//! - [`reference_profile`]: 10K-block pool, uniform sizes, LIFO eviction
//! - [`ttl_profile`]: same pool with weighted lifetimes and no eviction
//! - [`stress_profile`]: 100K-block pool with big-first eviction over power-law sizes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use churn_core::{Distribution, EvictionPolicy, TtlMode};
use churn_engine::{ValueList, WorkloadConfig};

/// 10K-block pool, sizes uniform in `[16 B, 64 KiB]`, LIFO eviction.
pub fn reference_profile(seed: u64) -> WorkloadConfig {
    let mut config = WorkloadConfig {
        capacity: 10_000,
        alloc_frequency: 0.7,
        seed,
        policy: EvictionPolicy::Lifo,
        ..WorkloadConfig::default()
    };
    config.size.min = 16;
    config.size.max = 64 << 10;
    config
}

/// Reference pool where blocks only leave by expiring.
///
/// Lifetimes of 10, 100 or 1000 ticks weighted 6:3:1, so every tick
/// walks the whole pool to age it.
pub fn ttl_profile(seed: u64) -> WorkloadConfig {
    let mut config = reference_profile(seed);
    config.policy = EvictionPolicy::Never;
    config.ttl.mode = TtlMode::List;
    config.ttl.list = ValueList::from_slice(&[10, 100, 1000]);
    config.ttl.weights = ValueList::from_slice(&[6, 3, 1]);
    config
}

/// 100K-block pool with power-law sizes and big-first eviction.
///
/// Big-first scans the whole store on every eviction.
pub fn stress_profile(seed: u64) -> WorkloadConfig {
    let mut config = reference_profile(seed);
    config.capacity = 100_000;
    config.policy = EvictionPolicy::BigFirst;
    config.size.max = 1 << 20;
    config.size.distribution = Distribution::PowerLaw;
    config.size.dist_param = 1.5;
    config
}
