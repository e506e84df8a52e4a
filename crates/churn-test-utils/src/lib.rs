//! Test utilities and fixtures for churn development.
//!
//! Provides a [`WorkloadBuilder`] for terse configuration setup, pool
//! builders for known contents, and helpers to inspect a pool in list
//! order.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{pool_of, pool_with_ttls, sizes, ttls, SEEDS};

use churn_core::{Distribution, EvictionPolicy, SizeMode, Trend, TtlMode};
use churn_engine::{ValueList, WorkloadConfig};

/// Builder for [`WorkloadConfig`] with a non-zero seed and a small pool.
///
/// Starts from the defaults with `capacity = 256` and the given seed,
/// so tests are reproducible unless they ask otherwise.
pub struct WorkloadBuilder {
    config: WorkloadConfig,
}

impl WorkloadBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            config: WorkloadConfig {
                capacity: 256,
                seed,
                ..WorkloadConfig::default()
            },
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn alloc_frequency(mut self, freq: f64) -> Self {
        self.config.alloc_frequency = freq;
        self
    }

    pub fn policy(mut self, policy: EvictionPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn size_bounds(mut self, min: u64, max: u64) -> Self {
        self.config.size.min = min;
        self.config.size.max = max;
        self
    }

    pub fn trend(mut self, trend: Trend, step: u64, jitter: u64) -> Self {
        self.config.size.trend = trend;
        self.config.size.step = step;
        self.config.size.jitter = jitter;
        self
    }

    pub fn distribution(mut self, distribution: Distribution, param: f64) -> Self {
        self.config.size.distribution = distribution;
        self.config.size.dist_param = param;
        self
    }

    /// Fixed size list. Empty `weights` means uniform.
    pub fn size_list(mut self, list: &[u64], weights: &[u64], mode: SizeMode) -> Self {
        self.config.size.list = ValueList::from_slice(list);
        self.config.size.weights = ValueList::from_slice(weights);
        self.config.size.mode = mode;
        self
    }

    pub fn ttl_fixed(mut self, ticks: u64) -> Self {
        self.config.ttl.mode = TtlMode::Fixed;
        self.config.ttl.fixed = ticks;
        self
    }

    /// TTL list. Empty `weights` means uniform.
    pub fn ttl_list(mut self, list: &[u64], weights: &[u64]) -> Self {
        self.config.ttl.mode = TtlMode::List;
        self.config.ttl.list = ValueList::from_slice(list);
        self.config.ttl.weights = ValueList::from_slice(weights);
        self
    }

    /// The configuration, unvalidated.
    pub fn build(self) -> WorkloadConfig {
        self.config
    }
}
