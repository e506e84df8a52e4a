//! The per-tick allocate-or-evict decision.

use churn_core::{EvictionPolicy, Prng, Ttl};
use churn_pool::Pool;
use tracing::trace;

use crate::config::{ConfigError, WorkloadConfig};
use crate::size::SizeGenerator;
use crate::ttl::TtlGenerator;

/// What the decision step of a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A block was added.
    Allocated {
        /// Size of the new block in bytes.
        size: u64,
        /// Lifetime of the new block.
        ttl: Ttl,
    },
    /// A block was evicted.
    Evicted {
        /// Size of the evicted block in bytes.
        size: u64,
    },
    /// Eviction was chosen but removed nothing: the policy is never, or
    /// the pool was empty.
    EvictSkipped,
    /// Allocation was chosen but the generated size was zero.
    Rejected,
}

/// Everything one [`ActionEngine::tick`] did to the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Blocks removed by the aging pass before the decision.
    pub expired: usize,
    /// The allocate-or-evict result.
    pub outcome: TickOutcome,
}

/// Runs one simulation tick against a [`Pool`].
///
/// Holds the policy, the allocation probability and the two generators
/// (which carry the only cross-tick state: the size trend cursor).
#[derive(Clone, Debug)]
pub struct ActionEngine {
    policy: EvictionPolicy,
    alloc_frequency: f64,
    sizes: SizeGenerator,
    ttls: TtlGenerator,
}

impl ActionEngine {
    /// Validate `config` and build the engine and its generators.
    pub fn new(config: &WorkloadConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            policy: config.policy,
            alloc_frequency: config.alloc_frequency,
            sizes: SizeGenerator::new(config.size.clone())?,
            ttls: TtlGenerator::new(config.ttl.clone())?,
        })
    }

    /// Eviction policy in use.
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// The size generator, including its trend cursor.
    pub fn sizes(&self) -> &SizeGenerator {
        &self.sizes
    }

    /// The lifetime generator.
    pub fn ttls(&self) -> &TtlGenerator {
        &self.ttls
    }

    /// The allocation gate: room in the pool and a uniform draw below
    /// the allocation frequency.
    ///
    /// The draw only happens when the pool has room.
    pub fn should_allocate(&self, pool: &Pool, rng: &mut Prng) -> bool {
        !pool.is_full() && rng.uniform01() < self.alloc_frequency
    }

    /// Run one tick:
    ///
    /// 1. if lifetimes are enabled, age the pool and drop expired blocks;
    /// 2. evaluate [`should_allocate`](Self::should_allocate);
    /// 3. evict by policy, or add a block with a generated size and
    ///    lifetime.
    pub fn tick(&mut self, pool: &mut Pool, rng: &mut Prng) -> TickReport {
        let expired = if self.ttls.is_enabled() {
            pool.age_and_prune()
        } else {
            0
        };

        let outcome = if self.should_allocate(pool, rng) {
            let size = self.sizes.next_size(rng);
            let ttl = self.ttls.next_ttl(rng);
            match pool.add(size, ttl) {
                Some(_) => TickOutcome::Allocated { size, ttl },
                None => TickOutcome::Rejected,
            }
        } else {
            match pool.evict(self.policy, rng) {
                Some(block) => TickOutcome::Evicted { size: block.size() },
                None => TickOutcome::EvictSkipped,
            }
        };

        trace!(?outcome, expired, count = pool.count(), "tick");
        TickReport { expired, outcome }
    }
}
