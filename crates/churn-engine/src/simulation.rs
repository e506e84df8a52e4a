//! The simulation driver: one pool, one PRNG, one engine.
//!
//! [`Simulation`] is the callable-struct form of a run. The caller owns
//! the loop and decides when to sample telemetry between
//! [`step()`](Simulation::step) calls; [`run()`](Simulation::run) is the
//! loop for callers that do not.

use churn_core::{Prng, TickId};
use churn_pool::Pool;
use tracing::debug;

use crate::action::{ActionEngine, TickReport};
use crate::config::{ConfigError, WorkloadConfig};
use crate::metrics::RunStats;

/// A single-threaded workload run.
///
/// All state is owned here and mutated in place; two simulations built
/// from equal configurations with the same non-zero seed evolve
/// identically.
#[derive(Debug)]
pub struct Simulation {
    config: WorkloadConfig,
    pool: Pool,
    rng: Prng,
    engine: ActionEngine,
    tick: TickId,
    stats: RunStats,
}

impl Simulation {
    /// Validate `config` and build the pool, PRNG and engine.
    ///
    /// A seed of `0` is replaced by an entropy-derived one; see
    /// [`seed()`](Self::seed).
    pub fn new(config: WorkloadConfig) -> Result<Self, ConfigError> {
        let engine = ActionEngine::new(&config)?;
        let rng = Prng::new(config.seed);
        debug!(
            seed = rng.initial_seed(),
            capacity = config.capacity,
            policy = %config.policy,
            "simulation created"
        );
        Ok(Self {
            pool: Pool::new(config.capacity),
            rng,
            engine,
            tick: TickId::default(),
            stats: RunStats::default(),
            config,
        })
    }

    /// Run one tick and fold it into [`stats()`](Self::stats).
    pub fn step(&mut self) -> TickReport {
        let report = self.engine.tick(&mut self.pool, &mut self.rng);
        self.tick = self.tick.next();
        self.stats.record(&report);
        report
    }

    /// Run `ticks` ticks and return the cumulative stats.
    pub fn run(&mut self, ticks: u64) -> RunStats {
        for _ in 0..ticks {
            self.step();
        }
        self.stats
    }

    /// Ticks completed so far.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Seed in effect, after substituting an entropy seed for `0`.
    pub fn seed(&self) -> u64 {
        self.rng.initial_seed()
    }

    /// Cumulative stats.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// The pool.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// The engine, including its generators.
    pub fn engine(&self) -> &ActionEngine {
        &self.engine
    }

    /// The configuration the run was built from.
    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }
}
