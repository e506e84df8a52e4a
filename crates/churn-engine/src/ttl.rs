//! Per-allocation block lifetime selection.

use churn_core::{Prng, Ttl, TtlMode};

use crate::config::{ConfigError, TtlConfig};

/// Picks the lifetime of each new block.
///
/// Stateless apart from its configuration: off yields
/// [`Ttl::INFINITE`] without touching the PRNG, fixed yields the fixed
/// value, list makes one weighted choice.
#[derive(Clone, Debug)]
pub struct TtlGenerator {
    config: TtlConfig,
}

impl TtlGenerator {
    /// Validate `config` and build the generator.
    pub fn new(config: TtlConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> &TtlConfig {
        &self.config
    }

    /// Whether blocks can expire at all.
    pub fn is_enabled(&self) -> bool {
        self.config.mode.is_enabled()
    }

    /// Choose the lifetime of the next block.
    pub fn next_ttl(&self, rng: &mut Prng) -> Ttl {
        match self.config.mode {
            TtlMode::Off => Ttl::INFINITE,
            TtlMode::Fixed => Ttl::ticks(self.config.fixed),
            TtlMode::List => Ttl::ticks(rng.weighted_choice(&self.config.list, &self.config.weights)),
        }
    }
}
