//! Per-allocation block size selection.
//!
//! A [`SizeGenerator`] combines three sources, in this order of
//! precedence:
//!
//! 1. a fixed size list in [`SizeMode::Exact`]: a weighted pick from the
//!    list, the trend is never consulted;
//! 2. the trend cursor (grow/shrink/saw), or a fresh distribution sample
//!    when the trend is none;
//! 3. a fixed size list in [`SizeMode::Nearest`]: the value from (2)
//!    snapped to the closest list entry.
//!
//! The trend path always draws its jitter first, even when the jitter
//! width is zero or the trend is none, so the PRNG stream depends only
//! on the configuration, never on the cursor value.

use churn_core::{Prng, SizeMode, Trend};

use crate::config::{ConfigError, SizeConfig};

/// Stateful block size generator.
///
/// Owns the trend cursor: the size handed out by the next trend step.
#[derive(Clone, Debug)]
pub struct SizeGenerator {
    config: SizeConfig,
    cursor: u64,
}

impl SizeGenerator {
    /// Validate `config` and position the cursor for its trend.
    ///
    /// Grow and saw start at `min`, shrink starts at `max`.
    pub fn new(config: SizeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cursor = match config.trend {
            Trend::None => 0,
            Trend::Grow | Trend::Saw => config.min,
            Trend::Shrink => config.max,
        };
        Ok(Self { config, cursor })
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> &SizeConfig {
        &self.config
    }

    /// The size the next trend step will return, or `None` when the trend
    /// is none.
    pub fn cursor(&self) -> Option<u64> {
        match self.config.trend {
            Trend::None => None,
            _ => Some(self.cursor),
        }
    }

    /// Choose the size of the next block.
    pub fn next_size(&mut self, rng: &mut Prng) -> u64 {
        if self.config.list.is_empty() {
            return self.trend_size(rng);
        }
        match self.config.mode {
            SizeMode::Exact => rng.weighted_choice(&self.config.list, &self.config.weights),
            SizeMode::Nearest => {
                let target = self.trend_size(rng);
                nearest(&self.config.list, target)
            }
        }
    }

    fn trend_size(&mut self, rng: &mut Prng) -> u64 {
        let delta = self.jittered_step(rng);
        let (min, max) = (self.config.min, self.config.max);

        match self.config.trend {
            Trend::None => rng.sample(self.config.distribution, min, max, self.config.dist_param),
            Trend::Grow => {
                let current = self.cursor;
                self.cursor = self.cursor.saturating_add(delta).clamp(min, max);
                current
            }
            Trend::Shrink => {
                let current = self.cursor;
                self.cursor = self.cursor.checked_sub(delta).unwrap_or(min).clamp(min, max);
                current
            }
            Trend::Saw => {
                let current = self.cursor;
                let advanced = self.cursor.saturating_add(delta);
                self.cursor = if advanced > max { min } else { advanced };
                current
            }
        }
    }

    /// `step` plus a jitter drawn from `[-jitter, jitter)`, floored at 1.
    fn jittered_step(&self, rng: &mut Prng) -> u64 {
        // `validate` bounds jitter by u64::MAX / 2.
        let half = self.config.jitter;
        let jitter = i128::from(rng.uniform_int(0, half * 2)) - i128::from(half);
        let step = i128::from(self.config.step) + jitter;
        if step <= 0 {
            1
        } else {
            u64::try_from(step).unwrap_or(u64::MAX)
        }
    }
}

/// The entry of `list` closest to `target`; the earliest entry wins ties.
fn nearest(list: &[u64], target: u64) -> u64 {
    let mut best = list[0];
    let mut best_diff = best.abs_diff(target);
    for &candidate in &list[1..] {
        let diff = candidate.abs_diff(target);
        if diff < best_diff {
            best = candidate;
            best_diff = diff;
        }
    }
    best
}
