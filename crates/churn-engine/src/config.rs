//! Workload configuration, validation, and error types.
//!
//! [`WorkloadConfig`] is the single input for building a
//! [`Simulation`](crate::Simulation). Every constructor in this crate
//! that accepts a configuration calls [`validate()`](WorkloadConfig::validate)
//! first, so an invalid combination is reported as a [`ConfigError`]
//! instead of reaching one of the panicking preconditions further down.

use std::error::Error;
use std::fmt;

use churn_core::{Distribution, EvictionPolicy, SizeMode, Trend, TtlMode};
use smallvec::SmallVec;

/// Inline-first list of sizes, weights or lifetimes.
pub type ValueList = SmallVec<[u64; 8]>;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`WorkloadConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Allocation frequency is NaN, infinite, or outside `[0, 1]`.
    AllocFrequencyOutOfRange {
        /// The invalid value.
        value: f64,
    },
    /// `size.min` exceeds `size.max`.
    SizeBoundsInverted {
        /// Configured minimum.
        min: u64,
        /// Configured maximum.
        max: u64,
    },
    /// Trend step is zero.
    ZeroSizeStep,
    /// Trend jitter is wider than `u64::MAX / 2`, so `[-jitter, jitter)`
    /// cannot be drawn.
    JitterTooWide {
        /// The invalid value.
        value: u64,
    },
    /// Distribution parameter is non-finite, non-positive for the
    /// exponential rate, or zero for the power-law exponent.
    InvalidDistributionParam {
        /// The distribution the parameter belongs to.
        distribution: Distribution,
        /// The invalid value.
        value: f64,
    },
    /// A weight list is non-empty and its length differs from its list.
    WeightCountMismatch {
        /// Which list: `"size"` or `"ttl"`.
        list: &'static str,
        /// Number of items.
        items: usize,
        /// Number of weights.
        weights: usize,
    },
    /// A weight list sums past `u64::MAX`.
    WeightSumOverflow {
        /// Which list: `"size"` or `"ttl"`.
        list: &'static str,
    },
    /// Power-law sizes need `min > 0`: the inverse CDF is undefined at 0.
    PowerLawZeroMin,
    /// TTL mode is fixed but the fixed lifetime is zero.
    ZeroFixedTtl,
    /// TTL mode is list but the list is empty.
    EmptyTtlList,
    /// Policy is never but TTL mode is off, so nothing would ever leave
    /// the pool.
    NeverPolicyWithoutTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocFrequencyOutOfRange { value } => {
                write!(f, "alloc frequency must be in [0, 1], got {value}")
            }
            Self::SizeBoundsInverted { min, max } => {
                write!(f, "min size {min} exceeds max size {max}")
            }
            Self::ZeroSizeStep => write!(f, "size step must be non-zero"),
            Self::JitterTooWide { value } => {
                write!(f, "trend jitter {value} exceeds {}", u64::MAX / 2)
            }
            Self::InvalidDistributionParam {
                distribution: Distribution::Exponential,
                value,
            } => write!(
                f,
                "exp distribution rate must be finite and positive, got {value}"
            ),
            Self::InvalidDistributionParam {
                distribution,
                value,
            } => write!(
                f,
                "{distribution} distribution parameter must be finite and non-zero, got {value}"
            ),
            Self::WeightCountMismatch {
                list,
                items,
                weights,
            } => write!(
                f,
                "{list} list has {items} entries but {weights} weights were given"
            ),
            Self::WeightSumOverflow { list } => {
                write!(f, "{list} weights sum past {}", u64::MAX)
            }
            Self::PowerLawZeroMin => {
                write!(f, "powerlaw distribution requires a min size above 0")
            }
            Self::ZeroFixedTtl => write!(f, "fixed ttl must be non-zero"),
            Self::EmptyTtlList => write!(f, "ttl mode 'list' requires a non-empty ttl list"),
            Self::NeverPolicyWithoutTtl => {
                write!(f, "policy 'never' requires a ttl mode other than 'off'")
            }
        }
    }
}

impl Error for ConfigError {}

// ── SizeConfig ─────────────────────────────────────────────────────

/// How block sizes are chosen each allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeConfig {
    /// Smallest size the trend or distribution produces. Default: 16.
    pub min: u64,
    /// Largest size the trend or distribution produces. Default: 1 MiB.
    pub max: u64,
    /// Tick-over-tick evolution of the size. Default: none.
    pub trend: Trend,
    /// Trend increment per allocation. Default: 1 KiB.
    pub step: u64,
    /// Half-width of the uniform jitter added to `step`. Default: 0.
    pub jitter: u64,
    /// Distribution sampled when `trend` is none. Default: uniform.
    pub distribution: Distribution,
    /// Rate (exponential) or exponent (power law). Default: 1.0.
    pub dist_param: f64,
    /// Fixed sizes to choose from. Empty = unused.
    pub list: ValueList,
    /// Weights for `list`. Empty = uniform.
    pub weights: ValueList,
    /// Whether `list` is sampled directly or snapped to. Default: exact.
    pub mode: SizeMode,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            min: 16,
            max: 1 << 20,
            trend: Trend::None,
            step: 1 << 10,
            jitter: 0,
            distribution: Distribution::Uniform,
            dist_param: 1.0,
            list: ValueList::new(),
            weights: ValueList::new(),
            mode: SizeMode::Exact,
        }
    }
}

impl SizeConfig {
    /// Check the size-related rules of [`WorkloadConfig::validate()`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::SizeBoundsInverted {
                min: self.min,
                max: self.max,
            });
        }
        if self.step == 0 {
            return Err(ConfigError::ZeroSizeStep);
        }
        if self.jitter > u64::MAX / 2 {
            return Err(ConfigError::JitterTooWide { value: self.jitter });
        }
        let param = self.dist_param;
        let param_ok = match self.distribution {
            Distribution::Uniform => true,
            Distribution::Exponential => param.is_finite() && param > 0.0,
            Distribution::PowerLaw => param.is_finite() && param != 0.0,
        };
        if !param_ok {
            return Err(ConfigError::InvalidDistributionParam {
                distribution: self.distribution,
                value: param,
            });
        }
        if self.distribution == Distribution::PowerLaw && self.min == 0 {
            return Err(ConfigError::PowerLawZeroMin);
        }
        check_weights("size", &self.list, &self.weights)
    }
}

// ── TtlConfig ──────────────────────────────────────────────────────

/// How block lifetimes are chosen each allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct TtlConfig {
    /// Lifetime source. Default: off (every block lives forever).
    pub mode: TtlMode,
    /// Lifetime in ticks for [`TtlMode::Fixed`]. Default: 10.
    pub fixed: u64,
    /// Lifetimes to choose from for [`TtlMode::List`].
    pub list: ValueList,
    /// Weights for `list`. Empty = uniform.
    pub weights: ValueList,
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            mode: TtlMode::Off,
            fixed: 10,
            list: ValueList::new(),
            weights: ValueList::new(),
        }
    }
}

impl TtlConfig {
    /// Check the TTL-related rules of [`WorkloadConfig::validate()`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            TtlMode::Fixed if self.fixed == 0 => return Err(ConfigError::ZeroFixedTtl),
            TtlMode::List if self.list.is_empty() => return Err(ConfigError::EmptyTtlList),
            _ => {}
        }
        check_weights("ttl", &self.list, &self.weights)
    }
}

fn check_weights(list: &'static str, items: &[u64], weights: &[u64]) -> Result<(), ConfigError> {
    if !weights.is_empty() && weights.len() != items.len() {
        return Err(ConfigError::WeightCountMismatch {
            list,
            items: items.len(),
            weights: weights.len(),
        });
    }
    if weights.iter().try_fold(0u64, |acc, &w| acc.checked_add(w)).is_none() {
        return Err(ConfigError::WeightSumOverflow { list });
    }
    Ok(())
}

// ── WorkloadConfig ─────────────────────────────────────────────────

/// Complete configuration for one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkloadConfig {
    /// Maximum number of live blocks. Default: 10 000.
    pub capacity: usize,
    /// Probability that a tick allocates when the pool has room.
    /// Default: 0.7.
    pub alloc_frequency: f64,
    /// PRNG seed. `0` = derive one from entropy. Default: 0.
    pub seed: u64,
    /// Which block an eviction removes. Default: LIFO.
    pub policy: EvictionPolicy,
    /// Block size selection.
    pub size: SizeConfig,
    /// Block lifetime selection.
    pub ttl: TtlConfig,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            alloc_frequency: 0.7,
            seed: 0,
            policy: EvictionPolicy::Lifo,
            size: SizeConfig::default(),
            ttl: TtlConfig::default(),
        }
    }
}

impl WorkloadConfig {
    /// Validate every cross-field rule.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let freq = self.alloc_frequency;
        if !freq.is_finite() || !(0.0..=1.0).contains(&freq) {
            return Err(ConfigError::AllocFrequencyOutOfRange { value: freq });
        }
        self.size.validate()?;
        self.ttl.validate()?;
        if self.policy == EvictionPolicy::Never && !self.ttl.mode.is_enabled() {
            return Err(ConfigError::NeverPolicyWithoutTtl);
        }
        Ok(())
    }
}
