//! Closed option sets: eviction policy, size distribution, size trend,
//! size-list mode and TTL mode.
//!
//! Every enum parses from (and displays as) the lower-case spelling used
//! on the command line. Dispatch on these is always an exhaustive
//! `match`, so an unknown variant cannot reach the engine.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseKindError;

/// Look up `s` among `names`, returning the matching entry of `all`.
fn parse_kind<T: Copy>(
    option: &'static str,
    s: &str,
    names: &'static [&'static str],
    all: &[T],
) -> Result<T, ParseKindError> {
    names
        .iter()
        .position(|&n| n == s)
        .map(|i| all[i])
        .ok_or_else(|| ParseKindError {
            option,
            value: s.to_string(),
            expected: names,
        })
}

// ── EvictionPolicy ──────────────────────────────────────────────

/// Rule choosing which block leaves the pool on an eviction event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvictionPolicy {
    /// Remove the most recently added block (back of the store).
    #[default]
    Lifo,
    /// Remove the oldest block (front of the store).
    Fifo,
    /// Remove a block at a uniformly random position.
    Random,
    /// Remove the largest block; the first one found wins ties.
    BigFirst,
    /// Remove the smallest block; the first one found wins ties.
    SmallFirst,
    /// Never evict. Blocks only leave through TTL expiry.
    Never,
}

impl EvictionPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Lifo,
        Self::Fifo,
        Self::Random,
        Self::BigFirst,
        Self::SmallFirst,
        Self::Never,
    ];

    /// Command-line spellings, index-aligned with [`ALL`](Self::ALL).
    pub const NAMES: &'static [&'static str] =
        &["lifo", "fifo", "random", "big-first", "small-first", "never"];

    /// The command-line spelling of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lifo => "lifo",
            Self::Fifo => "fifo",
            Self::Random => "random",
            Self::BigFirst => "big-first",
            Self::SmallFirst => "small-first",
            Self::Never => "never",
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_kind("policy", s, Self::NAMES, &Self::ALL)
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Distribution ────────────────────────────────────────────────

/// Continuous distribution used to sample a block size in `[min, max]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Uniform over `[min, max)`. The parameter is ignored.
    #[default]
    Uniform,
    /// Exponential with rate `lambda`, clamped into `[min, max]`.
    Exponential,
    /// Bounded power law with exponent `alpha`.
    PowerLaw,
}

impl Distribution {
    /// Every distribution, in declaration order.
    pub const ALL: [Self; 3] = [Self::Uniform, Self::Exponential, Self::PowerLaw];

    /// Command-line spellings, index-aligned with [`ALL`](Self::ALL).
    pub const NAMES: &'static [&'static str] = &["uniform", "exp", "powerlaw"];

    /// The command-line spelling of this distribution.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Exponential => "exp",
            Self::PowerLaw => "powerlaw",
        }
    }

    /// Whether the distribution parameter must be non-zero.
    pub fn needs_param(self) -> bool {
        !matches!(self, Self::Uniform)
    }
}

impl FromStr for Distribution {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_kind("distribution", s, Self::NAMES, &Self::ALL)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Trend ───────────────────────────────────────────────────────

/// How the requested block size evolves tick over tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Trend {
    /// No cursor: every size is a fresh distribution sample.
    #[default]
    None,
    /// Start at `min`, step upwards, clamp at `max`.
    Grow,
    /// Start at `max`, step downwards, clamp at `min`.
    Shrink,
    /// Start at `min`, step upwards, wrap back to `min` past `max`.
    Saw,
}

impl Trend {
    /// Every trend, in declaration order.
    pub const ALL: [Self; 4] = [Self::None, Self::Grow, Self::Shrink, Self::Saw];

    /// Command-line spellings, index-aligned with [`ALL`](Self::ALL).
    pub const NAMES: &'static [&'static str] = &["none", "grow", "shrink", "saw"];

    /// The command-line spelling of this trend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grow => "grow",
            Self::Shrink => "shrink",
            Self::Saw => "saw",
        }
    }
}

impl FromStr for Trend {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_kind("trend", s, Self::NAMES, &Self::ALL)
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SizeMode ────────────────────────────────────────────────────

/// How a configured fixed size list is consulted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SizeMode {
    /// Pick a list entry by weighted choice; trend is ignored.
    #[default]
    Exact,
    /// Snap the trend/distribution value to the closest list entry.
    Nearest,
}

impl SizeMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 2] = [Self::Exact, Self::Nearest];

    /// Command-line spellings, index-aligned with [`ALL`](Self::ALL).
    pub const NAMES: &'static [&'static str] = &["exact", "nearest"];

    /// The command-line spelling of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Nearest => "nearest",
        }
    }
}

impl FromStr for SizeMode {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_kind("size-mode", s, Self::NAMES, &Self::ALL)
    }
}

impl fmt::Display for SizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TtlMode ─────────────────────────────────────────────────────

/// How block lifetimes are assigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TtlMode {
    /// Blocks live forever; no aging pass runs.
    #[default]
    Off,
    /// Every block gets the same fixed lifetime.
    Fixed,
    /// Lifetime is drawn from a (weighted) list.
    List,
}

impl TtlMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 3] = [Self::Off, Self::Fixed, Self::List];

    /// Command-line spellings, index-aligned with [`ALL`](Self::ALL).
    pub const NAMES: &'static [&'static str] = &["off", "fixed", "list"];

    /// The command-line spelling of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Fixed => "fixed",
            Self::List => "list",
        }
    }

    /// Whether blocks can expire under this mode.
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl FromStr for TtlMode {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_kind("ttl-mode", s, Self::NAMES, &Self::ALL)
    }
}

impl fmt::Display for TtlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
