//! Tick counter and the signed [`Ttl`] lifetime type.

use std::fmt;

/// Monotonically increasing tick counter.
///
/// Incremented each time the simulation performs one allocate-or-evict
/// decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Remaining lifetime of a block, in aging ticks.
///
/// The sign carries the meaning:
/// - `< 0`: infinite lifetime, never expires.
/// - `0`: expired, pending removal.
/// - `> 0`: number of aging ticks before expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ttl(pub i64);

impl Ttl {
    /// Sentinel for a block that never expires.
    pub const INFINITE: Ttl = Ttl(-1);

    /// A finite lifetime of `n` aging ticks.
    ///
    /// Values above `i64::MAX` saturate.
    pub fn ticks(n: u64) -> Self {
        Self(i64::try_from(n).unwrap_or(i64::MAX))
    }

    /// Whether this lifetime never runs out.
    pub fn is_infinite(self) -> bool {
        self.0 < 0
    }

    /// Whether the lifetime has run out.
    pub fn is_expired(self) -> bool {
        self.0 == 0
    }

    /// One aging step: finite positive lifetimes lose a tick, everything
    /// else is left as is.
    #[must_use]
    pub fn decremented(self) -> Self {
        if self.0 > 0 {
            Self(self.0 - 1)
        } else {
            self
        }
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Self::INFINITE
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            write!(f, "inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
