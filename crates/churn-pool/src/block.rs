//! A single simulated allocation.

use std::fmt;

use churn_core::Ttl;

/// One simulated allocation: a zero-filled payload plus its lifetime.
///
/// The payload is real memory of exactly `size` bytes so process-level
/// memory telemetry follows the simulated pattern. Size and the original
/// TTL are fixed at creation; only the remaining TTL changes, and only
/// through [`Pool::age_and_prune`](crate::Pool::age_and_prune).
pub struct Block {
    data: Box<[u8]>,
    ttl: Ttl,
    ttl_original: Ttl,
}

impl Block {
    /// Allocate a zero-filled block of `size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `size` does not fit in the address space.
    pub(crate) fn new(size: u64, ttl: Ttl) -> Self {
        let len = usize::try_from(size).expect("block size exceeds address space");
        Self {
            data: vec![0u8; len].into_boxed_slice(),
            ttl,
            ttl_original: ttl,
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Remaining lifetime.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Lifetime assigned at creation.
    pub fn ttl_original(&self) -> Ttl {
        self.ttl_original
    }

    /// Read-only view of the payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the block is still live (infinite or ticks remaining).
    pub fn is_alive(&self) -> bool {
        !self.ttl.is_expired()
    }

    /// Advance one aging tick and return the new remaining lifetime.
    pub(crate) fn age(&mut self) -> Ttl {
        self.ttl = self.ttl.decremented();
        self.ttl
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("size", &self.data.len())
            .field("ttl", &self.ttl)
            .field("ttl_original", &self.ttl_original)
            .finish()
    }
}
