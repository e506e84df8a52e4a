//! Allocation counters.

/// Running byte and allocation counters for a [`Pool`](crate::Pool).
///
/// Owned by the pool and updated on every successful add and every
/// removal, whatever the cause (eviction, positional removal, expiry).
/// `total_bytes == current_bytes + freed_bytes` holds at all times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocTracker {
    /// Largest `current_bytes` ever observed.
    pub peak_bytes: u64,
    /// Cumulative bytes ever allocated.
    pub total_bytes: u64,
    /// Cumulative number of blocks ever added.
    pub total_allocations: u64,
    /// Bytes held by live blocks.
    pub current_bytes: u64,
    /// Number of live blocks.
    pub current_allocations: u64,
    /// Cumulative bytes released.
    pub freed_bytes: u64,
}

impl AllocTracker {
    /// A tracker with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a new block of `size` bytes.
    pub fn record_alloc(&mut self, size: u64) {
        self.total_allocations += 1;
        self.current_allocations += 1;
        self.total_bytes += size;
        self.current_bytes += size;
        self.peak_bytes = self.peak_bytes.max(self.current_bytes);
    }

    /// Account for a released block of `size` bytes.
    pub fn record_free(&mut self, size: u64) {
        self.current_allocations = self.current_allocations.saturating_sub(1);
        self.current_bytes = self.current_bytes.saturating_sub(size);
        self.freed_bytes += size;
    }
}
