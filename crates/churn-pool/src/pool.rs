//! Capacity-bounded pool and the eviction-policy dispatch.

use churn_core::{EvictionPolicy, Prng, Ttl};
use tracing::{trace, warn};

use crate::block::Block;
use crate::handle::NodeHandle;
use crate::store::{BlockStore, Iter};
use crate::tracker::AllocTracker;

/// A [`BlockStore`] bounded by a fixed capacity, with byte accounting.
///
/// New blocks always go to the back; the front holds the oldest block.
/// `count() <= capacity()` holds at every observable point: an
/// [`add`](Self::add) that would break it is a caller bug and panics.
#[derive(Debug)]
pub struct Pool {
    store: BlockStore,
    capacity: usize,
    tracker: AllocTracker,
}

impl Pool {
    /// Create an empty pool that holds at most `capacity` blocks.
    pub fn new(capacity: usize) -> Self {
        Self {
            store: BlockStore::with_capacity(capacity),
            capacity,
            tracker: AllocTracker::new(),
        }
    }

    /// Number of live blocks.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Maximum number of live blocks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the pool holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether another [`add`](Self::add) would exceed capacity.
    pub fn is_full(&self) -> bool {
        self.store.len() >= self.capacity
    }

    /// Byte and allocation counters.
    pub fn tracker(&self) -> &AllocTracker {
        &self.tracker
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    /// Iterate blocks oldest first.
    pub fn iter(&self) -> Iter<'_> {
        self.store.iter()
    }

    /// Append a block of `size` bytes with lifetime `ttl` at the back.
    ///
    /// A zero `size` is ignored and returns `None`.
    ///
    /// # Panics
    ///
    /// Panics if the pool is already at capacity. Callers check
    /// [`is_full`](Self::is_full) first.
    pub fn add(&mut self, size: u64, ttl: Ttl) -> Option<NodeHandle> {
        assert!(
            self.store.len() < self.capacity,
            "pool capacity exceeded: count {} at capacity {}",
            self.store.len(),
            self.capacity
        );
        let handle = self.store.push_back(size, ttl)?;
        self.tracker.record_alloc(size);
        Some(handle)
    }

    /// Remove one block according to `policy` and return it.
    ///
    /// [`EvictionPolicy::Never`] is a no-op. It is only meaningful when
    /// TTL expiry is enabled: without it nothing ever leaves the pool, so
    /// the caller must guarantee a TTL mode other than off whenever
    /// `Never` is selected. Evicting from an empty pool logs a warning
    /// and returns `None`.
    ///
    /// `rng` is drawn from only by [`EvictionPolicy::Random`].
    pub fn evict(&mut self, policy: EvictionPolicy, rng: &mut Prng) -> Option<Block> {
        if policy == EvictionPolicy::Never {
            return None;
        }
        if self.store.is_empty() {
            warn!(policy = %policy, "evict on empty pool");
            return None;
        }

        let block = match policy {
            EvictionPolicy::Lifo => self.store.pop_back(),
            EvictionPolicy::Fifo => self.store.pop_front(),
            EvictionPolicy::Random => {
                let index = rng.index(self.store.len());
                Some(self.store.remove_at(index))
            }
            EvictionPolicy::BigFirst => {
                let handle = self.store.find_max();
                self.store.remove_node(handle)
            }
            EvictionPolicy::SmallFirst => {
                let handle = self.store.find_min();
                self.store.remove_node(handle)
            }
            EvictionPolicy::Never => None,
        }?;

        trace!(policy = %policy, size = block.size(), "evicted block");
        self.tracker.record_free(block.size());
        Some(block)
    }

    /// Remove the block at 0-based position `index` from the front.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn remove_at(&mut self, index: usize) -> Block {
        let block = self.store.remove_at(index);
        self.tracker.record_free(block.size());
        block
    }

    /// Remove the block behind `handle`. Stale handles are a no-op with a
    /// warning.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<Block> {
        let block = self.store.remove_node(Some(handle))?;
        self.tracker.record_free(block.size());
        Some(block)
    }

    /// One aging pass, front to back: every finite lifetime loses a tick
    /// and blocks that reach zero are removed. Infinite blocks are left
    /// untouched. Returns the number of blocks removed.
    ///
    /// Call once per tick.
    pub fn age_and_prune(&mut self) -> usize {
        let mut expired = 0;
        let mut cursor = self.store.front();
        while let Some(handle) = cursor {
            cursor = self.store.next(handle);
            let block = self
                .store
                .get_mut(handle)
                .expect("cursor handle is live");
            if block.age().is_expired() {
                let block = self
                    .store
                    .remove_node(Some(handle))
                    .expect("expired handle is live");
                self.tracker.record_free(block.size());
                expired += 1;
            }
        }
        if expired > 0 {
            trace!(expired, remaining = self.store.len(), "pruned expired blocks");
        }
        expired
    }
}
