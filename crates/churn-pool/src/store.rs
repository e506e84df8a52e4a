//! Ordered block store: a doubly linked list over an index arena.
//!
//! [`BlockStore`] keeps blocks in insertion order (front = oldest,
//! back = newest) with O(1) access to both ends, O(1) removal through a
//! [`NodeHandle`], positional removal that walks from whichever end is
//! closer, and a linear min/max-by-size scan.
//!
//! Nodes live in a `Vec` of slots. `prev`/`next` links are slot indices
//! owned by the store; vacated slots go on a free list and are reused
//! last-in first-out. Each slot carries a generation that is bumped on
//! vacate, which is what makes handles checkable.

use std::iter::FusedIterator;

use churn_core::Ttl;
use tracing::{trace, warn};

use crate::block::Block;
use crate::handle::NodeHandle;

/// Which end of the size order [`BlockStore::find_extreme`] looks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extreme {
    /// Smallest block.
    Min,
    /// Largest block.
    Max,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

#[derive(Debug)]
struct Node {
    block: Block,
    prev: Option<u32>,
    next: Option<u32>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Ordered collection of [`Block`]s.
///
/// Invariants, checked by [`assert_invariants`](Self::assert_invariants):
/// - front is absent ⟺ back is absent ⟺ `len() == 0`;
/// - walking `next` from the front visits exactly `len()` nodes and ends
///   at the back, with every `prev` link mirroring it;
/// - every slot is either linked or on the free list, never both.
#[derive(Debug, Default)]
pub struct BlockStore {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    count: usize,
}

impl BlockStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with arena room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of live blocks.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the store holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total arena slots (live + vacant).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Vacant slots waiting for reuse.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    // ── Insertion ───────────────────────────────────────────────

    /// Create a block and link it at the front.
    ///
    /// A `size` of zero is rejected silently and returns `None`.
    pub fn push_front(&mut self, size: u64, ttl: Ttl) -> Option<NodeHandle> {
        self.link(size, ttl, End::Front)
    }

    /// Create a block and link it at the back.
    ///
    /// A `size` of zero is rejected silently and returns `None`.
    pub fn push_back(&mut self, size: u64, ttl: Ttl) -> Option<NodeHandle> {
        self.link(size, ttl, End::Back)
    }

    fn link(&mut self, size: u64, ttl: Ttl, end: End) -> Option<NodeHandle> {
        if size == 0 {
            trace!("rejecting zero-size block");
            return None;
        }
        debug_assert_eq!(self.head.is_none(), self.tail.is_none());

        let (prev, next) = match end {
            End::Front => (None, self.head),
            End::Back => (self.tail, None),
        };
        let idx = self.alloc_slot(Node {
            block: Block::new(size, ttl),
            prev,
            next,
        });

        match end {
            End::Front => {
                match self.head {
                    Some(h) => self.node_mut(h).prev = Some(idx),
                    None => self.tail = Some(idx),
                }
                self.head = Some(idx);
            }
            End::Back => {
                match self.tail {
                    Some(t) => self.node_mut(t).next = Some(idx),
                    None => self.head = Some(idx),
                }
                self.tail = Some(idx);
            }
        }
        self.count += 1;
        Some(self.handle_at(idx))
    }

    fn alloc_slot(&mut self, node: Node) -> u32 {
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            debug_assert!(slot.node.is_none(), "free-listed slot {idx} is occupied");
            slot.node = Some(node);
            idx
        } else {
            let idx = u32::try_from(self.slots.len()).expect("block store exceeds u32::MAX slots");
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            idx
        }
    }

    // ── Removal ─────────────────────────────────────────────────

    /// Remove and return the front (oldest) block.
    ///
    /// Returns `None` with a warning if the store is empty.
    pub fn pop_front(&mut self) -> Option<Block> {
        match self.head {
            Some(idx) => Some(self.unlink(idx)),
            None => {
                warn!("pop_front on empty block store");
                None
            }
        }
    }

    /// Remove and return the back (newest) block.
    ///
    /// Returns `None` with a warning if the store is empty.
    pub fn pop_back(&mut self) -> Option<Block> {
        match self.tail {
            Some(idx) => Some(self.unlink(idx)),
            None => {
                warn!("pop_back on empty block store");
                None
            }
        }
    }

    /// Remove and return the block at 0-based position `index` from the
    /// front.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Block {
        let idx = self.locate(index);
        self.unlink(idx)
    }

    /// Remove the node named by `handle` in O(1).
    ///
    /// An absent or stale handle is a no-op that logs a warning and
    /// returns `None`.
    pub fn remove_node(&mut self, handle: Option<NodeHandle>) -> Option<Block> {
        let Some(handle) = handle else {
            warn!("remove_node without a handle");
            return None;
        };
        match self.resolve(handle) {
            Some(idx) => Some(self.unlink(idx)),
            None => {
                warn!(%handle, "remove_node on stale handle");
                None
            }
        }
    }

    fn unlink(&mut self, idx: u32) -> Block {
        let slot = &mut self.slots[idx as usize];
        let node = slot.node.take().expect("unlink of vacant slot");
        slot.generation = slot.generation.wrapping_add(1);

        match node.prev {
            Some(p) => self.node_mut(p).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.node_mut(n).prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free_list.push(idx);
        self.count -= 1;
        debug_assert_eq!(self.count == 0, self.head.is_none());
        debug_assert_eq!(self.head.is_none(), self.tail.is_none());
        node.block
    }

    // ── Lookup ──────────────────────────────────────────────────

    /// Handle of the node at 0-based position `index` from the front.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn at(&self, index: usize) -> NodeHandle {
        self.handle_at(self.locate(index))
    }

    /// Slot index of position `index`, walking from the nearer end.
    fn locate(&self, index: usize) -> u32 {
        assert!(
            index < self.count,
            "index out of bounds: index {index} >= count {}",
            self.count
        );
        let from_back = self.count - 1 - index;
        if index <= from_back {
            let mut idx = self.head.expect("non-empty store has a head");
            for _ in 0..index {
                idx = self.node(idx).next.expect("list shorter than count");
            }
            idx
        } else {
            let mut idx = self.tail.expect("non-empty store has a tail");
            for _ in 0..from_back {
                idx = self.node(idx).prev.expect("list shorter than count");
            }
            idx
        }
    }

    /// Linear front-to-back scan for the largest or smallest block.
    ///
    /// The first node encountered wins ties. Returns `None` when empty.
    pub fn find_extreme(&self, extreme: Extreme) -> Option<NodeHandle> {
        let mut best: Option<(u32, u64)> = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx);
            let size = node.block.size();
            let better = match (best, extreme) {
                (None, _) => true,
                (Some((_, b)), Extreme::Max) => size > b,
                (Some((_, b)), Extreme::Min) => size < b,
            };
            if better {
                best = Some((idx, size));
            }
            cursor = node.next;
        }
        best.map(|(idx, _)| self.handle_at(idx))
    }

    /// First largest block, if any.
    pub fn find_max(&self) -> Option<NodeHandle> {
        self.find_extreme(Extreme::Max)
    }

    /// First smallest block, if any.
    pub fn find_min(&self) -> Option<NodeHandle> {
        self.find_extreme(Extreme::Min)
    }

    /// Handle of the front (oldest) node.
    pub fn front(&self) -> Option<NodeHandle> {
        self.head.map(|idx| self.handle_at(idx))
    }

    /// Handle of the back (newest) node.
    pub fn back(&self) -> Option<NodeHandle> {
        self.tail.map(|idx| self.handle_at(idx))
    }

    /// Handle of the node after `handle`, or `None` at the back or if
    /// `handle` is stale.
    pub fn next(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let idx = self.resolve(handle)?;
        self.node(idx).next.map(|n| self.handle_at(n))
    }

    /// Handle of the node before `handle`, or `None` at the front or if
    /// `handle` is stale.
    pub fn prev(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let idx = self.resolve(handle)?;
        self.node(idx).prev.map(|p| self.handle_at(p))
    }

    /// Whether `handle` still names a live node.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// The block behind `handle`, if it is still live.
    pub fn get(&self, handle: NodeHandle) -> Option<&Block> {
        let idx = self.resolve(handle)?;
        Some(&self.node(idx).block)
    }

    pub(crate) fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut Block> {
        let idx = self.resolve(handle)?;
        Some(&mut self.node_mut(idx).block)
    }

    /// Iterate blocks front to back.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            store: self,
            cursor: self.head,
            remaining: self.count,
        }
    }

    /// Walk the list and check every structural invariant.
    ///
    /// O(n). Intended for tests and debugging.
    ///
    /// # Panics
    ///
    /// Panics describing the first violated invariant.
    pub fn assert_invariants(&self) {
        assert_eq!(
            self.head.is_none(),
            self.tail.is_none(),
            "front/back presence disagree"
        );
        assert_eq!(
            self.head.is_none(),
            self.count == 0,
            "front presence disagrees with count {}",
            self.count
        );

        let mut seen = 0usize;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx);
            assert_eq!(node.prev, prev, "broken back-link at slot {idx}");
            prev = Some(idx);
            cursor = node.next;
            seen += 1;
            assert!(seen <= self.count, "list longer than count {}", self.count);
        }
        assert_eq!(prev, self.tail, "back does not terminate the list");
        assert_eq!(seen, self.count, "list length disagrees with count");

        let occupied = self.slots.iter().filter(|s| s.node.is_some()).count();
        assert_eq!(occupied, self.count, "occupied slots disagree with count");
        assert_eq!(
            self.slots.len() - occupied,
            self.free_list.len(),
            "vacant slots disagree with free list"
        );
    }

    // ── Internals ───────────────────────────────────────────────

    fn resolve(&self, handle: NodeHandle) -> Option<u32> {
        let slot = self.slots.get(handle.index as usize)?;
        (slot.generation == handle.generation && slot.node.is_some()).then_some(handle.index)
    }

    fn handle_at(&self, idx: u32) -> NodeHandle {
        NodeHandle::new(idx, self.slots[idx as usize].generation)
    }

    fn node(&self, idx: u32) -> &Node {
        self.slots[idx as usize]
            .node
            .as_ref()
            .expect("linked slot is occupied")
    }

    fn node_mut(&mut self, idx: u32) -> &mut Node {
        self.slots[idx as usize]
            .node
            .as_mut()
            .expect("linked slot is occupied")
    }
}

/// Front-to-back iterator over a [`BlockStore`].
pub struct Iter<'a> {
    store: &'a BlockStore,
    cursor: Option<u32>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<&'a Block> {
        let idx = self.cursor?;
        let node = self.store.node(idx);
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a BlockStore {
    type Item = &'a Block;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(store: &BlockStore) -> Vec<u64> {
        store.iter().map(Block::size).collect()
    }

    fn store_of(sizes: &[u64]) -> BlockStore {
        let mut store = BlockStore::new();
        for &s in sizes {
            store.push_back(s, Ttl::INFINITE).unwrap();
        }
        store
    }

    #[test]
    fn empty_store_has_no_ends() {
        let store = BlockStore::new();
        assert!(store.is_empty());
        assert!(store.front().is_none());
        assert!(store.back().is_none());
        store.assert_invariants();
    }

    #[test]
    fn push_back_and_front_order() {
        let mut store = BlockStore::new();
        store.push_back(2, Ttl::INFINITE);
        store.push_back(3, Ttl::INFINITE);
        store.push_front(1, Ttl::INFINITE);
        assert_eq!(sizes(&store), vec![1, 2, 3]);
        assert_eq!(store.len(), 3);
        store.assert_invariants();
    }

    #[test]
    fn zero_size_is_rejected_silently() {
        let mut store = BlockStore::new();
        assert!(store.push_back(0, Ttl::INFINITE).is_none());
        assert!(store.push_front(0, Ttl(3)).is_none());
        assert!(store.is_empty());
        assert_eq!(store.slot_count(), 0);
        store.assert_invariants();
    }

    #[test]
    fn pop_ends() {
        let mut store = store_of(&[1, 2, 3]);
        assert_eq!(store.pop_front().unwrap().size(), 1);
        assert_eq!(store.pop_back().unwrap().size(), 3);
        assert_eq!(sizes(&store), vec![2]);
        store.assert_invariants();
    }

    #[test]
    fn pop_on_empty_is_noop() {
        let mut store = BlockStore::new();
        assert!(store.pop_front().is_none());
        assert!(store.pop_back().is_none());
        store.assert_invariants();
    }

    #[test]
    fn removing_last_node_resets_both_ends() {
        let mut store = store_of(&[7]);
        store.pop_front();
        assert!(store.front().is_none());
        assert!(store.back().is_none());
        store.assert_invariants();

        let mut store = store_of(&[7]);
        store.remove_at(0);
        assert!(store.is_empty());
        store.assert_invariants();
    }

    #[test]
    fn remove_at_every_position() {
        let original = [10, 11, 12, 13, 14, 15, 16];
        for i in 0..original.len() {
            let mut store = store_of(&original);
            let removed = store.remove_at(i);
            assert_eq!(removed.size(), original[i]);
            let mut expected = original.to_vec();
            expected.remove(i);
            assert_eq!(sizes(&store), expected);
            store.assert_invariants();
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds: index 3 >= count 3")]
    fn remove_at_out_of_bounds_panics() {
        store_of(&[1, 2, 3]).remove_at(3);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn at_on_empty_panics() {
        let _ = BlockStore::new().at(0);
    }

    #[test]
    fn at_walks_from_either_end() {
        let store = store_of(&[5, 6, 7, 8, 9, 10]);
        for i in 0..store.len() {
            let h = store.at(i);
            assert_eq!(store.get(h).unwrap().size(), 5 + i as u64);
        }
    }

    #[test]
    fn remove_node_by_handle() {
        let mut store = BlockStore::new();
        store.push_back(1, Ttl::INFINITE);
        let mid = store.push_back(2, Ttl::INFINITE);
        store.push_back(3, Ttl::INFINITE);
        assert_eq!(store.remove_node(mid).unwrap().size(), 2);
        assert_eq!(sizes(&store), vec![1, 3]);
        store.assert_invariants();
    }

    #[test]
    fn remove_node_absent_or_stale_is_noop() {
        let mut store = store_of(&[1, 2]);
        assert!(store.remove_node(None).is_none());

        let h = store.front();
        assert!(store.remove_node(h).is_some());
        // Same handle again: slot generation moved on.
        assert!(store.remove_node(h).is_none());
        assert_eq!(store.len(), 1);
        store.assert_invariants();
    }

    #[test]
    fn reused_slot_invalidates_old_handle() {
        let mut store = BlockStore::new();
        let old = store.push_back(4, Ttl::INFINITE).unwrap();
        store.pop_back();
        let new = store.push_back(8, Ttl::INFINITE).unwrap();
        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(store.get(old).is_none());
        assert_eq!(store.get(new).unwrap().size(), 8);
        assert_eq!(store.slot_count(), 1);
        assert_eq!(store.free_count(), 0);
    }

    #[test]
    fn find_max_first_tie_wins() {
        let store = store_of(&[5, 9, 9, 3]);
        assert_eq!(store.find_max(), Some(store.at(1)));
    }

    #[test]
    fn find_min_first_tie_wins() {
        let store = store_of(&[4, 2, 8, 2]);
        assert_eq!(store.find_min(), Some(store.at(1)));
    }

    #[test]
    fn find_on_empty_is_none() {
        let store = BlockStore::new();
        assert!(store.find_extreme(Extreme::Max).is_none());
        assert!(store.find_extreme(Extreme::Min).is_none());
    }

    #[test]
    fn navigation() {
        let store = store_of(&[1, 2, 3]);
        let front = store.front().unwrap();
        let second = store.next(front).unwrap();
        assert_eq!(store.get(second).unwrap().size(), 2);
        assert_eq!(store.prev(second), Some(front));
        assert!(store.prev(front).is_none());
        assert!(store.next(store.back().unwrap()).is_none());
    }

    #[test]
    fn iter_is_exact_size() {
        let store = store_of(&[1, 2, 3, 4]);
        let it = store.iter();
        assert_eq!(it.len(), 4);
        assert_eq!((&store).into_iter().count(), 4);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::VecDeque;

        #[derive(Clone, Debug)]
        enum Op {
            PushFront(u64),
            PushBack(u64),
            PopFront,
            PopBack,
            RemoveAt(usize),
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u64..64).prop_map(Op::PushFront),
                (0u64..64).prop_map(Op::PushBack),
                Just(Op::PopFront),
                Just(Op::PopBack),
                (0usize..32).prop_map(Op::RemoveAt),
            ]
        }

        proptest! {
            #[test]
            fn matches_vecdeque_model(ops in proptest::collection::vec(arb_op(), 0..200)) {
                let mut store = BlockStore::new();
                let mut model: VecDeque<u64> = VecDeque::new();
                for op in ops {
                    match op {
                        Op::PushFront(s) => {
                            store.push_front(s, Ttl::INFINITE);
                            if s > 0 { model.push_front(s); }
                        }
                        Op::PushBack(s) => {
                            store.push_back(s, Ttl::INFINITE);
                            if s > 0 { model.push_back(s); }
                        }
                        Op::PopFront => {
                            prop_assert_eq!(store.pop_front().map(|b| b.size()), model.pop_front());
                        }
                        Op::PopBack => {
                            prop_assert_eq!(store.pop_back().map(|b| b.size()), model.pop_back());
                        }
                        Op::RemoveAt(i) => {
                            if !model.is_empty() {
                                let i = i % model.len();
                                prop_assert_eq!(Some(store.remove_at(i).size()), model.remove(i));
                            }
                        }
                    }
                    store.assert_invariants();
                    prop_assert_eq!(sizes(&store), model.iter().copied().collect::<Vec<_>>());
                }
            }

            #[test]
            fn extremes_match_linear_model(sizes_in in proptest::collection::vec(1u64..16, 1..40)) {
                let store = store_of(&sizes_in);
                let max = *sizes_in.iter().max().unwrap();
                let min = *sizes_in.iter().min().unwrap();
                let first_max = sizes_in.iter().position(|&s| s == max).unwrap();
                let first_min = sizes_in.iter().position(|&s| s == min).unwrap();
                prop_assert_eq!(store.find_max(), Some(store.at(first_max)));
                prop_assert_eq!(store.find_min(), Some(store.at(first_min)));
            }
        }
    }
}
