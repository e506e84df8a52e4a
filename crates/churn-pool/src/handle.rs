//! Node handles.
//!
//! A [`NodeHandle`] names one occupied slot of a
//! [`BlockStore`](crate::BlockStore). It is generation-scoped: every time
//! a slot is vacated its generation is bumped, so a handle kept past the
//! removal of its block no longer matches and resolves to nothing.

use std::fmt;

/// Generation-checked reference to a node in a [`BlockStore`](crate::BlockStore).
///
/// Handles are plain values; holding one does not keep the block alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct NodeHandle {
    /// Slot index within the store's arena.
    pub(crate) index: u32,
    /// Slot generation at the time the node was linked.
    pub(crate) generation: u32,
}

impl NodeHandle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot index. Stable for the node's lifetime; reused afterwards.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation this handle was issued for.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle(slot={}, gen={})", self.index, self.generation)
    }
}
