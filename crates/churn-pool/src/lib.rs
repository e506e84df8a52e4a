//! Block storage and the capacity-bounded pool for churn workloads.
//!
//! # Architecture
//!
//! ```text
//! Pool (capacity bound, eviction policies, TTL aging)
//! ├── BlockStore (ordered, doubly linked over an index arena)
//! │   ├── Slot[] (generation + optional Node { Block, prev, next })
//! │   └── free list (vacated slot indices, reused LIFO)
//! └── AllocTracker (byte and allocation counters)
//! ```
//!
//! Links between nodes are slot indices, never references: the store
//! owns every node and a [`NodeHandle`] is a generation-checked index,
//! so a handle to a removed block is detected instead of aliasing a
//! recycled slot.
//!
//! Iteration order is always the list order (front = oldest). Nothing
//! in this crate iterates a hash map, so identical operation sequences
//! produce identical stores.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod handle;
pub mod pool;
pub mod store;
pub mod tracker;

pub use block::Block;
pub use handle::NodeHandle;
pub use pool::Pool;
pub use store::{BlockStore, Extreme};
pub use tracker::AllocTracker;
