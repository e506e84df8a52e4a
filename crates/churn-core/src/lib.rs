//! Core types for the churn allocation-workload simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: tick and TTL
//! types, the closed set of policy/mode enums, their parse errors, and
//! the seedable [`Prng`] that every stochastic decision draws from.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod kind;
pub mod rng;

pub use error::ParseKindError;
pub use id::{TickId, Ttl};
pub use kind::{Distribution, EvictionPolicy, SizeMode, Trend, TtlMode};
pub use rng::Prng;
