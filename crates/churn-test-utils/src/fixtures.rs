//! Pool fixtures and inspection helpers.

use churn_core::Ttl;
use churn_pool::{Block, Pool};

/// Seeds used by cross-crate determinism tests.
pub const SEEDS: [u64; 4] = [1, 42, 0xdead_beef, u64::MAX];

/// A pool of `capacity` holding infinite-lifetime blocks of `sizes`,
/// front to back.
///
/// # Panics
///
/// Panics if `sizes` has more entries than `capacity` or contains a zero.
pub fn pool_of(capacity: usize, sizes: &[u64]) -> Pool {
    let mut pool = Pool::new(capacity);
    for &size in sizes {
        pool.add(size, Ttl::INFINITE)
            .expect("fixture sizes must be non-zero");
    }
    pool
}

/// A pool holding `(size, ttl)` blocks, front to back.
pub fn pool_with_ttls(capacity: usize, blocks: &[(u64, Ttl)]) -> Pool {
    let mut pool = Pool::new(capacity);
    for &(size, ttl) in blocks {
        pool.add(size, ttl).expect("fixture sizes must be non-zero");
    }
    pool
}

/// Block sizes in list order.
pub fn sizes(pool: &Pool) -> Vec<u64> {
    pool.iter().map(Block::size).collect()
}

/// Remaining lifetimes in list order.
pub fn ttls(pool: &Pool) -> Vec<Ttl> {
    pool.iter().map(Block::ttl).collect()
}
