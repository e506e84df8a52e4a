//! One telemetry row: pool counters plus process memory at a tick.

use std::io;

use churn_core::TickId;
use churn_pool::{AllocTracker, Pool};

use crate::proc_status::SystemMemoryStats;

/// A snapshot of allocation and process memory counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sample {
    /// Tick the sample was taken after.
    pub tick: TickId,
    /// Pool byte and allocation counters.
    pub tracker: AllocTracker,
    /// Process virtual-memory counters.
    pub system: SystemMemoryStats,
}

impl Sample {
    /// Capture `pool`'s counters and the live process memory stats.
    pub fn capture(tick: TickId, pool: &Pool) -> io::Result<Self> {
        Ok(Self {
            tick,
            tracker: *pool.tracker(),
            system: SystemMemoryStats::read()?,
        })
    }
}
