//! Cumulative run counters.
//!
//! [`RunStats`] is folded from the [`TickReport`]s of a run and is what
//! the driver prints in its summary.

use crate::action::{TickOutcome, TickReport};

/// Event counts accumulated over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Blocks added.
    pub allocations: u64,
    /// Blocks removed by the eviction policy.
    pub evictions: u64,
    /// Blocks removed by TTL expiry.
    pub expirations: u64,
    /// Evictions that removed nothing.
    pub skipped_evictions: u64,
    /// Allocations dropped because the generated size was zero.
    pub rejected_allocations: u64,
}

impl RunStats {
    /// Fold one tick into the counters.
    pub fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.expirations += report.expired as u64;
        match report.outcome {
            TickOutcome::Allocated { .. } => self.allocations += 1,
            TickOutcome::Evicted { .. } => self.evictions += 1,
            TickOutcome::EvictSkipped => self.skipped_evictions += 1,
            TickOutcome::Rejected => self.rejected_allocations += 1,
        }
    }

    /// Blocks removed for any reason.
    pub fn removals(&self) -> u64 {
        self.evictions + self.expirations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use churn_core::Ttl;

    #[test]
    fn default_stats_are_zero() {
        let s = RunStats::default();
        assert_eq!(s.ticks, 0);
        assert_eq!(s.removals(), 0);
    }

    #[test]
    fn record_counts_each_outcome() {
        let mut s = RunStats::default();
        let reports = [
            TickOutcome::Allocated { size: 8, ttl: Ttl(3) },
            TickOutcome::Allocated { size: 4, ttl: Ttl::INFINITE },
            TickOutcome::Evicted { size: 8 },
            TickOutcome::EvictSkipped,
            TickOutcome::Rejected,
        ];
        for (i, outcome) in reports.into_iter().enumerate() {
            s.record(&TickReport { expired: i % 2, outcome });
        }
        assert_eq!(
            s,
            RunStats {
                ticks: 5,
                allocations: 2,
                evictions: 1,
                expirations: 2,
                skipped_evictions: 1,
                rejected_allocations: 1,
            }
        );
        assert_eq!(s.removals(), 3);
    }
}
