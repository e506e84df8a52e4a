//! CSV output and the sampling schedule.
//!
//! [`CsvSink`] streams [`Sample`] rows to any `Write` sink; the header is
//! written on construction. [`Sampler`] decides which ticks get a row:
//! tick 0, every `interval` ticks, and the final tick of the run.

use std::io::{self, Write};

use churn_core::TickId;
use churn_pool::Pool;
use tracing::debug;

use crate::sample::Sample;

/// Column names, in row order.
pub const CSV_HEADER: &str = "tick,peak_size_allocated,total_size_allocated,\
total_number_of_allocations,current_size_allocated,current_number_of_allocations,\
freed_allocation_size,vm_peak_bytes,vm_size_bytes,vm_rss_bytes,vm_hwm_bytes,\
vm_data_bytes,vm_stk_bytes,vm_exe_bytes,vm_lib_bytes";

/// Writes samples as CSV rows.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and the binary can
/// use a `BufWriter<File>` or stdout.
pub struct CsvSink<W: Write> {
    out: W,
    rows: u64,
}

impl<W: Write> CsvSink<W> {
    /// Create a sink, immediately writing the header line.
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "{CSV_HEADER}")?;
        Ok(Self { out, rows: 0 })
    }

    /// Append one row.
    pub fn write_sample(&mut self, sample: &Sample) -> io::Result<()> {
        let t = &sample.tracker;
        write!(
            self.out,
            "{},{},{},{},{},{},{}",
            sample.tick,
            t.peak_bytes,
            t.total_bytes,
            t.total_allocations,
            t.current_bytes,
            t.current_allocations,
            t.freed_bytes
        )?;
        for value in sample.system.values() {
            write!(self.out, ",{value}")?;
        }
        writeln!(self.out)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far, excluding the header.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Samples a run on a fixed tick interval.
///
/// An interval of zero only samples tick 0 and the final tick.
pub struct Sampler<W: Write> {
    sink: CsvSink<W>,
    interval: u64,
    last: Option<TickId>,
}

impl<W: Write> Sampler<W> {
    /// Wrap `sink`, sampling every `interval` ticks.
    pub fn new(sink: CsvSink<W>, interval: u64) -> Self {
        Self {
            sink,
            interval,
            last: None,
        }
    }

    /// Whether `tick` is on the schedule.
    pub fn is_due(&self, tick: TickId) -> bool {
        tick.0 == 0 || (self.interval > 0 && tick.0 % self.interval == 0)
    }

    /// Write a row for `tick` if it is on the schedule. Returns whether a
    /// row was written.
    pub fn observe(&mut self, tick: TickId, pool: &Pool) -> io::Result<bool> {
        if !self.is_due(tick) {
            return Ok(false);
        }
        self.record(tick, pool)?;
        Ok(true)
    }

    /// Write the closing row for `tick` unless it was just sampled, then
    /// flush and return the sink.
    pub fn finish(mut self, tick: TickId, pool: &Pool) -> io::Result<CsvSink<W>> {
        if self.last != Some(tick) {
            self.record(tick, pool)?;
        }
        self.sink.flush()?;
        debug!(rows = self.sink.rows_written(), "telemetry finished");
        Ok(self.sink)
    }

    fn record(&mut self, tick: TickId, pool: &Pool) -> io::Result<()> {
        let sample = Sample::capture(tick, pool)?;
        self.sink.write_sample(&sample)?;
        self.last = Some(tick);
        Ok(())
    }
}
