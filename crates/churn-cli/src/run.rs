//! The run loop: simulate, sample, report.

use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use anyhow::{Context, Result};
use churn_engine::{RunStats, Simulation};
use churn_telemetry::{CsvSink, Sampler};
use tracing::info;

use crate::args::{format_duration, format_size, Cli};
use crate::progress::{ProgressBar, ProgressMode};

/// Run the workload described by `cli` to completion.
pub fn execute(cli: &Cli) -> Result<RunStats> {
    let mut sim = Simulation::new(cli.workload_config()).context("invalid workload configuration")?;

    let mode = match cli.duration {
        Some(secs) => {
            info!(duration = %format_duration(secs), "time-bounded run");
            ProgressMode::Duration(Duration::from_secs(secs))
        }
        None => {
            info!(iterations = cli.iterations, "tick-bounded run");
            ProgressMode::Iterations(cli.iterations)
        }
    };
    info!(
        seed = sim.seed(),
        policy = %cli.policy,
        capacity = cli.capacity,
        "starting simulation"
    );

    let mut sampler = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output file {}", path.display()))?;
            let sink = CsvSink::new(BufWriter::new(file)).context("cannot write CSV header")?;
            Some(Sampler::new(sink, cli.snap_interval))
        }
        None => None,
    };

    if let Some(sampler) = sampler.as_mut() {
        sampler
            .observe(sim.current_tick(), sim.pool())
            .context("cannot write telemetry")?;
    }

    let mut progress = ProgressBar::new(mode, cli.display);
    while !progress.is_finished() {
        sim.step();
        progress.tick();
        if let Some(sampler) = sampler.as_mut() {
            sampler
                .observe(sim.current_tick(), sim.pool())
                .context("cannot write telemetry")?;
        }
    }
    progress.finish();

    if let Some(sampler) = sampler {
        let sink = sampler
            .finish(sim.current_tick(), sim.pool())
            .context("cannot write telemetry")?;
        info!(rows = sink.rows_written(), "telemetry written");
    }

    report(&sim, progress.elapsed());
    Ok(*sim.stats())
}

fn report(sim: &Simulation, elapsed: Duration) {
    let stats = sim.stats();
    let tracker = sim.pool().tracker();
    info!(
        seed = sim.seed(),
        ticks = stats.ticks,
        elapsed_ms = elapsed.as_millis() as u64,
        "run complete"
    );
    info!(
        allocations = stats.allocations,
        evictions = stats.evictions,
        expirations = stats.expirations,
        skipped_evictions = stats.skipped_evictions,
        rejected_allocations = stats.rejected_allocations,
        "tick outcomes"
    );
    info!(
        live_blocks = sim.pool().count(),
        current = %format_size(tracker.current_bytes),
        peak = %format_size(tracker.peak_bytes),
        total = %format_size(tracker.total_bytes),
        freed = %format_size(tracker.freed_bytes),
        "pool memory"
    );
}
