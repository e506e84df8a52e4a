//! `churn`: synthetic allocation/eviction workload generator.
//!
//! Parses the command line, installs a stderr log subscriber, and runs
//! one [`Simulation`](churn_engine::Simulation) for a tick or wall-clock
//! budget, optionally writing memory telemetry as CSV.

mod args;
mod progress;
mod run;

use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use crate::args::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run::execute(&cli)?;
    Ok(())
}
