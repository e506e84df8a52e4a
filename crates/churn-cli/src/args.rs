//! Command-line options and their value parsers.

use std::path::PathBuf;

use churn_core::{Distribution, EvictionPolicy, SizeMode, Trend, TtlMode};
use churn_engine::{SizeConfig, TtlConfig, ValueList, WorkloadConfig};
use clap::Parser;
use tracing::{warn, Level};

const SIZE_UNITS: &str = "B, KB, KiB, MB, MiB, GB, GiB";

/// Synthetic allocation/eviction workload generator.
///
/// <BYTES> accepts the units B, KB, KiB, MB, MiB, GB, GiB (e.g. 10KB).
/// <SECS> accepts the units s, min (e.g. 1min).
/// Lists are comma-separated (e.g. 1,2,3,4).
#[derive(Debug, Parser)]
#[command(name = "churn")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Synthetic allocation/eviction workload generator", long_about = None)]
pub struct Cli {
    /// Eviction policy: lifo, fifo, random, big-first, small-first, never
    #[arg(short, long, default_value = "lifo")]
    pub policy: EvictionPolicy,

    /// Number of ticks to run
    #[arg(short = 'n', long, default_value_t = 10_000)]
    pub iterations: u64,

    /// Run for a wall-clock duration instead of a tick count
    #[arg(short, long, value_name = "SECS", value_parser = parse_duration, conflicts_with = "iterations")]
    pub duration: Option<u64>,

    /// Probability of allocating on a tick when the pool has room
    #[arg(short = 'f', long, default_value_t = 0.7)]
    pub alloc_freq: f64,

    /// PRNG seed (0 = random)
    #[arg(short, long, default_value_t = 0)]
    pub seed: u64,

    /// Maximum number of live blocks
    #[arg(short, long, default_value_t = 10_000)]
    pub capacity: usize,

    /// Smallest generated block size
    #[arg(short = 'a', long, value_name = "BYTES", value_parser = parse_size, default_value = "16")]
    pub min_size: u64,

    /// Largest generated block size
    #[arg(short = 'A', long, value_name = "BYTES", value_parser = parse_size, default_value = "1MiB")]
    pub max_size: u64,

    /// Size trend: none, grow, shrink, saw
    #[arg(long, default_value = "none")]
    pub size_trend: Trend,

    /// Trend increment per allocation
    #[arg(long, value_name = "BYTES", value_parser = parse_size, default_value = "1KiB")]
    pub size_step: u64,

    /// Uniform +- jitter added to the trend increment
    #[arg(long, value_name = "BYTES", value_parser = parse_size, default_value = "0")]
    pub trend_jitter: u64,

    /// Fixed block sizes to choose from
    #[arg(long, value_name = "BYTES,...", value_parser = parse_size_list)]
    pub size_list: Option<ValueList>,

    /// How the size list is used: exact, nearest
    #[arg(long, default_value = "exact")]
    pub size_mode: SizeMode,

    /// Weights for the size list
    #[arg(long, value_name = "N,...", value_parser = parse_int_list)]
    pub size_weights: Option<ValueList>,

    /// Size distribution when no trend is set: uniform, exp, powerlaw
    #[arg(short = 'P', long, default_value = "uniform")]
    pub distribution: Distribution,

    /// Rate (exp) or exponent (powerlaw) of the size distribution
    #[arg(short = 'r', long, default_value_t = 1.0)]
    pub dist_param: f64,

    /// Block lifetime mode: off, fixed, list
    #[arg(long, default_value = "off")]
    pub ttl_mode: TtlMode,

    /// Lifetime in ticks for ttl mode fixed
    #[arg(long, default_value_t = 10)]
    pub ttl_fixed: u64,

    /// Lifetimes in ticks for ttl mode list
    #[arg(long, value_name = "N,...", value_parser = parse_int_list)]
    pub ttl_list: Option<ValueList>,

    /// Weights for the ttl list
    #[arg(long, value_name = "N,...", value_parser = parse_int_list)]
    pub ttl_weights: Option<ValueList>,

    /// Ticks between telemetry rows (0 = first and last tick only)
    #[arg(short = 'i', long, default_value_t = 1_000)]
    pub snap_interval: u64,

    /// CSV telemetry output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Draw a progress bar on stderr
    #[arg(long)]
    pub display: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Tracing level for `--log-level`, defaulting to warn on unknown
    /// spellings.
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    }

    /// Assemble the workload configuration. Validation is left to the
    /// engine.
    ///
    /// A max size below the min size is raised to the min size.
    pub fn workload_config(&self) -> WorkloadConfig {
        let mut max = self.max_size;
        if self.min_size > max {
            warn!(
                min = %format_size(self.min_size),
                max = %format_size(max),
                "max size below min size, raising max to min"
            );
            max = self.min_size;
        }

        WorkloadConfig {
            capacity: self.capacity,
            alloc_frequency: self.alloc_freq,
            seed: self.seed,
            policy: self.policy,
            size: SizeConfig {
                min: self.min_size,
                max,
                trend: self.size_trend,
                step: self.size_step,
                jitter: self.trend_jitter,
                distribution: self.distribution,
                dist_param: self.dist_param,
                list: self.size_list.clone().unwrap_or_default(),
                weights: self.size_weights.clone().unwrap_or_default(),
                mode: self.size_mode,
            },
            ttl: TtlConfig {
                mode: self.ttl_mode,
                fixed: self.ttl_fixed,
                list: self.ttl_list.clone().unwrap_or_default(),
                weights: self.ttl_weights.clone().unwrap_or_default(),
            },
        }
    }
}

/// Split `s` into its leading digits and the unit suffix.
fn split_unit(s: &str) -> (&str, &str) {
    let at = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(at)
}

/// Parse a byte count with an optional unit suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let (digits, unit) = split_unit(s);
    let value: u64 = digits
        .parse()
        .map_err(|e| format!("invalid size `{s}`: {e}"))?;
    let scale: u64 = match unit {
        "" | "B" => 1,
        "KB" => 1_000,
        "KiB" => 1 << 10,
        "MB" => 1_000_000,
        "MiB" => 1 << 20,
        "GB" => 1_000_000_000,
        "GiB" => 1 << 30,
        other => {
            return Err(format!(
                "invalid size unit `{other}` (supported units {SIZE_UNITS})"
            ))
        }
    };
    value
        .checked_mul(scale)
        .ok_or_else(|| format!("size `{s}` overflows 64 bits"))
}

/// Parse a duration in seconds with an optional `s` or `min` suffix.
pub fn parse_duration(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let (digits, unit) = split_unit(s);
    let value: u64 = digits
        .parse()
        .map_err(|e| format!("invalid duration `{s}`: {e}"))?;
    match unit {
        "" | "s" => Ok(value),
        "min" => value
            .checked_mul(60)
            .ok_or_else(|| format!("duration `{s}` overflows 64 bits")),
        other => Err(format!(
            "invalid duration unit `{other}` (supported units s, min)"
        )),
    }
}

fn parse_list(s: &str, item: fn(&str) -> Result<u64, String>) -> Result<ValueList, String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(item)
        .collect()
}

/// Parse a comma-separated list of sizes.
pub fn parse_size_list(s: &str) -> Result<ValueList, String> {
    parse_list(s, parse_size)
}

/// Parse a comma-separated list of plain integers.
pub fn parse_int_list(s: &str) -> Result<ValueList, String> {
    parse_list(s, |part| {
        part.parse::<u64>()
            .map_err(|e| format!("invalid integer `{part}`: {e}"))
    })
}

/// Human-readable byte count using binary units.
pub fn format_size(size: u64) -> String {
    const KIB: u64 = 1 << 10;
    const MIB: u64 = 1 << 20;
    const GIB: u64 = 1 << 30;
    const TIB: u64 = 1 << 40;
    match size {
        s if s < KIB => format!("{s}B"),
        s if s < MIB => format!("{:.1}KiB", s as f64 / KIB as f64),
        s if s < GIB => format!("{:.1}MiB", s as f64 / MIB as f64),
        s if s < TIB => format!("{:.1}GiB", s as f64 / GIB as f64),
        s => format!("{s}B"),
    }
}

/// Human-readable duration in seconds.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else if secs % 60 == 0 {
        format!("{}min", secs / 60)
    } else {
        format!("{}min {}s", secs / 60, secs % 60)
    }
}
