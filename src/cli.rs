//! CLI argument parsing for perfmodel

use crate::params::ModelParameters;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the model report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// Per-rank CSV for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "perfmodel")]
#[command(version)]
#[command(about = "Predict multi-rank runtime from per-rank performance counters", long_about = None)]
pub struct Cli {
    /// Header-less counter table, one row per rank
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// TOML calibration profile (absent keys keep reference values)
    #[arg(long = "params", value_name = "TOML")]
    pub params: Option<PathBuf>,

    /// Processor clock frequency in Hz
    #[arg(long = "clock-freq", value_name = "HZ")]
    pub clock_freq: Option<f64>,

    /// Instructions retired per cycle
    #[arg(long = "ipc")]
    pub ipc: Option<f64>,

    /// Seconds per cache hit
    #[arg(long = "cache-hit-latency", value_name = "SECS")]
    pub cache_hit_latency: Option<f64>,

    /// Seconds per memory read
    #[arg(long = "mem-read-latency", value_name = "SECS")]
    pub mem_read_latency: Option<f64>,

    /// Seconds per memory write
    #[arg(long = "mem-write-latency", value_name = "SECS")]
    pub mem_write_latency: Option<f64>,

    /// Seconds per communication send
    #[arg(long = "send-latency", value_name = "SECS")]
    pub send_latency: Option<f64>,

    /// Fraction of send latency hidden by overlap, in [0, 1]
    #[arg(long = "send-overlap", value_name = "FRACTION")]
    pub send_overlap: Option<f64>,

    /// Constant seconds added to every rank's total
    #[arg(long = "fixed-overhead", value_name = "SECS")]
    pub fixed_overhead: Option<f64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print the sorted counter table before the summary
    #[arg(long = "show-records")]
    pub show_records: bool,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a base calibration
    pub fn apply_overrides(&self, base: ModelParameters) -> ModelParameters {
        ModelParameters {
            clock_freq: self.clock_freq.unwrap_or(base.clock_freq),
            ipc: self.ipc.unwrap_or(base.ipc),
            cache_hit_latency: self.cache_hit_latency.unwrap_or(base.cache_hit_latency),
            mem_read_latency: self.mem_read_latency.unwrap_or(base.mem_read_latency),
            mem_write_latency: self.mem_write_latency.unwrap_or(base.mem_write_latency),
            send_latency: self.send_latency.unwrap_or(base.send_latency),
            send_overlap: self.send_overlap.unwrap_or(base.send_overlap),
            fixed_overhead: self.fixed_overhead.unwrap_or(base.fixed_overhead),
        }
    }
}
