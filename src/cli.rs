//! CLI argument parsing for simtrace

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "simtrace")]
#[command(version)]
#[command(
    about = "Align, difference and summarize network simulation trace logs",
    long_about = None
)]
pub struct Cli {
    /// Output format
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Write one file per figure into this directory instead of stdout
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Time window given on the command line, in seconds
#[derive(Args, Debug, Clone, Copy)]
pub struct WindowArgs {
    /// Window start (s)
    #[arg(long = "start", value_name = "SECONDS", allow_negative_numbers = true)]
    pub start: f64,

    /// Window end (s)
    #[arg(long = "end", value_name = "SECONDS", allow_negative_numbers = true)]
    pub end: f64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Difference a cumulative counter between two logs (treatment - baseline)
    Diff {
        /// Baseline condition log
        #[arg(value_name = "BASELINE")]
        baseline: PathBuf,

        /// Treatment condition log
        #[arg(value_name = "TREATMENT")]
        treatment: PathBuf,

        #[command(flatten)]
        window: WindowArgs,

        /// Counter field to difference
        #[arg(long = "field", default_value = "totalTxByte")]
        field: String,

        /// Use 1024-byte kilobytes instead of 1000
        #[arg(long = "binary")]
        binary: bool,

        /// Series label
        #[arg(long = "label")]
        label: Option<String>,
    },

    /// Throughput and queue length of one sender log
    Workload {
        /// Sender log with `throughput` and `qlen` fields
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// RTT against queue length for one source port
    Scatter {
        /// Packet log with `RTT`, `qlen(0)` and `sport` fields
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Source port to keep
        #[arg(long = "sport", default_value = "10000")]
        sport: u16,
    },

    /// Empirical CDF of buffer occupancy, one series per log
    Cdf {
        /// Buffer logs (`switch N qlen BYTES time T`)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Zero-based token index of the queue length
        #[arg(long = "column", default_value = "3")]
        column: usize,

        /// Lines with fewer tokens are ignored
        #[arg(long = "min-tokens", default_value = "6")]
        min_tokens: usize,

        /// Use 1000-byte kilobytes instead of 1024
        #[arg(long = "decimal")]
        decimal: bool,
    },

    /// Run every job of an experiment file
    Run {
        /// Experiment TOML (defaults to the built-in PowerTCP jobs)
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory relative log paths are resolved against
        #[arg(long = "base-dir", value_name = "DIR", default_value = ".")]
        base_dir: PathBuf,
    },
}
