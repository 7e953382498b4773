use crate::core::validators::parse_execution_date;
use crate::strategy::{BatchConfig, RunOptions};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Evaluate payment instructions against caller-supplied accounts
#[derive(Parser, Debug)]
#[command(name = "payment-instruction-engine")]
#[command(about = "Evaluate payment instructions against caller-supplied accounts", long_about = None)]
pub struct CliArgs {
    /// Input file containing request documents
    #[arg(
        value_name = "INPUT",
        help = "Path to the input file (JSON documents, one per line or pretty-printed)"
    )]
    pub input_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent chunks (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of chunks evaluating concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Scheduling date override
    #[arg(
        long = "today",
        value_name = "YYYY-MM-DD",
        value_parser = parse_today,
        help = "Treat this UTC date as today when deciding whether an instruction is due"
    )]
    pub today: Option<NaiveDate>,

    /// Pretty-print response documents
    #[arg(long = "pretty", help = "Pretty-print response documents")]
    pub pretty: bool,

    /// Log verbosity on stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level for diagnostics written to stderr"
    )]
    pub log_level: LogLevel,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Log verbosity levels accepted by `--log-level`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    parse_execution_date(value).ok_or_else(|| format!("'{value}' is not a YYYY-MM-DD date"))
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values take their defaults; zero values fall back to the
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size()),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches()),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create the RunOptions shared by both strategies
    pub fn to_run_options(&self) -> RunOptions {
        RunOptions {
            pretty: self.pretty,
            today: self.today,
        }
    }
}
