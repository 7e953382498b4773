//! Payment Instruction Engine CLI
//!
//! Command-line interface for evaluating payment instructions from a file of
//! JSON request documents.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.jsonl > responses.jsonl
//! cargo run -- --strategy sync requests.jsonl > responses.jsonl
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 requests.jsonl
//! cargo run -- --today 2025-01-15 --pretty --log-level info requests.jsonl
//! ```
//!
//! Each request document is `{"accounts": [...], "instruction": "..."}`.
//! One response document per request is written to stdout, in input order.
//! Diagnostics go to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Streaming single-threaded evaluation
//! - **async**: Batched evaluation across tokio worker threads (default)
//!
//! # Exit Codes
//!
//! - 0: Success (including requests that failed business rules)
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use std::io::{stderr, stdout, BufWriter};
use std::process;

use payment_instruction_engine::cli;
use payment_instruction_engine::strategy;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn setup_logging(level: LevelFilter) {
    // stdout carries the response stream
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

fn main() {
    let args = cli::parse_args();
    setup_logging(args.log_level.into());

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), args.to_run_options(), config)
    };

    let mut output = BufWriter::new(stdout().lock());
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        error!(error = %e, "processing failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
