//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. Requests are read in batches; each batch is split
//! into chunks evaluated in parallel on tokio tasks.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── RunOptions (pretty, today)
//!     ├── AsyncReader (batch request reading)
//!     └── Arc<InstructionEngine> (shared read-only across tasks)
//! ```
//!
//! # Ordering
//!
//! Evaluations are independent, so any chunk may finish first. Results are
//! joined back in chunk order and batches are written one after another,
//! which keeps the output in input order.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, warn};

use crate::core::InstructionEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::json_format::{write_result, RequestRecord};
use crate::strategy::{evaluate_record, ProcessingStrategy, RunOptions, RunSummary};
use crate::types::{EngineError, TransactionResult};

/// Configuration for batch processing
///
/// Controls how many requests are read per batch and how many chunks of a
/// batch are evaluated concurrently. Both values are always at least 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    batch_size: usize,
    max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }

    /// Number of requests per batch
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Maximum number of chunks evaluating concurrently (also the worker thread count)
    pub fn max_concurrent_batches(&self) -> usize {
        self.max_concurrent_batches
    }
}

/// Asynchronous batch processing strategy
///
/// # Configuration
///
/// - `batch_size`: Number of requests per batch (default: 1000)
/// - `max_concurrent_batches`: Number of worker threads and chunks per batch
///   (default: CPU cores)
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    options: RunOptions,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `config` - BatchConfig with batch_size and max_concurrent_batches
    /// * `options` - Output and clock options
    pub fn new(config: BatchConfig, options: RunOptions) -> Self {
        Self { config, options }
    }

    /// Evaluate one batch, returning results in input order
    ///
    /// A chunk whose task fails is answered with one internal-error result
    /// per request; the failure detail goes to the log. A read failure
    /// inside the batch is returned as a fatal error.
    async fn evaluate_batch(
        &self,
        engine: &Arc<InstructionEngine>,
        batch: Vec<RequestRecord>,
    ) -> Result<Vec<TransactionResult>, EngineError> {
        let chunk_size = batch
            .len()
            .div_ceil(self.config.max_concurrent_batches)
            .max(1);

        let (sizes, tasks): (Vec<usize>, Vec<_>) = split_into_chunks(batch, chunk_size)
            .into_iter()
            .map(|chunk| {
                let engine = Arc::clone(engine);
                let size = chunk.len();
                let task = tokio::spawn(async move {
                    chunk
                        .into_iter()
                        .map(|record| evaluate_record(&engine, record))
                        .collect::<Result<Vec<_>, _>>()
                });
                (size, task)
            })
            .unzip();

        let mut results = Vec::with_capacity(sizes.iter().sum());
        for (size, outcome) in sizes.into_iter().zip(join_all(tasks).await) {
            match outcome {
                Ok(chunk_results) => results.extend(chunk_results?),
                Err(e) => {
                    error!(error = %e, requests = size, "evaluation task failed");
                    results.extend(
                        std::iter::repeat_with(TransactionResult::internal_error).take(size),
                    );
                }
            }
        }

        Ok(results)
    }
}

/// Split `items` into owned chunks of at most `chunk_size`, preserving order
fn split_into_chunks<T>(items: Vec<T>, chunk_size: usize) -> Vec<Vec<T>> {
    let mut chunks = Vec::new();
    let mut items = items.into_iter();

    loop {
        let chunk: Vec<T> = items.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }

    chunks
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process requests from input file and write responses to output
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads the input through AsyncReader
    /// 3. Evaluates each batch in parallel chunks
    /// 4. Writes the batch's responses in input order before reading the next
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned immediately.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(EngineError::runtime)?;

        let engine = Arc::new(self.options.engine());

        runtime.block_on(async {
            let mut reader = AsyncReader::open(input_path).await?;
            let mut summary = RunSummary::default();

            loop {
                let batch = reader.read_batch(self.config.batch_size);
                if batch.is_empty() {
                    break;
                }

                for result in self.evaluate_batch(&engine, batch).await? {
                    summary.record(&result);
                    write_result(output, &result, self.options.pretty)?;
                }
            }

            output.flush()?;
            summary.log("async");
            Ok(())
        })
    }
}
