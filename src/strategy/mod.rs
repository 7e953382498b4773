//! Processing strategy module for request processing
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing request decoding, evaluation, and response output. This allows
//! different implementations (synchronous, asynchronous batch) to be selected
//! at runtime.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::cli::StrategyType;
use crate::core::{FixedClock, InstructionEngine};
use crate::io::RequestRecord;
use crate::types::{EngineError, RequestError, TransactionResult, TransactionStatus};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete request processing pipelines
///
/// Each strategy reads request documents from a file, evaluates them through
/// an `InstructionEngine`, and writes one response document per request, in
/// input order.
pub trait ProcessingStrategy: Send + Sync {
    /// Process requests from input file and write responses to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input file containing request documents
    /// * `output` - Writer receiving the response documents
    ///
    /// # Returns
    ///
    /// * `Ok(())` if every request produced a response
    /// * `Err(EngineError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - The input cannot be read partway through
    /// - Output cannot be written
    /// - The async runtime cannot be created
    ///
    /// Invalid request documents and business-rule failures are not errors:
    /// they yield a failed response and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), EngineError>;
}

/// Options shared by every strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Pretty-print response documents
    pub pretty: bool,

    /// Scheduling date to use instead of the system clock
    pub today: Option<NaiveDate>,
}

impl RunOptions {
    /// Build the engine these options describe
    pub fn engine(&self) -> InstructionEngine {
        match self.today {
            Some(date) => InstructionEngine::with_clock(FixedClock(date)),
            None => InstructionEngine::new(),
        }
    }
}

/// Evaluate one entry of the request stream
///
/// A request that failed decoding is answered with the invalid-payload
/// response without reaching the engine. A read failure is fatal and is
/// returned as `EngineError::IoError`.
pub fn evaluate_record(
    engine: &InstructionEngine,
    record: RequestRecord,
) -> Result<TransactionResult, EngineError> {
    match record {
        Ok(request) => Ok(engine.evaluate(&request.accounts, &request.instruction)),
        Err(RequestError::Io { message }) => Err(EngineError::IoError { message }),
        Err(e) => {
            warn!(error = %e, "invalid request payload");
            Ok(TransactionResult::invalid_payload())
        }
    }
}

/// Per-run outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub successful: usize,
    pub pending: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, result: &TransactionResult) {
        match result.status {
            TransactionStatus::Successful => self.successful += 1,
            TransactionStatus::Pending => self.pending += 1,
            TransactionStatus::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.successful + self.pending + self.failed
    }

    pub fn log(&self, strategy: &str) {
        info!(
            strategy,
            total = self.total(),
            successful = self.successful,
            pending = self.pending,
            failed = self.failed,
            "processing complete"
        );
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `options` - Output and clock options shared by both strategies
/// * `config` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    options: RunOptions,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(options)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, options))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::PaymentRequest;
    use crate::types::{Account, StatusCode};

    #[test]
    fn test_evaluate_record_answers_invalid_payload() {
        let engine = InstructionEngine::new();
        let result = evaluate_record(&engine, Err(RequestError::NoAccounts)).unwrap();

        assert_eq!(result, TransactionResult::invalid_payload());
        assert_eq!(result.status_reason, "Invalid request payload");
    }

    #[test]
    fn test_evaluate_record_runs_engine() {
        let engine = RunOptions {
            pretty: false,
            today: NaiveDate::from_ymd_opt(2025, 1, 1),
        }
        .engine();
        let request = PaymentRequest {
            accounts: vec![Account::new("A1", 10, "GHS"), Account::new("A2", 0, "GHS")],
            instruction: "CREDIT 10 GHS TO ACCOUNT A2 FOR DEBIT FROM ACCOUNT A1 ON 2025-01-02"
                .to_string(),
        };

        let result = evaluate_record(&engine, Ok(request)).unwrap();
        assert_eq!(result.status_code, StatusCode::AP02);
    }

    #[test]
    fn test_evaluate_record_read_failure_is_fatal() {
        let engine = InstructionEngine::new();
        let record = Err(RequestError::Io {
            message: "disk gone".to_string(),
        });

        assert_eq!(
            evaluate_record(&engine, record),
            Err(EngineError::IoError {
                message: "disk gone".to_string()
            })
        );
    }

    #[test]
    fn test_run_summary_counts_by_status() {
        let mut summary = RunSummary::default();
        summary.record(&TransactionResult::invalid_payload());
        summary.record(&TransactionResult::internal_error());

        assert_eq!(
            summary,
            RunSummary {
                successful: 0,
                pending: 0,
                failed: 2,
            }
        );
        assert_eq!(summary.total(), 2);
    }
}
