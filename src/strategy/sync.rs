//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates processing by coordinating
//! between the SyncReader (for request input) and InstructionEngine (for
//! business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - Request decoding to `SyncReader` (iterator interface)
//! - Evaluation to `InstructionEngine` (business logic)
//! - Output to `json_format::write_result` (format handling)
//!
//! Each response is written as soon as its request is evaluated, so memory
//! use stays constant regardless of input size.

use std::io::Write;
use std::path::Path;

use crate::io::json_format::write_result;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{evaluate_record, ProcessingStrategy, RunOptions, RunSummary};
use crate::types::EngineError;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use payment_instruction_engine::strategy::{ProcessingStrategy, RunOptions, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(RunOptions::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("requests.jsonl"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    options: RunOptions,
}

impl SyncProcessingStrategy {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process requests from input file and write responses to output
    ///
    /// 1. Opens a SyncReader to stream request documents
    /// 2. Evaluates each record through the engine
    /// 3. Writes each response immediately
    ///
    /// Fatal errors (file not found, read or write failures) are returned immediately.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), EngineError> {
        let engine = self.options.engine();
        let reader = SyncReader::open(input_path)?;
        let mut summary = RunSummary::default();

        for record in reader {
            let result = evaluate_record(&engine, record)?;
            summary.record(&result);
            write_result(output, &result, self.options.pretty)?;
        }

        output.flush()?;
        summary.log("sync");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::Value;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary input file for testing
    fn create_temp_input(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn options() -> RunOptions {
        RunOptions {
            pretty: false,
            today: NaiveDate::from_ymd_opt(2025, 1, 15),
        }
    }

    fn status_codes(output: Vec<u8>) -> Vec<String> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| {
                let value: Value = serde_json::from_str(line).unwrap();
                value["status_code"].as_str().unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn test_sync_strategy_writes_one_line_per_request_in_order() {
        let input = r#"{"accounts":[{"id":"A1","balance":500,"currency":"USD"},{"id":"A2","balance":100,"currency":"USD"}],"instruction":"DEBIT 200 USD FROM ACCOUNT A1 FOR CREDIT TO ACCOUNT A2"}
{"accounts":[{"id":"A1","balance":500,"currency":"USD"},{"id":"A2","balance":100,"currency":"USD"}],"instruction":"DEBIT 900 USD FROM ACCOUNT A1 FOR CREDIT TO ACCOUNT A2"}
{"accounts":[],"instruction":"DEBIT 1 USD FROM ACCOUNT A1 FOR CREDIT TO ACCOUNT A2"}
{"accounts":[{"id":"A1","balance":500,"currency":"USD"}],"instruction":"PAY A1"}
"#;
        let file = create_temp_input(input);
        let mut output = Vec::new();

        SyncProcessingStrategy::new(options())
            .process(file.path(), &mut output)
            .unwrap();

        assert_eq!(status_codes(output), vec!["AP00", "AC01", "SY03", "SY03"]);
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::new(options());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.jsonl"), &mut output);
        assert!(matches!(result, Err(EngineError::FileNotFound { .. })));
        assert!(output.is_empty());
    }

    #[test]
    fn test_sync_strategy_answers_syntax_error_then_stops() {
        let input = "{\"accounts\": oops}\n{\"accounts\":[]}\n";
        let file = create_temp_input(input);
        let mut output = Vec::new();

        SyncProcessingStrategy::new(options())
            .process(file.path(), &mut output)
            .unwrap();

        assert_eq!(status_codes(output), vec!["SY03"]);
    }

    #[test]
    fn test_sync_strategy_pretty_output() {
        let input = r#"{"accounts":[{"id":"A1","balance":5,"currency":"NGN"}],"instruction":"DEBIT 5 NGN FROM ACCOUNT A1 FOR CREDIT TO ACCOUNT A1"}"#;
        let file = create_temp_input(input);
        let mut output = Vec::new();

        let options = RunOptions {
            pretty: true,
            ..options()
        };
        SyncProcessingStrategy::new(options)
            .process(file.path(), &mut output)
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.lines().count() > 1);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status_code"], "AC02");
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
