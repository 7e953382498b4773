//! Instruction evaluation engine
//!
//! This module provides the `InstructionEngine` that orchestrates a single
//! evaluation: parse the instruction text, run the validation pipeline
//! against the supplied accounts, and assemble the result.
//!
//! Evaluation is a pure function of its inputs and the engine's clock:
//! - the supplied accounts are never mutated
//! - every input yields exactly one `TransactionResult`
//! - nothing is remembered between calls

use std::sync::Arc;

use tracing::debug;

use crate::core::parser::parse_instruction;
use crate::core::pipeline;
use crate::core::result_builder;
use crate::core::traits::{Clock, SystemClock};
use crate::types::{Account, Instruction, ParsedInstruction, TransactionResult};

/// Payment instruction evaluation engine
///
/// Holds no state besides its clock, so one engine can be shared freely
/// across threads and tasks.
#[derive(Clone)]
pub struct InstructionEngine {
    clock: Arc<dyn Clock>,
}

impl InstructionEngine {
    /// Create an engine that reads today's date from the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an engine with a custom clock
    ///
    /// # Arguments
    ///
    /// * `clock` - Source of the current UTC day for scheduling decisions
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        InstructionEngine {
            clock: Arc::new(clock),
        }
    }

    /// Evaluate an instruction against a list of accounts
    ///
    /// # Arguments
    ///
    /// * `accounts` - Caller-supplied account records (read only)
    /// * `instruction` - Free-text instruction, e.g.
    ///   `DEBIT 500 USD FROM ACCOUNT A1 FOR CREDIT TO ACCOUNT A2`
    ///
    /// # Returns
    ///
    /// The `TransactionResult` for the instruction. Never fails: malformed
    /// text yields an SY03 result, rule violations yield their status code.
    pub fn evaluate(&self, accounts: &[Account], instruction: &str) -> TransactionResult {
        match parse_instruction(instruction) {
            ParsedInstruction::Parsed(parsed) => self.evaluate_instruction(accounts, &parsed),
            ParsedInstruction::Unparsed => {
                let result = result_builder::malformed();
                debug!(status_code = %result.status_code, "instruction did not parse");
                result
            }
        }
    }

    /// Evaluate an already-parsed instruction
    ///
    /// Runs the full validation pipeline, including the execution date check,
    /// so an `Instruction` built by hand is held to the same rules as one
    /// produced by the parser.
    pub fn evaluate_instruction(
        &self,
        accounts: &[Account],
        instruction: &Instruction,
    ) -> TransactionResult {
        let verdict = pipeline::run(accounts, instruction, self.clock.today());
        let result = result_builder::build(instruction, verdict);

        debug!(
            kind = %instruction.kind,
            amount = instruction.amount,
            currency = %instruction.currency,
            debit = %instruction.debit_account,
            credit = %instruction.credit_account,
            status_code = %result.status_code,
            "instruction evaluated"
        );

        result
    }
}

impl Default for InstructionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate `instruction` against `accounts` using the system clock
pub fn evaluate(accounts: &[Account], instruction: &str) -> TransactionResult {
    InstructionEngine::new().evaluate(accounts, instruction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FixedClock;
    use crate::types::{
        AccountSnapshot, CurrencyCode, InstructionType, StatusCode, TransactionStatus,
    };
    use chrono::NaiveDate;
    use rstest::rstest;

    fn engine() -> InstructionEngine {
        InstructionEngine::with_clock(FixedClock(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()))
    }

    fn accounts() -> Vec<Account> {
        vec![
            Account::new("N90394", 1000, "USD"),
            Account::new("N9122", 500, "USD"),
        ]
    }

    fn snapshot(id: &str, balance: u64, balance_before: u64, currency: &str) -> AccountSnapshot {
        AccountSnapshot {
            id: id.to_string(),
            balance,
            balance_before,
            currency: currency.to_string(),
        }
    }

    #[test]
    fn test_debit_executes_immediately() {
        let result = engine().evaluate(
            &accounts(),
            "DEBIT 500 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122",
        );

        assert_eq!(result.kind, Some(InstructionType::Debit));
        assert_eq!(result.amount, Some(500));
        assert_eq!(result.currency.as_deref(), Some("USD"));
        assert_eq!(result.debit_account.as_deref(), Some("N90394"));
        assert_eq!(result.credit_account.as_deref(), Some("N9122"));
        assert_eq!(result.execute_by, None);
        assert_eq!(result.status, TransactionStatus::Successful);
        assert_eq!(result.status_code, StatusCode::AP00);
        assert_eq!(
            result.accounts,
            vec![
                snapshot("N90394", 500, 1000, "USD"),
                snapshot("N9122", 1000, 500, "USD"),
            ]
        );
    }

    #[test]
    fn test_credit_with_future_date_is_pending() {
        let accounts = vec![
            Account::new("acc-001", 1000, "NGN"),
            Account::new("acc-002", 500, "NGN"),
        ];
        let result = engine().evaluate(
            &accounts,
            "CREDIT 300 NGN TO ACCOUNT acc-002 FOR DEBIT FROM ACCOUNT acc-001 ON 2026-12-31",
        );

        assert_eq!(result.kind, Some(InstructionType::Credit));
        assert_eq!(result.debit_account.as_deref(), Some("acc-001"));
        assert_eq!(result.credit_account.as_deref(), Some("acc-002"));
        assert_eq!(result.execute_by.as_deref(), Some("2026-12-31"));
        assert_eq!(result.status, TransactionStatus::Pending);
        assert_eq!(result.status_code, StatusCode::AP02);
        assert_eq!(
            result.accounts,
            vec![
                snapshot("acc-001", 1000, 1000, "NGN"),
                snapshot("acc-002", 500, 500, "NGN"),
            ]
        );
    }

    #[test]
    fn test_insufficient_funds_reason() {
        let accounts = vec![
            Account::new("A", 100, "USD"),
            Account::new("B", 500, "USD"),
        ];
        let result = engine().evaluate(
            &accounts,
            "DEBIT 500 USD FROM ACCOUNT A FOR CREDIT TO ACCOUNT B",
        );

        assert_eq!(result.status_code, StatusCode::AC01);
        assert_eq!(
            result.status_reason,
            "Insufficient funds in account A: has 100 USD, needs 500 USD"
        );
        assert_eq!(
            result.accounts,
            vec![snapshot("A", 100, 100, "USD"), snapshot("B", 500, 500, "USD")]
        );
    }

    #[test]
    fn test_same_account() {
        let accounts = vec![Account::new("A", 100, "USD")];
        let result = engine().evaluate(
            &accounts,
            "DEBIT 100 USD FROM ACCOUNT A FOR CREDIT TO ACCOUNT A",
        );

        assert_eq!(result.status_code, StatusCode::AC02);
        assert_eq!(result.accounts, vec![snapshot("A", 100, 100, "USD")]);
    }

    #[test]
    fn test_unsupported_currency_reachable_with_matching_accounts() {
        let accounts = vec![
            Account::new("A", 100, "XXX"),
            Account::new("B", 500, "XXX"),
        ];
        let result = engine().evaluate(
            &accounts,
            "DEBIT 100 XXX FROM ACCOUNT A FOR CREDIT TO ACCOUNT B",
        );

        assert_eq!(result.status_code, StatusCode::CU02);
        assert_eq!(
            result.status_reason,
            "Unsupported currency. Only NGN, USD, GBP, and GHS are supported"
        );
        assert_eq!(result.currency.as_deref(), Some("XXX"));
    }

    #[test]
    fn test_malformed_instruction() {
        let result = engine().evaluate(&accounts(), "SEND 100 USD TO ACCOUNT B");

        assert_eq!(result, result_builder::malformed());
        assert_eq!(result.kind, None);
        assert!(result.accounts.is_empty());
    }

    #[rstest]
    #[case::unknown_account(
        "DEBIT 10 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT ZZ",
        StatusCode::AC03
    )]
    #[case::currency_mismatch(
        "DEBIT 10 GBP FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122",
        StatusCode::CU01
    )]
    #[case::mismatch_before_unsupported(
        "DEBIT 10 XXX FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122",
        StatusCode::CU01
    )]
    #[case::lowercase_keywords(
        "debit 10 usd from account N90394 for credit to account N9122",
        StatusCode::AP00
    )]
    #[case::past_date(
        "DEBIT 10 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122 ON 2024-12-31",
        StatusCode::AP00
    )]
    #[case::today(
        "DEBIT 10 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122 ON 2025-01-15",
        StatusCode::AP00
    )]
    #[case::tomorrow(
        "DEBIT 10 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122 ON 2025-01-16",
        StatusCode::AP02
    )]
    #[case::impossible_date_is_unparsed(
        "DEBIT 10 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122 ON 2025-02-30",
        StatusCode::SY03
    )]
    #[case::exact_balance(
        "DEBIT 1000 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122",
        StatusCode::AP00
    )]
    #[case::one_over_balance(
        "DEBIT 1001 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122",
        StatusCode::AC01
    )]
    fn test_status_codes(#[case] instruction: &str, #[case] expected: StatusCode) {
        let result = engine().evaluate(&accounts(), instruction);
        assert_eq!(result.status_code, expected);
        assert_eq!(result.status, expected.status());
    }

    #[test]
    fn test_invalid_date_on_hand_built_instruction() {
        let instruction = Instruction {
            kind: InstructionType::Debit,
            amount: 10,
            currency: CurrencyCode::parse("USD").unwrap(),
            debit_account: "N90394".to_string(),
            credit_account: "N9122".to_string(),
            execute_by: Some("2025-13-01".to_string()),
        };

        let result = engine().evaluate_instruction(&accounts(), &instruction);

        assert_eq!(result.status_code, StatusCode::DT01);
        assert_eq!(result.status_reason, "Invalid date format");
        assert_eq!(result.execute_by.as_deref(), Some("2025-13-01"));
    }

    #[test]
    fn test_missing_account_reports_matched_subset_in_supplied_order() {
        let accounts = vec![
            Account::new("B", 1, "USD"),
            Account::new("X", 2, "USD"),
            Account::new("B", 3, "USD"),
        ];
        let result = engine().evaluate(
            &accounts,
            "DEBIT 1 USD FROM ACCOUNT ZZ FOR CREDIT TO ACCOUNT B",
        );

        assert_eq!(result.status_code, StatusCode::AC03);
        assert_eq!(result.status_reason, "Account not found: ZZ");
        assert_eq!(
            result.accounts,
            vec![snapshot("B", 1, 1, "USD"), snapshot("B", 3, 3, "USD")]
        );
    }

    #[test]
    fn test_evaluation_does_not_mutate_accounts() {
        let accounts = accounts();
        let before = accounts.clone();

        engine().evaluate(
            &accounts,
            "DEBIT 500 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122",
        );

        assert_eq!(accounts, before);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let engine = engine();
        let accounts = accounts();
        let text = "CREDIT 250 USD TO ACCOUNT N9122 FOR DEBIT FROM ACCOUNT N90394";

        assert_eq!(
            engine.evaluate(&accounts, text),
            engine.evaluate(&accounts, text)
        );
    }

    #[test]
    fn test_executed_transfer_conserves_total() {
        let result = engine().evaluate(
            &accounts(),
            "CREDIT 250 USD TO ACCOUNT N9122 FOR DEBIT FROM ACCOUNT N90394",
        );

        let before: u64 = result.accounts.iter().map(|a| a.balance_before).sum();
        let after: u64 = result.accounts.iter().map(|a| a.balance).sum();
        assert_eq!(result.status_code, StatusCode::AP00);
        assert_eq!(before, after);
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = engine();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine
                        .evaluate(
                            &accounts(),
                            "DEBIT 1 USD FROM ACCOUNT N90394 FOR CREDIT TO ACCOUNT N9122",
                        )
                        .status_code
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), StatusCode::AP00);
        }
    }
}
