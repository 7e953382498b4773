//! Result types for the payment instruction engine
//!
//! This module defines the closed status-code taxonomy and the
//! `TransactionResult` response document.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::{AccountId, AccountSnapshot};
use super::instruction::{Amount, Instruction, InstructionType};

/// Overall outcome of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// The transfer was applied to the snapshot
    Successful,

    /// The transfer is valid but dated in the future
    Pending,

    /// A rule refused the instruction
    Failed,
}

/// Closed status-code taxonomy
///
/// Every evaluation produces exactly one of these codes.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// Malformed instruction (also used for rejected payloads and internal faults)
    SY03,
    /// Account not found
    AC03,
    /// Account and instruction currencies differ
    CU01,
    /// Unsupported currency
    CU02,
    /// Debit and credit account are the same
    AC02,
    /// Invalid execution date
    DT01,
    /// Scheduled for future execution
    AP02,
    /// Insufficient funds
    AC01,
    /// Executed
    AP00,
}

impl StatusCode {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::SY03 => "SY03",
            StatusCode::AC03 => "AC03",
            StatusCode::CU01 => "CU01",
            StatusCode::CU02 => "CU02",
            StatusCode::AC02 => "AC02",
            StatusCode::DT01 => "DT01",
            StatusCode::AP02 => "AP02",
            StatusCode::AC01 => "AC01",
            StatusCode::AP00 => "AP00",
        }
    }

    /// The transaction status implied by this code
    pub fn status(self) -> TransactionStatus {
        match self {
            StatusCode::AP00 => TransactionStatus::Successful,
            StatusCode::AP02 => TransactionStatus::Pending,
            StatusCode::SY03
            | StatusCode::AC03
            | StatusCode::CU01
            | StatusCode::CU02
            | StatusCode::AC02
            | StatusCode::DT01
            | StatusCode::AC01 => TransactionStatus::Failed,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The response document for one evaluation
///
/// The instruction fields are `None` (serialized as `null`) exactly when the
/// instruction could not be parsed, or when the request never reached the
/// engine. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    #[serde(rename = "type")]
    pub kind: Option<InstructionType>,
    pub amount: Option<Amount>,
    pub currency: Option<String>,
    pub debit_account: Option<AccountId>,
    pub credit_account: Option<AccountId>,
    pub execute_by: Option<String>,
    pub status: TransactionStatus,
    pub status_reason: String,
    pub status_code: StatusCode,
    pub accounts: Vec<AccountSnapshot>,
}

impl TransactionResult {
    /// A result with every instruction field null and no accounts
    pub fn without_instruction(status_code: StatusCode, status_reason: impl Into<String>) -> Self {
        TransactionResult {
            kind: None,
            amount: None,
            currency: None,
            debit_account: None,
            credit_account: None,
            execute_by: None,
            status: status_code.status(),
            status_reason: status_reason.into(),
            status_code,
            accounts: Vec::new(),
        }
    }

    /// Response for a request document that failed shape validation
    pub fn invalid_payload() -> Self {
        Self::without_instruction(StatusCode::SY03, "Invalid request payload")
    }

    /// Response for an unexpected fault while evaluating
    ///
    /// Never carries the fault's detail; that goes to the log.
    pub fn internal_error() -> Self {
        Self::without_instruction(StatusCode::SY03, "Internal server error")
    }

    /// A result echoing `instruction`
    pub fn for_instruction(
        instruction: &Instruction,
        status_code: StatusCode,
        status_reason: impl Into<String>,
        accounts: Vec<AccountSnapshot>,
    ) -> Self {
        TransactionResult {
            kind: Some(instruction.kind),
            amount: Some(instruction.amount),
            currency: Some(instruction.currency.to_string()),
            debit_account: Some(instruction.debit_account.clone()),
            credit_account: Some(instruction.credit_account.clone()),
            execute_by: instruction.execute_by.clone(),
            status: status_code.status(),
            status_reason: status_reason.into(),
            status_code,
            accounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::instruction::SupportedCurrency;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::AP00, TransactionStatus::Successful)]
    #[case(StatusCode::AP02, TransactionStatus::Pending)]
    #[case(StatusCode::SY03, TransactionStatus::Failed)]
    #[case(StatusCode::AC03, TransactionStatus::Failed)]
    #[case(StatusCode::CU01, TransactionStatus::Failed)]
    #[case(StatusCode::CU02, TransactionStatus::Failed)]
    #[case(StatusCode::AC02, TransactionStatus::Failed)]
    #[case(StatusCode::DT01, TransactionStatus::Failed)]
    #[case(StatusCode::AC01, TransactionStatus::Failed)]
    fn test_status_code_maps_to_status(
        #[case] code: StatusCode,
        #[case] expected: TransactionStatus,
    ) {
        assert_eq!(code.status(), expected);
    }

    #[test]
    fn test_status_code_serializes_as_code() {
        assert_eq!(serde_json::to_string(&StatusCode::AP00).unwrap(), "\"AP00\"");
        assert_eq!(StatusCode::CU02.to_string(), "CU02");
    }

    #[test]
    fn test_unparsed_result_serializes_nulls_in_wire_order() {
        let result = TransactionResult::without_instruction(
            StatusCode::SY03,
            "Malformed instruction: unable to parse keywords",
        );

        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            "{\"type\":null,\"amount\":null,\"currency\":null,\"debit_account\":null,\
             \"credit_account\":null,\"execute_by\":null,\"status\":\"failed\",\
             \"status_reason\":\"Malformed instruction: unable to parse keywords\",\
             \"status_code\":\"SY03\",\"accounts\":[]}"
        );
    }

    #[test]
    fn test_for_instruction_echoes_fields() {
        let instruction = Instruction {
            kind: InstructionType::Credit,
            amount: 75,
            currency: SupportedCurrency::Gbp.into(),
            debit_account: "d".to_string(),
            credit_account: "c".to_string(),
            execute_by: Some("2024-01-31".to_string()),
        };

        let result = TransactionResult::for_instruction(
            &instruction,
            StatusCode::AP02,
            "Transaction scheduled for future execution",
            Vec::new(),
        );

        assert_eq!(result.kind, Some(InstructionType::Credit));
        assert_eq!(result.amount, Some(75));
        assert_eq!(result.currency.as_deref(), Some("GBP"));
        assert_eq!(result.debit_account.as_deref(), Some("d"));
        assert_eq!(result.credit_account.as_deref(), Some("c"));
        assert_eq!(result.execute_by.as_deref(), Some("2024-01-31"));
        assert_eq!(result.status, TransactionStatus::Pending);
    }

    #[test]
    fn test_invalid_payload_and_internal_error_reasons() {
        assert_eq!(
            TransactionResult::invalid_payload().status_reason,
            "Invalid request payload"
        );
        assert_eq!(
            TransactionResult::internal_error().status_reason,
            "Internal server error"
        );
        assert_eq!(
            TransactionResult::internal_error().status,
            TransactionStatus::Failed
        );
    }
}
