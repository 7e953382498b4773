//! Payment Instruction Engine Library
//! # Overview
//!
//! This library evaluates free-text payment instructions against a list of
//! caller-supplied accounts and reports a structured result for each one.
//! It is stateless: accounts arrive with every request and are never
//! mutated; an executed transfer is reflected only in the result's account
//! snapshots.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, Instruction, TransactionResult, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::parser`] - Instruction grammar
//!   - [`core::pipeline`] - Ordered validation cascade
//!   - [`core::engine`] - Evaluation orchestration
//! - [`io`] - JSON request decoding and response output
//! - [`strategy`] - Sync and async drivers over a file of requests
//!
//! # Instruction Grammar
//!
//! ```text
//! DEBIT  <amount> <CUR> FROM ACCOUNT <id> FOR CREDIT TO ACCOUNT <id> [ON <YYYY-MM-DD>]
//! CREDIT <amount> <CUR> TO ACCOUNT <id> FOR DEBIT FROM ACCOUNT <id> [ON <YYYY-MM-DD>]
//! ```
//!
//! # Status Codes
//!
//! - **AP00**: executed (`successful`)
//! - **AP02**: scheduled for a future date (`pending`)
//! - **SY03**, **AC03**, **CU01**, **CU02**, **AC02**, **DT01**, **AC01**: `failed`
//!
//! # Example
//!
//! ```
//! use payment_instruction_engine::{evaluate, Account, StatusCode};
//!
//! let accounts = vec![Account::new("A1", 500, "USD"), Account::new("A2", 100, "USD")];
//! let result = evaluate(&accounts, "DEBIT 200 USD FROM ACCOUNT A1 FOR CREDIT TO ACCOUNT A2");
//!
//! assert_eq!(result.status_code, StatusCode::AP00);
//! assert_eq!(result.accounts[0].balance, 300);
//! assert_eq!(accounts[0].balance, 500);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::tokenizer::tokenize;
pub use crate::core::validators::{is_valid_account_id, is_valid_date};
pub use crate::core::{evaluate, parse_instruction, InstructionEngine};
pub use io::{write_result, PaymentRequest};
pub use types::{
    Account, AccountSnapshot, CurrencyCode, Instruction, InstructionType, ParsedInstruction,
    StatusCode, TransactionResult, TransactionStatus,
};
