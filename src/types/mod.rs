//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: caller-supplied accounts and result snapshots
//! - `instruction`: parsed instructions and currency codes
//! - `result`: status-code taxonomy and the response document
//! - `error`: error types for the engine

pub mod account;
pub mod error;
pub mod instruction;
pub mod result;

pub use account::{Account, AccountId, AccountSnapshot, Balance};
pub use error::{EngineError, GrammarError, Rejection, RequestError};
pub use instruction::{
    Amount, CurrencyCode, Instruction, InstructionType, ParsedInstruction, SupportedCurrency,
};
pub use result::{StatusCode, TransactionResult, TransactionStatus};
