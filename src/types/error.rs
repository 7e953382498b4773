//! Error types for the payment instruction engine
//!
//! This module defines every error type in the crate. Only `EngineError` ever
//! reaches the binary as a failure: the other three are folded into normal
//! `TransactionResult` values before they leave the library, except
//! `RequestError::Io`, which the strategies turn into `EngineError::IoError`.
//!
//! # Error Categories
//!
//! - **Rejection**: a business rule refused the instruction; carries the
//!   status reason and maps to a status code
//! - **GrammarError**: why the parser refused an instruction string
//! - **RequestError**: a request document was malformed, had the wrong shape,
//!   or could not be read
//! - **EngineError**: fatal processing failures (file not found, I/O, runtime)

use thiserror::Error;

use super::account::{AccountId, Balance};
use super::instruction::{Amount, CurrencyCode};
use super::result::StatusCode;

/// A business rule refused the instruction
///
/// The `Display` text of each variant is exactly the `status_reason` reported
/// to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The instruction did not match the grammar
    #[error("Malformed instruction: unable to parse keywords")]
    Malformed,

    /// One of the named accounts is not in the supplied list
    #[error("Account not found: {account}")]
    AccountNotFound {
        /// The first id that could not be resolved (debit before credit)
        account: AccountId,
    },

    /// An account is held in a different currency than the instruction
    #[error("Account currency mismatch")]
    CurrencyMismatch,

    /// The instruction currency is outside the supported set
    #[error("Unsupported currency. Only NGN, USD, GBP, and GHS are supported")]
    UnsupportedCurrency,

    /// Debit and credit name the same account
    #[error("Debit and credit accounts cannot be the same")]
    SameAccount,

    /// The execution date is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date format")]
    InvalidDate,

    /// The debit account cannot cover the amount
    #[error("Insufficient funds in account {account}: has {available} {currency}, needs {requested} {currency}")]
    InsufficientFunds {
        account: AccountId,
        available: Balance,
        requested: Amount,
        currency: CurrencyCode,
    },
}

impl Rejection {
    /// The status code reported for this rejection
    pub fn status_code(&self) -> StatusCode {
        match self {
            Rejection::Malformed => StatusCode::SY03,
            Rejection::AccountNotFound { .. } => StatusCode::AC03,
            Rejection::CurrencyMismatch => StatusCode::CU01,
            Rejection::UnsupportedCurrency => StatusCode::CU02,
            Rejection::SameAccount => StatusCode::AC02,
            Rejection::InvalidDate => StatusCode::DT01,
            Rejection::InsufficientFunds { .. } => StatusCode::AC01,
        }
    }

    /// Create an AccountNotFound rejection
    pub fn account_not_found(account: &str) -> Self {
        Rejection::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create an InsufficientFunds rejection
    pub fn insufficient_funds(
        account: &str,
        available: Balance,
        requested: Amount,
        currency: &CurrencyCode,
    ) -> Self {
        Rejection::InsufficientFunds {
            account: account.to_string(),
            available,
            requested,
            currency: currency.clone(),
        }
    }
}

/// Why the parser refused an instruction string
///
/// Positions are token indexes into the tokenized instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("no DEBIT or CREDIT keyword found")]
    MissingAnchor,

    #[error("expected {expected} at token {position}, found end of instruction")]
    UnexpectedEnd {
        expected: &'static str,
        position: usize,
    },

    #[error("expected {expected} at token {position}, found '{found}'")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: usize,
    },

    #[error("invalid amount '{token}' at token {position}")]
    InvalidAmount { token: String, position: usize },

    #[error("invalid currency '{token}' at token {position}")]
    InvalidCurrency { token: String, position: usize },

    #[error("invalid account identifier '{token}' at token {position}")]
    InvalidAccountId { token: String, position: usize },

    #[error("invalid execution date '{token}' at token {position}")]
    InvalidDate { token: String, position: usize },
}

/// A request document could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The input is not valid JSON; the rest of the stream is abandoned
    #[error("JSON syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The document is JSON but fields are missing or of the wrong type
    #[error("Invalid request shape: {message}")]
    Shape { message: String },

    #[error("Request must contain at least one account")]
    NoAccounts,

    #[error("Account at index {index} has an empty id")]
    EmptyAccountId { index: usize },

    #[error("Account at index {index} has invalid currency '{currency}': expected 3 characters")]
    InvalidAccountCurrency { index: usize, currency: String },

    #[error("Instruction must be a non-empty string")]
    EmptyInstruction,

    /// The input could not be read; fatal for the run
    #[error("Failed to read input: {message}")]
    Io { message: String },
}

impl From<serde_json::Error> for RequestError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            RequestError::Io {
                message: error.to_string(),
            }
        } else if error.is_syntax() || error.is_eof() {
            RequestError::Syntax {
                line: error.line(),
                column: error.column(),
                message: error.to_string(),
            }
        } else {
            RequestError::Shape {
                message: error.to_string(),
            }
        }
    }
}

/// Fatal processing errors
///
/// These stop a run: the binary reports them on stderr and exits with code 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Input file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A response document could not be serialized
    #[error("Output error: {message}")]
    OutputError { message: String },

    /// The async runtime could not be created
    #[error("Runtime error: {message}")]
    RuntimeError { message: String },
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            return EngineError::IoError {
                message: error.to_string(),
            };
        }

        EngineError::OutputError {
            message: error.to_string(),
        }
    }
}

impl EngineError {
    /// Map a failure to open the input file
    ///
    /// `NotFound` becomes `FileNotFound`; anything else is an I/O error
    /// mentioning the path.
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            EngineError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            EngineError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            }
        }
    }

    /// Create a RuntimeError
    pub fn runtime(message: impl std::fmt::Display) -> Self {
        EngineError::RuntimeError {
            message: message.to_string(),
        }
    }
}
