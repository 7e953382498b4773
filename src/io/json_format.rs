//! JSON format handling for request and response documents
//!
//! This module centralizes all JSON format concerns:
//! - `PaymentRequest` structure for deserialization
//! - Shape validation of decoded requests
//! - Response serialization, one document per line
//!
//! All functions are pure (no file I/O) for easy testing.

use std::io::Write;

use serde::Deserialize;
use serde_json::Value;

use crate::types::{Account, EngineError, RequestError, TransactionResult};

/// A decoded request document
///
/// Matches the input format `{"accounts": [...], "instruction": "..."}`.
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentRequest {
    pub accounts: Vec<Account>,
    pub instruction: String,
}

/// One entry of a request stream: a valid request, or why it was refused
pub type RequestRecord = Result<PaymentRequest, RequestError>;

impl PaymentRequest {
    /// Check the shape rules serde cannot express
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the request may be handed to the engine
    /// * `Err(RequestError)` naming the first violated rule
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.accounts.is_empty() {
            return Err(RequestError::NoAccounts);
        }

        for (index, account) in self.accounts.iter().enumerate() {
            if account.id.is_empty() {
                return Err(RequestError::EmptyAccountId { index });
            }
            if account.currency.chars().count() != 3 {
                return Err(RequestError::InvalidAccountCurrency {
                    index,
                    currency: account.currency.clone(),
                });
            }
        }

        if self.instruction.is_empty() {
            return Err(RequestError::EmptyInstruction);
        }

        Ok(())
    }
}

/// Decode one JSON document into a validated request
///
/// # Arguments
///
/// * `document` - A complete JSON value read from the input stream
///
/// # Returns
///
/// * `Ok(PaymentRequest)` - Well-formed request
/// * `Err(RequestError::Shape)` - Missing field or wrong type
/// * `Err(RequestError::*)` - A shape rule from [`PaymentRequest::validate`]
pub fn decode_request(document: Value) -> RequestRecord {
    let request: PaymentRequest = serde_json::from_value(document)?;
    request.validate()?;
    Ok(request)
}

/// Write a response document followed by a newline
///
/// # Arguments
///
/// * `output` - Writer receiving the document
/// * `result` - The response to serialize
/// * `pretty` - Pretty-print instead of a single compact line
pub fn write_result(
    output: &mut dyn Write,
    result: &TransactionResult,
    pretty: bool,
) -> Result<(), EngineError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *output, result)?;
    } else {
        serde_json::to_writer(&mut *output, result)?;
    }
    output.write_all(b"\n")?;
    Ok(())
}
