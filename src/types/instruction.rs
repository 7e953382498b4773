//! Instruction-related types for the payment instruction engine
//!
//! This module defines the structured form of a payment instruction after
//! parsing, together with the currency types it refers to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::AccountId;

/// Positive transfer amount in the smallest currency unit
pub type Amount = u64;

/// Instruction types recognized by the parser
///
/// The type is fixed by the anchor keyword and decides which grammar tail
/// follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstructionType {
    /// `DEBIT <amount> <CUR> FROM ACCOUNT <debit> FOR CREDIT TO ACCOUNT <credit>`
    Debit,

    /// `CREDIT <amount> <CUR> TO ACCOUNT <credit> FOR DEBIT FROM ACCOUNT <debit>`
    Credit,
}

impl InstructionType {
    /// The keyword spelling of this type
    pub fn keyword(self) -> &'static str {
        match self {
            InstructionType::Debit => "DEBIT",
            InstructionType::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for InstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Currencies the engine settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedCurrency {
    Ngn,
    Usd,
    Gbp,
    Ghs,
}

impl SupportedCurrency {
    pub const ALL: [SupportedCurrency; 4] = [
        SupportedCurrency::Ngn,
        SupportedCurrency::Usd,
        SupportedCurrency::Gbp,
        SupportedCurrency::Ghs,
    ];

    pub fn code(self) -> &'static str {
        match self {
            SupportedCurrency::Ngn => "NGN",
            SupportedCurrency::Usd => "USD",
            SupportedCurrency::Gbp => "GBP",
            SupportedCurrency::Ghs => "GHS",
        }
    }

    /// Look up a supported currency by code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
    }
}

/// Three-letter currency code as written in an instruction
///
/// Always three ASCII letters, stored uppercase. A code is not necessarily
/// supported: membership in [`SupportedCurrency`] is a business rule checked
/// by the validation pipeline, not a grammar rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Build a code from a token, normalizing to uppercase
    ///
    /// Returns `None` unless the token is exactly three ASCII letters.
    pub fn parse(token: &str) -> Option<Self> {
        if token.len() == 3 && token.bytes().all(|b| b.is_ascii_alphabetic()) {
            Some(CurrencyCode(token.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn supported(&self) -> Option<SupportedCurrency> {
        SupportedCurrency::from_code(&self.0)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::parse(&value).ok_or_else(|| format!("invalid currency code '{}'", value))
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl From<SupportedCurrency> for CurrencyCode {
    fn from(currency: SupportedCurrency) -> Self {
        CurrencyCode(currency.code().to_string())
    }
}

/// A fully parsed payment instruction
///
/// Every field the grammar requires is present. `execute_by` keeps the raw
/// `YYYY-MM-DD` token; the pipeline validates it again before scheduling, so
/// instructions built by hand go through the same date rule as parsed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstructionType,
    pub amount: Amount,
    pub currency: CurrencyCode,
    pub debit_account: AccountId,
    pub credit_account: AccountId,
    pub execute_by: Option<String>,
}

/// Outcome of parsing an instruction string
///
/// There is no partially parsed state: either the whole grammar matched or
/// the instruction is `Unparsed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInstruction {
    Unparsed,
    Parsed(Instruction),
}
