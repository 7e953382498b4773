//! Account-related types for the payment instruction engine
//!
//! This module defines the caller-supplied `Account` record and the
//! `AccountSnapshot` that the engine echoes back in every result.

use serde::{Deserialize, Serialize};

/// Account identifier as written in instructions and request documents
pub type AccountId = String;

/// Balance in the smallest currency unit (kobo, cents, pence, pesewas)
pub type Balance = u64;

/// Caller-supplied account record
///
/// Accounts arrive fresh with every request and are only ever read by the
/// engine. Any balance change is reflected in an [`AccountSnapshot`], never
/// in the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier (non-empty)
    pub id: AccountId,

    /// Current balance in the smallest currency unit
    pub balance: Balance,

    /// Three-letter currency code, compared case-insensitively
    pub currency: String,
}

impl Account {
    /// Create a new account record
    pub fn new(id: impl Into<AccountId>, balance: Balance, currency: impl Into<String>) -> Self {
        Account {
            id: id.into(),
            balance,
            currency: currency.into(),
        }
    }

    /// Whether this account is held in `currency` (case-insensitive)
    pub fn holds_currency(&self, currency: &str) -> bool {
        self.currency.eq_ignore_ascii_case(currency)
    }
}

/// Owned copy of an involved account, as reported in a result
///
/// `balance` differs from `balance_before` only when the transfer executed.
/// The currency is always normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub balance: Balance,
    pub balance_before: Balance,
    pub currency: String,
}

impl From<&Account> for AccountSnapshot {
    fn from(account: &Account) -> Self {
        AccountSnapshot {
            id: account.id.clone(),
            balance: account.balance,
            balance_before: account.balance,
            currency: account.currency.to_uppercase(),
        }
    }
}
