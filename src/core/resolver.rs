//! Account resolution
//!
//! Looks up the debit and credit accounts named by an instruction in the
//! caller-supplied account list. The list is only read: everything the
//! resolver returns is an owned copy, so later stages can never write
//! through to caller data.

use crate::types::{Account, AccountId, AccountSnapshot, Instruction};

/// An account found in the supplied list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccount {
    /// Index of the account in the supplied list
    pub position: usize,

    /// Owned copy of the account record
    pub account: Account,
}

impl ResolvedAccount {
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot::from(&self.account)
    }
}

/// Both accounts of an instruction, resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPair {
    pub debit: ResolvedAccount,
    pub credit: ResolvedAccount,
}

impl ResolvedPair {
    /// Order two per-account values as the accounts appear in the supplied list
    pub fn in_supplied_order<T>(&self, debit: T, credit: T) -> Vec<T> {
        if self.debit.position <= self.credit.position {
            vec![debit, credit]
        } else {
            vec![credit, debit]
        }
    }

    /// Snapshots in debit, credit order
    pub fn declared_snapshots(&self) -> Vec<AccountSnapshot> {
        vec![self.debit.snapshot(), self.credit.snapshot()]
    }

    /// Snapshots in supplied-list order
    pub fn supplied_snapshots(&self) -> Vec<AccountSnapshot> {
        self.in_supplied_order(self.debit.snapshot(), self.credit.snapshot())
    }
}

/// Outcome of resolving an instruction's accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Both accounts were found
    Resolved(ResolvedPair),

    /// At least one account is missing
    Missing {
        /// The first missing id, debit before credit
        missing: AccountId,

        /// Every supplied account whose id matches either requested id, in
        /// supplied order
        matched: Vec<Account>,
    },
}

fn find(accounts: &[Account], id: &str) -> Option<ResolvedAccount> {
    accounts
        .iter()
        .position(|account| account.id == id)
        .map(|position| ResolvedAccount {
            position,
            account: accounts[position].clone(),
        })
}

/// Resolve the debit and credit accounts of `instruction`
///
/// Ids match exactly (case-sensitive); the first matching entry wins.
pub fn resolve(accounts: &[Account], instruction: &Instruction) -> Resolution {
    let debit = find(accounts, &instruction.debit_account);
    let credit = find(accounts, &instruction.credit_account);

    match (debit, credit) {
        (Some(debit), Some(credit)) => Resolution::Resolved(ResolvedPair { debit, credit }),
        (debit, _) => {
            let missing = if debit.is_none() {
                instruction.debit_account.clone()
            } else {
                instruction.credit_account.clone()
            };

            let matched = accounts
                .iter()
                .filter(|account| {
                    account.id == instruction.debit_account
                        || account.id == instruction.credit_account
                })
                .cloned()
                .collect();

            Resolution::Missing { missing, matched }
        }
    }
}
