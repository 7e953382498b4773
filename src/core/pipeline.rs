//! Validation pipeline
//!
//! The ordered cascade of business rules applied to a parsed instruction.
//! The first rule that applies decides the outcome; the order is part of the
//! contract because one instruction can break several rules at once.
//!
//! | Order | Rule                                   | Code |
//! |-------|----------------------------------------|------|
//! | 1     | both accounts exist                    | AC03 |
//! | 2     | both accounts hold the instruction currency | CU01 |
//! | 3     | the currency is supported              | CU02 |
//! | 4     | debit and credit differ                | AC02 |
//! | 5     | the execution date is valid            | DT01 |
//! | 6     | the execution date is not in the future| AP02 |
//! | 7     | the debit account covers the amount    | AC01 |
//!
//! Parse failure (SY03) is decided before the pipeline runs. An instruction
//! that clears every rule is executed by the result builder (AP00).

use chrono::NaiveDate;

use crate::core::resolver::{resolve, Resolution, ResolvedPair};
use crate::core::validators::parse_execution_date;
use crate::types::{Account, AccountSnapshot, Instruction, Rejection};

/// Decision reached by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A rule refused the instruction
    Rejected {
        rejection: Rejection,
        accounts: Vec<AccountSnapshot>,
    },

    /// Valid, but dated after today
    Scheduled(ResolvedPair),

    /// Valid and due: ready to execute
    Cleared(ResolvedPair),
}

impl Verdict {
    fn rejected(rejection: Rejection, accounts: Vec<AccountSnapshot>) -> Self {
        Verdict::Rejected {
            rejection,
            accounts,
        }
    }
}

fn currencies_match(pair: &ResolvedPair, instruction: &Instruction) -> bool {
    let currency = instruction.currency.as_str();
    pair.debit.account.holds_currency(currency) && pair.credit.account.holds_currency(currency)
}

/// Run the cascade for `instruction` against `accounts`
///
/// `today` is the current UTC calendar day; an instruction dated today is
/// due now.
pub fn run(accounts: &[Account], instruction: &Instruction, today: NaiveDate) -> Verdict {
    let pair = match resolve(accounts, instruction) {
        Resolution::Resolved(pair) => pair,
        Resolution::Missing { missing, matched } => {
            return Verdict::rejected(
                Rejection::account_not_found(&missing),
                matched.iter().map(AccountSnapshot::from).collect(),
            );
        }
    };

    if !currencies_match(&pair, instruction) {
        return Verdict::rejected(Rejection::CurrencyMismatch, pair.declared_snapshots());
    }

    if instruction.currency.supported().is_none() {
        return Verdict::rejected(Rejection::UnsupportedCurrency, pair.declared_snapshots());
    }

    if instruction.debit_account == instruction.credit_account {
        return Verdict::rejected(Rejection::SameAccount, vec![pair.debit.snapshot()]);
    }

    let execute_by = match instruction.execute_by.as_deref() {
        None => None,
        Some(raw) => match parse_execution_date(raw) {
            Some(date) => Some(date),
            None => {
                return Verdict::rejected(Rejection::InvalidDate, pair.declared_snapshots());
            }
        },
    };

    if execute_by.is_some_and(|date| date > today) {
        return Verdict::Scheduled(pair);
    }

    if pair.debit.account.balance < instruction.amount {
        let rejection = Rejection::insufficient_funds(
            &instruction.debit_account,
            pair.debit.account.balance,
            instruction.amount,
            &instruction.currency,
        );
        return Verdict::rejected(rejection, pair.supplied_snapshots());
    }

    Verdict::Cleared(pair)
}
