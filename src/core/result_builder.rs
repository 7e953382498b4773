//! Result assembly
//!
//! Turns a pipeline verdict into the `TransactionResult` returned to the
//! caller. Executing a cleared transfer happens here, on snapshot copies
//! only: the caller's account list is never touched.

use tracing::error;

use crate::core::pipeline::Verdict;
use crate::core::resolver::ResolvedPair;
use crate::types::{AccountSnapshot, Amount, Instruction, Rejection, StatusCode, TransactionResult};

const SCHEDULED_REASON: &str = "Transaction scheduled for future execution";
const EXECUTED_REASON: &str = "Transaction executed successfully";

/// Result for an instruction that did not match the grammar
pub fn malformed() -> TransactionResult {
    let rejection = Rejection::Malformed;
    TransactionResult::without_instruction(rejection.status_code(), rejection.to_string())
}

/// Build the result for `instruction` from the pipeline's verdict
pub fn build(instruction: &Instruction, verdict: Verdict) -> TransactionResult {
    match verdict {
        Verdict::Rejected {
            rejection,
            accounts,
        } => TransactionResult::for_instruction(
            instruction,
            rejection.status_code(),
            rejection.to_string(),
            accounts,
        ),
        Verdict::Scheduled(pair) => TransactionResult::for_instruction(
            instruction,
            StatusCode::AP02,
            SCHEDULED_REASON,
            pair.supplied_snapshots(),
        ),
        Verdict::Cleared(pair) => match execute(&pair, instruction.amount) {
            Some(accounts) => TransactionResult::for_instruction(
                instruction,
                StatusCode::AP00,
                EXECUTED_REASON,
                accounts,
            ),
            None => {
                error!(
                    debit = %instruction.debit_account,
                    credit = %instruction.credit_account,
                    amount = instruction.amount,
                    "balance arithmetic overflowed while executing transfer"
                );
                TransactionResult::internal_error()
            }
        },
    }
}

/// Apply the transfer to snapshot copies of both accounts
///
/// Returns `None` if either balance would leave the `u64` range.
fn execute(pair: &ResolvedPair, amount: Amount) -> Option<Vec<AccountSnapshot>> {
    let mut debit = pair.debit.snapshot();
    let mut credit = pair.credit.snapshot();

    debit.balance = debit.balance.checked_sub(amount)?;
    credit.balance = credit.balance.checked_add(amount)?;

    Some(pair.in_supplied_order(debit, credit))
}
