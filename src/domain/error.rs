use thiserror::Error;

use super::{Cents, FriendId};

/// Errors raised by the balance ledger. All of them are recoverable: the
/// ledger is left exactly as it was before the rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Friend not found: {0}")]
    NotFound(FriendId),

    #[error("Duplicate friend id: {0}")]
    DuplicateId(FriendId),

    #[error("Balance of {name} would overflow: {balance} + {delta} cents")]
    BalanceOverflow {
        name: String,
        balance: Cents,
        delta: Cents,
    },
}

impl LedgerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        LedgerError::InvalidInput(message.into())
    }
}
