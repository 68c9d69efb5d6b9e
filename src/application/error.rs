use thiserror::Error;

use crate::domain::LedgerError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Friend not found: {0}")]
    FriendNotFound(String),

    #[error("Several friends are named '{name}', use an id instead ({count} matches)")]
    AmbiguousFriend { name: String, count: usize },

    #[error("No friend selected")]
    NoSelection,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl AppError {
    /// True for errors caused by the caller's input rather than ledger state.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AppError::Ledger(LedgerError::InvalidInput(_)))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::FriendNotFound(_) | AppError::Ledger(LedgerError::NotFound(_))
        )
    }
}
