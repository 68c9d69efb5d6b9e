use serde::{Deserialize, Serialize};

use super::{Cents, LedgerError};

/// Who paid the bill up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    User,
    Friend,
}

impl Payer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Payer::User => "user",
            Payer::Friend => "friend",
        }
    }
}

impl std::str::FromStr for Payer {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Payer::User),
            "friend" => Ok(Payer::Friend),
            other => Err(LedgerError::invalid(format!(
                "unrecognized payer '{}', expected 'user' or 'friend'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Payer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated bill shared between the user and one friend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSplit {
    pub total: Cents,
    pub user_expense: Cents,
    pub payer: Payer,
}

impl BillSplit {
    /// Requires `total > 0` and `0 <= user_expense <= total`.
    pub fn new(total: Cents, user_expense: Cents, payer: Payer) -> Result<Self, LedgerError> {
        if total <= 0 {
            return Err(LedgerError::invalid(format!(
                "bill total must be positive, got {} cents",
                total
            )));
        }
        if user_expense < 0 || user_expense > total {
            return Err(LedgerError::invalid(format!(
                "your expense must be between 0 and {} cents, got {}",
                total, user_expense
            )));
        }
        Ok(Self {
            total,
            user_expense,
            payer,
        })
    }

    pub fn friend_expense(&self) -> Cents {
        self.total - self.user_expense
    }

    /// Signed change to the friend's balance.
    /// If the user paid, the friend now owes their share; if the friend
    /// paid, the user owes theirs.
    pub fn delta(&self) -> Cents {
        match self.payer {
            Payer::User => self.friend_expense(),
            Payer::Friend => -self.user_expense,
        }
    }
}
