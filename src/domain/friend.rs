use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, format_abs};

pub type FriendId = Uuid;

/// A participant in the ledger.
///
/// The sign of `balance` says who owes whom: negative means the user owes
/// this friend, positive means the friend owes the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    /// Avatar reference, stored as given and never interpreted
    pub image_ref: String,
    pub balance: Cents,
}

impl Friend {
    pub fn new(name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, image_ref)
    }

    pub fn with_id(id: FriendId, name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_ref: image_ref.into(),
            balance: 0,
        }
    }

    pub fn with_balance(mut self, balance: Cents) -> Self {
        self.balance = balance;
        self
    }

    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::of(self.balance)
    }

    /// One-line summary of the balance, e.g. "You owe Clark $7.00".
    pub fn describe_balance(&self) -> String {
        match self.status() {
            BalanceStatus::YouOwe(amount) => {
                format!("You owe {} ${}", self.name, format_abs(amount))
            }
            BalanceStatus::OwesYou(amount) => {
                format!("{} owes you ${}", self.name, format_abs(amount))
            }
            BalanceStatus::Even => format!("You and {} are even", self.name),
        }
    }
}

/// Who owes whom, carrying the absolute amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum BalanceStatus {
    YouOwe(Cents),
    OwesYou(Cents),
    Even,
}

impl BalanceStatus {
    pub fn of(balance: Cents) -> Self {
        match balance {
            b if b < 0 => BalanceStatus::YouOwe(b.saturating_abs()),
            b if b > 0 => BalanceStatus::OwesYou(b),
            _ => BalanceStatus::Even,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceStatus::YouOwe(_) => "you_owe",
            BalanceStatus::OwesYou(_) => "owes_you",
            BalanceStatus::Even => "even",
        }
    }
}

impl std::fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
