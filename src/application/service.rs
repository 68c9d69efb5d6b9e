use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Cents, Friend, FriendId, Ledger, Payer};

use super::AppError;

/// Base avatar used when a friend is added without an explicit image.
pub const DEFAULT_AVATAR: &str = "https://i.pravatar.cc/48";

/// Application service providing high-level operations for the ledger.
/// This is the primary interface for any client (CLI session, tests, etc.).
pub struct LedgerService {
    ledger: Ledger,
}

/// Result of splitting a bill
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub friend: Friend,
    pub previous_balance: Cents,
    pub delta: Cents,
}

impl LedgerService {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    /// A service with no friends at all.
    pub fn empty() -> Self {
        Self::new(Ledger::new())
    }

    /// A service seeded with [`default_friends`].
    pub fn with_default_friends() -> Self {
        let seed = default_friends();
        debug!(count = seed.len(), "Seeding ledger with default friends");
        // Fresh v4 ids never collide
        Self::new(Ledger::with_friends(seed).unwrap_or_default())
    }

    /// Build a service from a seed set loaded elsewhere.
    pub fn from_seed(seed: Vec<Friend>) -> Result<Self, AppError> {
        let ledger = Ledger::with_friends(seed)?;
        info!(count = ledger.len(), "Ledger seeded");
        Ok(Self::new(ledger))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn list_friends(&self) -> &[Friend] {
        self.ledger.friends()
    }

    pub fn selected(&self) -> Option<&Friend> {
        self.ledger.selected()
    }

    /// Resolve a friend by full id or by case-insensitive name.
    pub fn find_friend(&self, reference: &str) -> Result<&Friend, AppError> {
        let reference = reference.trim();
        if let Ok(id) = Uuid::parse_str(reference) {
            if let Some(friend) = self.ledger.get(id) {
                return Ok(friend);
            }
        }

        let matches: Vec<&Friend> = self
            .ledger
            .friends()
            .iter()
            .filter(|f| f.name.eq_ignore_ascii_case(reference))
            .collect();

        match matches.as_slice() {
            [friend] => Ok(friend),
            [] => Err(AppError::FriendNotFound(reference.to_string())),
            many => Err(AppError::AmbiguousFriend {
                name: reference.to_string(),
                count: many.len(),
            }),
        }
    }

    fn resolve_id(&self, reference: &str) -> Result<FriendId, AppError> {
        self.find_friend(reference).map(|f| f.id)
    }

    // ========================
    // Ledger operations
    // ========================

    /// Add a friend with a zero balance.
    pub fn add_friend(&mut self, name: &str, image_ref: &str) -> Result<Friend, AppError> {
        match self.ledger.add_friend(name, image_ref) {
            Ok(friend) => {
                info!(friend_id = %friend.id, name = %friend.name, "Friend added");
                Ok(friend)
            }
            Err(e) => {
                debug!(error = %e, "Add friend rejected");
                Err(e.into())
            }
        }
    }

    /// Toggle the selection on a friend.
    pub fn select_friend(&mut self, reference: &str) -> Result<Option<Friend>, AppError> {
        let id = self.resolve_id(reference)?;
        let selected = self.ledger.select_friend(id)?;
        match &selected {
            Some(friend) => info!(friend_id = %friend.id, name = %friend.name, "Friend selected"),
            None => info!(friend_id = %id, "Selection cleared"),
        }
        Ok(selected)
    }

    /// Split a bill with the given friend.
    pub fn split_bill(
        &mut self,
        reference: &str,
        total_bill: Cents,
        user_expense: Cents,
        payer: Payer,
    ) -> Result<SplitResult, AppError> {
        let id = self.resolve_id(reference)?;
        self.split_by_id(id, total_bill, user_expense, payer)
    }

    /// Split a bill with the currently selected friend.
    pub fn split_selected(
        &mut self,
        total_bill: Cents,
        user_expense: Cents,
        payer: Payer,
    ) -> Result<SplitResult, AppError> {
        let id = self.ledger.selected().map(|f| f.id).ok_or(AppError::NoSelection)?;
        self.split_by_id(id, total_bill, user_expense, payer)
    }

    fn split_by_id(
        &mut self,
        id: FriendId,
        total_bill: Cents,
        user_expense: Cents,
        payer: Payer,
    ) -> Result<SplitResult, AppError> {
        let previous_balance = self
            .ledger
            .get(id)
            .map(|f| f.balance)
            .unwrap_or_default();

        match self.ledger.split_bill(id, total_bill, user_expense, payer) {
            Ok(friend) => {
                let delta = friend.balance - previous_balance;
                info!(
                    friend_id = %friend.id,
                    name = %friend.name,
                    total_bill,
                    user_expense,
                    payer = %payer,
                    delta,
                    balance = friend.balance,
                    "Bill split"
                );
                Ok(SplitResult {
                    friend,
                    previous_balance,
                    delta,
                })
            }
            Err(e) => {
                debug!(friend_id = %id, error = %e, "Split rejected");
                Err(e.into())
            }
        }
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::with_default_friends()
    }
}

/// The friends every new session starts with.
pub fn default_friends() -> Vec<Friend> {
    [("Clark", 118836, -700), ("Sarah", 933372, 2000), ("Anthony", 499476, 0)]
        .into_iter()
        .map(|(name, avatar, balance)| {
            Friend::new(name, format!("{}?u={}", DEFAULT_AVATAR, avatar)).with_balance(balance)
        })
        .collect()
}
