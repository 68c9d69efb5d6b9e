use std::collections::HashSet;

use uuid::Uuid;

use super::{BillSplit, Cents, Friend, FriendId, LedgerError, Payer};

/// The friend list with running balances and the current selection.
///
/// Friends are kept in insertion order, which is also display order.
/// Balances only change through [`Ledger::split_bill`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    friends: Vec<Friend>,
    selected: Option<FriendId>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from a seed set. Ids must be unique.
    pub fn with_friends(seed: Vec<Friend>) -> Result<Self, LedgerError> {
        let mut seen = HashSet::with_capacity(seed.len());
        for friend in &seed {
            if !seen.insert(friend.id) {
                return Err(LedgerError::DuplicateId(friend.id));
            }
        }
        Ok(Self {
            friends: seed,
            selected: None,
        })
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    pub fn get(&self, id: FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| f.id == id)
    }

    /// The active friend, if any.
    pub fn selected(&self) -> Option<&Friend> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Append a friend with a fresh id and a zero balance.
    pub fn add_friend(&mut self, name: &str, image_ref: &str) -> Result<Friend, LedgerError> {
        let name = name.trim();
        let image_ref = image_ref.trim();
        if name.is_empty() {
            return Err(LedgerError::invalid("friend name must not be empty"));
        }
        if image_ref.is_empty() {
            return Err(LedgerError::invalid("image reference must not be empty"));
        }

        let friend = Friend::with_id(self.fresh_id(), name, image_ref);
        self.friends.push(friend.clone());
        Ok(friend)
    }

    /// Toggle the selection. Returns the newly active friend, or `None` when
    /// the friend was already active and got deselected.
    pub fn select_friend(&mut self, id: FriendId) -> Result<Option<Friend>, LedgerError> {
        let friend = self.get(id).cloned().ok_or(LedgerError::NotFound(id))?;

        if self.selected == Some(id) {
            self.selected = None;
            Ok(None)
        } else {
            self.selected = Some(id);
            Ok(Some(friend))
        }
    }

    /// Apply a bill split to one friend's balance and clear the selection.
    /// Nothing changes if the id is unknown or the amounts are invalid.
    pub fn split_bill(
        &mut self,
        friend_id: FriendId,
        total_bill: Cents,
        user_expense: Cents,
        payer: Payer,
    ) -> Result<Friend, LedgerError> {
        let index = self
            .friends
            .iter()
            .position(|f| f.id == friend_id)
            .ok_or(LedgerError::NotFound(friend_id))?;
        let split = BillSplit::new(total_bill, user_expense, payer)?;

        let friend = &mut self.friends[index];
        let delta = split.delta();
        let balance = friend
            .balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::BalanceOverflow {
                name: friend.name.clone(),
                balance: friend.balance,
                delta,
            })?;
        friend.balance = balance;

        let updated = friend.clone();
        self.selected = None;
        Ok(updated)
    }

    fn fresh_id(&self) -> FriendId {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}
