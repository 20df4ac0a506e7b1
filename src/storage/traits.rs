use crate::domain::{Account, AccountId, LedgerError};

/// Storage backend for the registry's accounts.
///
/// Only the registry inserts; nothing is ever removed. Every access to a
/// single account is serialized against mutations of that account, so a
/// reader sees an operation either fully applied or not at all.
pub trait AccountStore: Send + Sync {
    /// Register a freshly opened account under its (unused) id
    fn insert(&self, account: Account);

    /// Check if an account exists
    fn contains(&self, id: AccountId) -> bool;

    /// Number of accounts, closed ones included
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consistent snapshot of one account (clones the account data)
    fn read(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.inspect(id, Account::clone)
    }

    /// Shared access to one account without cloning it
    fn inspect<R, F>(&self, id: AccountId, inspect_fn: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&Account) -> R;

    /// Atomic read-modify-write of one account
    fn try_update<R, F>(&self, id: AccountId, update_fn: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<R, LedgerError>;

    /// Atomic read-modify-write of two distinct accounts.
    ///
    /// Both are held exclusively for the whole closure, acquired in ascending
    /// id order; the closure receives them in argument order.
    fn try_update_pair<R, F>(
        &self,
        first: AccountId,
        second: AccountId,
        update_fn: F,
    ) -> Result<R, LedgerError>
    where
        F: FnOnce(&mut Account, &mut Account) -> Result<R, LedgerError>;

    /// Snapshot of every account, ordered by ascending id
    fn snapshot(&self) -> Vec<Account>;

    /// Fold over every account, each seen in a consistent state
    fn fold<B, F>(&self, init: B, fold_fn: F) -> B
    where
        F: FnMut(B, &Account) -> B;
}
