use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use super::traits::AccountStore;
use crate::domain::{Account, AccountId, LedgerError};

type SharedAccount = Arc<RwLock<Account>>;

/// Concurrent in-memory account store: a DashMap of individually locked accounts.
///
/// The map's shard locks are only held long enough to clone an account
/// handle; the per-account lock is taken after the shard lock is released.
pub struct ConcurrentAccountStore {
    accounts: DashMap<AccountId, SharedAccount>,
}

impl ConcurrentAccountStore {
    /// Create a new empty concurrent account store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    fn handle(&self, id: AccountId) -> Result<SharedAccount, LedgerError> {
        self.accounts
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(LedgerError::NotFound(id))
    }

    /// Handles of every account, ascending by id
    fn handles(&self) -> Vec<(AccountId, SharedAccount)> {
        let mut handles: Vec<_> = self
            .accounts
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();
        handles.sort_unstable_by_key(|(id, _)| *id);
        handles
    }
}

impl Default for ConcurrentAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for ConcurrentAccountStore {
    fn insert(&self, account: Account) {
        self.accounts
            .insert(account.id(), Arc::new(RwLock::new(account)));
    }

    fn contains(&self, id: AccountId) -> bool {
        self.accounts.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }

    fn inspect<R, F>(&self, id: AccountId, inspect_fn: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&Account) -> R,
    {
        let handle = self.handle(id)?;
        let account = handle.read();
        Ok(inspect_fn(&*account))
    }

    fn try_update<R, F>(&self, id: AccountId, update_fn: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<R, LedgerError>,
    {
        let handle = self.handle(id)?;
        let mut account = handle.write();
        update_fn(&mut *account)
    }

    fn try_update_pair<R, F>(
        &self,
        first: AccountId,
        second: AccountId,
        update_fn: F,
    ) -> Result<R, LedgerError>
    where
        F: FnOnce(&mut Account, &mut Account) -> Result<R, LedgerError>,
    {
        if first == second {
            return Err(LedgerError::SameAccountTransfer);
        }

        let first_handle = self.handle(first)?;
        let second_handle = self.handle(second)?;

        // Fixed lock order prevents deadlock between opposing transfers
        let (mut first_account, mut second_account) = if first < second {
            let first_guard = first_handle.write();
            let second_guard = second_handle.write();
            (first_guard, second_guard)
        } else {
            let second_guard = second_handle.write();
            let first_guard = first_handle.write();
            (first_guard, second_guard)
        };

        update_fn(&mut *first_account, &mut *second_account)
    }

    fn snapshot(&self) -> Vec<Account> {
        self.handles()
            .into_iter()
            .map(|(_, handle)| handle.read().clone())
            .collect()
    }

    fn fold<B, F>(&self, init: B, mut fold_fn: F) -> B
    where
        F: FnMut(B, &Account) -> B,
    {
        self.handles()
            .into_iter()
            .fold(init, |acc, (_, handle)| fold_fn(acc, &*handle.read()))
    }
}
