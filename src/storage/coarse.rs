use parking_lot::RwLock;

use super::traits::AccountStore;
use crate::domain::{Account, AccountId, LedgerError};

/// Account store behind a single registry-wide lock.
///
/// Accounts live in a vector kept sorted by id, so enumeration order is
/// insertion order and lookups are a binary search. Simpler than
/// [`ConcurrentAccountStore`](super::ConcurrentAccountStore) but serializes
/// every mutation.
#[derive(Default)]
pub struct CoarseAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl CoarseAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
        }
    }
}

fn position(accounts: &[Account], id: AccountId) -> Result<usize, LedgerError> {
    accounts
        .binary_search_by_key(&id, Account::id)
        .map_err(|_| LedgerError::NotFound(id))
}

impl AccountStore for CoarseAccountStore {
    fn insert(&self, account: Account) {
        let mut accounts = self.accounts.write();
        // Concurrent creators may finish out of id order
        let at = accounts.partition_point(|existing| existing.id() < account.id());
        accounts.insert(at, account);
    }

    fn contains(&self, id: AccountId) -> bool {
        position(&self.accounts.read(), id).is_ok()
    }

    fn len(&self) -> usize {
        self.accounts.read().len()
    }

    fn inspect<R, F>(&self, id: AccountId, inspect_fn: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&Account) -> R,
    {
        let accounts = self.accounts.read();
        let index = position(&accounts, id)?;
        Ok(inspect_fn(&accounts[index]))
    }

    fn try_update<R, F>(&self, id: AccountId, update_fn: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<R, LedgerError>,
    {
        let mut accounts = self.accounts.write();
        let index = position(&accounts, id)?;
        update_fn(&mut accounts[index])
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

        let mut accounts = self.accounts.write();
        let first_index = position(&accounts, first)?;
        let second_index = position(&accounts, second)?;

        if first_index < second_index {
            let (head, tail) = accounts.split_at_mut(second_index);
            update_fn(&mut head[first_index], &mut tail[0])
        } else {
            let (head, tail) = accounts.split_at_mut(first_index);
            update_fn(&mut tail[0], &mut head[second_index])
        }
    }

    fn snapshot(&self) -> Vec<Account> {
        self.accounts.read().clone()
    }

    fn fold<B, F>(&self, init: B, fold_fn: F) -> B
    where
        F: FnMut(B, &Account) -> B,
    {
        self.accounts.read().iter().fold(init, fold_fn)
    }
}
