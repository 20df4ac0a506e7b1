use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::operations::apply_transfer_reversal;
use crate::domain::{
    Account, AccountConfig, AccountId, AccountVariant, LedgerError, MaturityInfo, Money, Rate,
    Transaction, apply_break, apply_close, apply_deposit, apply_interest, apply_maturity,
    apply_transfer_in, apply_transfer_out, apply_withdrawal,
};
use crate::storage::{AccountStore, ConcurrentAccountStore};

/// Ledger registry: owns every account, allocates ids and composes
/// cross-account operations.
///
/// Every method is synchronous, performs no I/O and never logs.
pub struct Bank<S: AccountStore = ConcurrentAccountStore> {
    name: String,
    store: S,
    next_id: AtomicU64,
    break_penalty: Rate,
}

impl Bank<ConcurrentAccountStore> {
    /// Create a bank backed by per-account locks
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_store(name, ConcurrentAccountStore::new())
    }
}

impl<S: AccountStore> Bank<S> {
    pub const DEFAULT_FIRST_ACCOUNT_NUMBER: u64 = 1001;
    pub const DEFAULT_BREAK_PENALTY: Rate = Rate::percent(1);

    /// Create a bank over any storage backend
    pub fn with_store(name: impl Into<String>, store: S) -> Self {
        Self {
            name: name.into(),
            store,
            next_id: AtomicU64::new(Self::DEFAULT_FIRST_ACCOUNT_NUMBER),
            break_penalty: Self::DEFAULT_BREAK_PENALTY,
        }
    }

    /// Number given to the first account opened (defaults to 1001)
    pub fn with_first_account_number(mut self, number: u64) -> Self {
        *self.next_id.get_mut() = number;
        self
    }

    /// Penalty withheld when a fixed deposit is broken early (defaults to 1%)
    pub fn with_break_penalty(mut self, penalty: Rate) -> Self {
        self.break_penalty = penalty;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn break_penalty(&self) -> Rate {
        self.break_penalty
    }

    /// Get reference to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open an account and return its new id.
    ///
    /// The configuration is validated before an id is allocated, so a
    /// rejected request does not consume a number.
    pub fn create_account(
        &self,
        config: AccountConfig,
        holder: impl Into<String>,
        initial_balance: Money,
    ) -> Result<AccountId, LedgerError> {
        let variant = AccountVariant::from_config(config, initial_balance)?;
        let id = self.allocate_id()?;

        self.store
            .insert(Account::open(id, holder.into(), variant, initial_balance));
        Ok(id)
    }

    fn allocate_id(&self) -> Result<AccountId, LedgerError> {
        self.next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map(AccountId::new)
            .map_err(|_| LedgerError::Overflow)
    }

    /// Snapshot of one account
    pub fn get_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.store.read(id)
    }

    pub fn balance(&self, id: AccountId) -> Result<Money, LedgerError> {
        self.store.inspect(id, Account::balance)
    }

    pub fn deposit(&self, id: AccountId, amount: Money) -> Result<Money, LedgerError> {
        self.store
            .try_update(id, |account| apply_deposit(account, amount))
    }

    pub fn withdraw(&self, id: AccountId, amount: Money) -> Result<Money, LedgerError> {
        self.store
            .try_update(id, |account| apply_withdrawal(account, amount))
    }

    /// Move `amount` from one account to another, all or nothing.
    ///
    /// A failed withdrawal side changes neither account. Should the deposit
    /// side fail after the debit, the source is credited back with a
    /// `TransferReversal` entry before the deposit error is returned.
    pub fn transfer(&self, from: AccountId, to: AccountId, amount: Money) -> Result<(), LedgerError> {
        for id in [from, to] {
            if !self.store.contains(id) {
                return Err(LedgerError::NotFound(id));
            }
        }
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }
        if from == to {
            return Err(LedgerError::SameAccountTransfer);
        }

        self.store.try_update_pair(from, to, |source, destination| {
            apply_transfer_out(source, amount)?;
            if let Err(err) = apply_transfer_in(destination, amount) {
                apply_transfer_reversal(source, amount);
                return Err(err);
            }
            Ok(())
        })
    }

    /// Credit savings interest; returns the interest amount
    pub fn add_interest(&self, id: AccountId) -> Result<Money, LedgerError> {
        self.store.try_update(id, apply_interest)
    }

    /// Break a fixed deposit early; returns the payout after penalty
    pub fn break_fd(&self, id: AccountId) -> Result<Money, LedgerError> {
        let penalty = self.break_penalty;
        self.store
            .try_update(id, |account| apply_break(account, penalty))
    }

    /// Mature a fixed deposit; returns the maturity amount
    pub fn mature_fd(&self, id: AccountId) -> Result<Money, LedgerError> {
        self.store.try_update(id, apply_maturity)
    }

    pub fn close_account(&self, id: AccountId) -> Result<(), LedgerError> {
        self.store.try_update(id, apply_close)
    }

    pub fn maturity_info(&self, id: AccountId) -> Result<MaturityInfo, LedgerError> {
        self.store.inspect(id, Account::maturity_info)?
    }

    /// Trailing `last_n` entries of an account's log, oldest first
    pub fn get_statement(
        &self,
        id: AccountId,
        last_n: Option<usize>,
    ) -> Result<Vec<Transaction>, LedgerError> {
        self.store.inspect(id, |account| account.statement(last_n))
    }

    /// Sum of balances over active accounts
    pub fn total_deposits(&self) -> Result<Money, LedgerError> {
        self.store.fold(Ok(Money::ZERO), |total, account| {
            let total = total?;
            if !account.is_active() {
                return Ok(total);
            }
            total
                .checked_add(account.balance())
                .ok_or(LedgerError::Overflow)
        })
    }

    /// Every account, closed ones included, by ascending id
    pub fn list_accounts(&self) -> Vec<Account> {
        self.store.snapshot()
    }

    pub fn account_count(&self) -> usize {
        self.store.len()
    }
}
