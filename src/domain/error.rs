use thiserror::Error;

use super::account::AccountId;

/// Business outcomes a ledger operation can fail with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Account is not active")]
    AccountClosed,

    #[error("Account is already closed")]
    AlreadyClosed,

    #[error("Operation not supported for this account type")]
    UnsupportedOperation,

    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,

    #[error("Invalid account configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Arithmetic overflow")]
    Overflow,
}
