//! Prelude module for convenient imports
//!
//! Import everything you need with: `use ledger::prelude::*;`

// Domain types
pub use crate::domain::{
    Account, AccountConfig, AccountId, AccountKind, AccountStatus, AccountVariant, LedgerError,
    MaturityInfo, Money, Rate, Transaction, TransactionKind, TransactionLog,
};

// Storage types
pub use crate::storage::{AccountStore, CoarseAccountStore, ConcurrentAccountStore};

// Engine types
pub use crate::engine::{Bank, Command, Outcome};

// Streaming types
pub use crate::streaming::{AbortOnError, CommandSession, ErrorPolicy, SilentSkip, SkipErrors};
