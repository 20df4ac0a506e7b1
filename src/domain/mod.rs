pub mod account;
pub mod amount;
pub mod error;
pub mod operations;
pub mod rate;
pub mod transaction;

// Re-export commonly used types
pub use account::{
    Account, AccountConfig, AccountId, AccountKind, AccountStatus, AccountVariant, MaturityInfo,
};
pub use amount::Money;
pub use error::LedgerError;
pub use operations::{
    apply_break, apply_close, apply_deposit, apply_interest, apply_maturity, apply_transfer_in,
    apply_transfer_out, apply_withdrawal,
};
pub use rate::Rate;
pub use transaction::{Transaction, TransactionKind, TransactionLog};
