//! In-memory ledger engine: typed accounts with variant-specific rules, an
//! append-only transaction log per account, and atomic cross-account transfers.

pub mod domain;
pub mod engine;
pub mod prelude;
pub mod storage;
pub mod streaming;
