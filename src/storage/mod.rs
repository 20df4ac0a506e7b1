pub mod coarse;
pub mod concurrent;
pub mod traits;

// Re-export commonly used types
pub use coarse::CoarseAccountStore;
pub use concurrent::ConcurrentAccountStore;
pub use traits::AccountStore;
