pub mod bank;
pub mod command;

// Re-export commonly used types
pub use bank::Bank;
pub use command::{Command, Outcome};
