use tracing::{error, warn};

use crate::domain::LedgerError;
use crate::engine::Command;

/// Policy for handling rejected commands during stream processing
pub trait ErrorPolicy: Send + Sync {
    /// Handle a command the ledger rejected.
    /// Return true to continue processing, false to abort
    fn handle_ledger_error(&self, command: &Command, error: LedgerError) -> bool;
}

/// Skip rejected commands and continue processing (logged as warnings)
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipErrors;

impl ErrorPolicy for SkipErrors {
    fn handle_ledger_error(&self, command: &Command, error: LedgerError) -> bool {
        warn!(
            command = command.name(),
            account = ?command.account(),
            to = ?command.counterparty(),
            %error,
            "Command rejected (skipping)"
        );
        true
    }
}

/// Abort on first rejected command
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortOnError;

impl ErrorPolicy for AbortOnError {
    fn handle_ledger_error(&self, command: &Command, error: LedgerError) -> bool {
        error!(
            command = command.name(),
            account = ?command.account(),
            to = ?command.counterparty(),
            %error,
            "Command rejected (aborting)"
        );
        false
    }
}

/// Silent error policy - skip rejected commands without logging
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSkip;

impl ErrorPolicy for SilentSkip {
    fn handle_ledger_error(&self, _command: &Command, _error: LedgerError) -> bool {
        true
    }
}
