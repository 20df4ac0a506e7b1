use serde::{Deserialize, Serialize};

use super::bank::Bank;
use crate::domain::{AccountConfig, AccountId, LedgerError, Money, Transaction};
use crate::storage::AccountStore;

/// One request against the ledger, as sent by a driving collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    CreateAccount {
        config: AccountConfig,
        holder: String,
        initial_balance: Money,
    },
    Deposit {
        id: AccountId,
        amount: Money,
    },
    Withdraw {
        id: AccountId,
        amount: Money,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Money,
    },
    AddInterest {
        id: AccountId,
    },
    BreakFd {
        id: AccountId,
    },
    MatureFd {
        id: AccountId,
    },
    CloseAccount {
        id: AccountId,
    },
    GetStatement {
        id: AccountId,
        last_n: Option<usize>,
    },
    TotalDeposits,
}

impl Command {
    /// Short operation name, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAccount { .. } => "create_account",
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::Transfer { .. } => "transfer",
            Self::AddInterest { .. } => "add_interest",
            Self::BreakFd { .. } => "break_fd",
            Self::MatureFd { .. } => "mature_fd",
            Self::CloseAccount { .. } => "close_account",
            Self::GetStatement { .. } => "get_statement",
            Self::TotalDeposits => "total_deposits",
        }
    }

    /// The account the command acts on, if any (the source for transfers)
    pub fn account(&self) -> Option<AccountId> {
        match self {
            Self::CreateAccount { .. } | Self::TotalDeposits => None,
            Self::Transfer { from, .. } => Some(*from),
            Self::Deposit { id, .. }
            | Self::Withdraw { id, .. }
            | Self::AddInterest { id }
            | Self::BreakFd { id }
            | Self::MatureFd { id }
            | Self::CloseAccount { id }
            | Self::GetStatement { id, .. } => Some(*id),
        }
    }

    /// The destination of a transfer
    pub fn counterparty(&self) -> Option<AccountId> {
        match self {
            Self::Transfer { to, .. } => Some(*to),
            _ => None,
        }
    }
}

/// Successful result of a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Created(AccountId),
    /// New balance after a deposit or withdrawal
    Balance(Money),
    /// Interest credited, fixed deposit payout or maturity amount
    Amount(Money),
    Done,
    Statement(Vec<Transaction>),
    Total(Money),
}

impl<S: AccountStore> Bank<S> {
    /// Dispatch a command to the matching registry operation
    pub fn execute(&self, command: Command) -> Result<Outcome, LedgerError> {
        match command {
            Command::CreateAccount {
                config,
                holder,
                initial_balance,
            } => self
                .create_account(config, holder, initial_balance)
                .map(Outcome::Created),
            Command::Deposit { id, amount } => self.deposit(id, amount).map(Outcome::Balance),
            Command::Withdraw { id, amount } => self.withdraw(id, amount).map(Outcome::Balance),
            Command::Transfer { from, to, amount } => {
                self.transfer(from, to, amount).map(|()| Outcome::Done)
            }
            Command::AddInterest { id } => self.add_interest(id).map(Outcome::Amount),
            Command::BreakFd { id } => self.break_fd(id).map(Outcome::Amount),
            Command::MatureFd { id } => self.mature_fd(id).map(Outcome::Amount),
            Command::CloseAccount { id } => self.close_account(id).map(|()| Outcome::Done),
            Command::GetStatement { id, last_n } => {
                self.get_statement(id, last_n).map(Outcome::Statement)
            }
            Command::TotalDeposits => self.total_deposits().map(Outcome::Total),
        }
    }
}
