use serde::{Deserialize, Serialize};

use super::amount::Money;

/// What a log entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    InitialDeposit,
    Deposit,
    Withdrawal,
    Interest,
    TransferIn,
    TransferOut,
    /// Compensating credit after a transfer whose deposit side failed
    TransferReversal,
    /// Early break of a fixed deposit; `amount` is the payout after `penalty`
    FdBroken { penalty: Money },
    /// Fixed deposit matured; `amount` is the interest earned
    FdMatured,
}

impl TransactionKind {
    /// Whether the entry adds its amount to the balance
    pub fn is_credit(&self) -> bool {
        match self {
            Self::InitialDeposit
            | Self::Deposit
            | Self::Interest
            | Self::TransferIn
            | Self::TransferReversal
            | Self::FdMatured => true,
            Self::Withdrawal | Self::TransferOut | Self::FdBroken { .. } => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::InitialDeposit => "Initial Deposit",
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::Interest => "Interest Credit",
            Self::TransferIn => "Transfer In",
            Self::TransferOut => "Transfer Out",
            Self::TransferReversal => "Transfer Reversal",
            Self::FdBroken { .. } => "FD Broken",
            Self::FdMatured => "FD Matured",
        }
    }
}

/// One immutable entry of an account's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Per-account logical counter, starting at 1
    pub sequence_no: u64,
    pub kind: TransactionKind,
    /// Always non-negative; direction comes from `kind`
    pub amount: Money,
    pub resulting_balance: Money,
}

impl Transaction {
    /// Signed change this entry applied to the balance
    pub fn signed_delta(&self) -> Money {
        match self.kind {
            TransactionKind::FdBroken { penalty } => -(self.amount + penalty),
            kind if kind.is_credit() => self.amount,
            _ => -self.amount,
        }
    }
}

/// Append-only, per-account transaction history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    /// Trailing `last_n` entries oldest-first, or everything when `last_n` is
    /// absent or exceeds the log length
    pub fn statement(&self, last_n: Option<usize>) -> &[Transaction] {
        let skip = last_n.map_or(0, |n| self.entries.len().saturating_sub(n));
        &self.entries[skip..]
    }

    /// Sum of every entry's signed delta, starting from zero
    pub fn replay(&self) -> Money {
        self.entries.iter().map(Transaction::signed_delta).sum()
    }

    pub(crate) fn append(
        &mut self,
        kind: TransactionKind,
        amount: Money,
        resulting_balance: Money,
    ) -> &Transaction {
        let sequence_no = self.entries.len() as u64 + 1;
        self.entries.push(Transaction {
            sequence_no,
            kind,
            amount,
            resulting_balance,
        });
        &self.entries[self.entries.len() - 1]
    }
}

impl<'a> IntoIterator for &'a TransactionLog {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
