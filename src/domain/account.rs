use std::fmt;

use serde::{Deserialize, Serialize};

use super::amount::Money;
use super::error::LedgerError;
use super::rate::Rate;
use super::transaction::{Transaction, TransactionKind, TransactionLog};

/// Registry-assigned account number, displayed as `ACC1001`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u64);

impl AccountId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ACC{}", self.0)
    }
}

/// Lifecycle state. `Closed` and `Matured` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Closed,
    Matured,
}

impl AccountStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

/// The closed set of account kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    Savings,
    Current,
    FixedDeposit,
}

impl AccountKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Savings => "Savings Account",
            Self::Current => "Current Account",
            Self::FixedDeposit => "Fixed Deposit",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Variant configuration supplied when opening an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountConfig {
    Savings {
        interest_rate: Rate,
        minimum_balance: Money,
    },
    Current {
        overdraft_limit: Money,
    },
    /// The principal is the account's initial balance
    FixedDeposit {
        tenure_months: u32,
        interest_rate: Rate,
    },
}

impl AccountConfig {
    pub const DEFAULT_SAVINGS_RATE: Rate = Rate::percent(4);
    pub const DEFAULT_MINIMUM_BALANCE: Money = Money::from_minor(100_000);
    pub const DEFAULT_OVERDRAFT_LIMIT: Money = Money::from_minor(1_000_000);
    pub const DEFAULT_FIXED_DEPOSIT_RATE: Rate = Rate::percent(7);

    /// Savings at 4% with a 1000.00 minimum balance
    pub fn savings() -> Self {
        Self::Savings {
            interest_rate: Self::DEFAULT_SAVINGS_RATE,
            minimum_balance: Self::DEFAULT_MINIMUM_BALANCE,
        }
    }

    /// Current account with a 10000.00 overdraft
    pub fn current() -> Self {
        Self::Current {
            overdraft_limit: Self::DEFAULT_OVERDRAFT_LIMIT,
        }
    }

    /// Fixed deposit at 7% simple interest
    pub fn fixed_deposit(tenure_months: u32) -> Self {
        Self::FixedDeposit {
            tenure_months,
            interest_rate: Self::DEFAULT_FIXED_DEPOSIT_RATE,
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Self::Savings { .. } => AccountKind::Savings,
            Self::Current { .. } => AccountKind::Current,
            Self::FixedDeposit { .. } => AccountKind::FixedDeposit,
        }
    }
}

/// Variant-specific rules and parameters of an open account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountVariant {
    Savings {
        interest_rate: Rate,
        minimum_balance: Money,
    },
    Current {
        overdraft_limit: Money,
    },
    FixedDeposit {
        principal: Money,
        tenure_months: u32,
        interest_rate: Rate,
        maturity_amount: Money,
    },
}

impl AccountVariant {
    /// Validate a configuration against the opening balance and derive the variant
    pub fn from_config(config: AccountConfig, initial_balance: Money) -> Result<Self, LedgerError> {
        if initial_balance.is_negative() {
            return Err(LedgerError::InvalidAmount);
        }

        match config {
            AccountConfig::Savings {
                interest_rate,
                minimum_balance,
            } => {
                if minimum_balance.is_negative() {
                    return Err(LedgerError::InvalidConfiguration(
                        "minimum balance must not be negative".to_string(),
                    ));
                }
                if initial_balance < minimum_balance {
                    return Err(LedgerError::InsufficientFunds);
                }
                Ok(Self::Savings {
                    interest_rate,
                    minimum_balance,
                })
            }
            AccountConfig::Current { overdraft_limit } => {
                if overdraft_limit.is_negative() {
                    return Err(LedgerError::InvalidConfiguration(
                        "overdraft limit must not be negative".to_string(),
                    ));
                }
                Ok(Self::Current { overdraft_limit })
            }
            AccountConfig::FixedDeposit {
                tenure_months,
                interest_rate,
            } => {
                if tenure_months == 0 {
                    return Err(LedgerError::InvalidConfiguration(
                        "tenure must be at least one month".to_string(),
                    ));
                }
                if !initial_balance.is_positive() {
                    return Err(LedgerError::InvalidAmount);
                }
                let interest = interest_rate.apply_for_months(initial_balance, tenure_months)?;
                let maturity_amount = initial_balance
                    .checked_add(interest)
                    .ok_or(LedgerError::Overflow)?;
                Ok(Self::FixedDeposit {
                    principal: initial_balance,
                    tenure_months,
                    interest_rate,
                    maturity_amount,
                })
            }
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Self::Savings { .. } => AccountKind::Savings,
            Self::Current { .. } => AccountKind::Current,
            Self::FixedDeposit { .. } => AccountKind::FixedDeposit,
        }
    }
}

/// Terms of a fixed deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityInfo {
    pub principal: Money,
    pub interest_rate: Rate,
    pub tenure_months: u32,
    pub maturity_amount: Money,
    pub interest: Money,
}

/// Account with private fields enforcing invariants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    holder: String,
    balance: Money,
    status: AccountStatus,
    variant: AccountVariant,
    log: TransactionLog,
}

impl Account {
    /// Open an account; a positive opening balance posts an `InitialDeposit`
    pub(crate) fn open(
        id: AccountId,
        holder: String,
        variant: AccountVariant,
        initial_balance: Money,
    ) -> Self {
        let mut account = Self {
            id,
            holder,
            balance: Money::ZERO,
            status: AccountStatus::Active,
            variant,
            log: TransactionLog::new(),
        };
        if initial_balance.is_positive() {
            account.post(TransactionKind::InitialDeposit, initial_balance, initial_balance);
        }
        account
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn variant(&self) -> &AccountVariant {
        &self.variant
    }

    pub fn kind(&self) -> AccountKind {
        self.variant.kind()
    }

    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Trailing `last_n` log entries, oldest first
    pub fn statement(&self, last_n: Option<usize>) -> Vec<Transaction> {
        self.log.statement(last_n).to_vec()
    }

    /// How much a withdrawal could take right now without breaching the floor
    pub fn available_to_withdraw(&self) -> Money {
        if !self.is_active() {
            return Money::ZERO;
        }
        let available = match self.variant {
            AccountVariant::Savings {
                minimum_balance, ..
            } => self.balance.checked_sub(minimum_balance),
            AccountVariant::Current { overdraft_limit } => {
                self.balance.checked_add(overdraft_limit)
            }
            AccountVariant::FixedDeposit { .. } => Some(Money::ZERO),
        };
        available.unwrap_or(Money::ZERO).max(Money::ZERO)
    }

    pub fn maturity_info(&self) -> Result<MaturityInfo, LedgerError> {
        match self.variant {
            AccountVariant::FixedDeposit {
                principal,
                tenure_months,
                interest_rate,
                maturity_amount,
            } => Ok(MaturityInfo {
                principal,
                interest_rate,
                tenure_months,
                maturity_amount,
                interest: maturity_amount - principal,
            }),
            _ => Err(LedgerError::UnsupportedOperation),
        }
    }

    // Internal mutation methods for use by operations module

    /// Set the balance and record the single log entry describing the change
    pub(crate) fn post(&mut self, kind: TransactionKind, amount: Money, new_balance: Money) {
        self.balance = new_balance;
        self.log.append(kind, amount, new_balance);
    }

    pub(crate) fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }
}
