//! Variant rules for every balance-changing operation.
//!
//! Each function validates fully before touching the account, so a failed
//! call leaves balance, status and log exactly as they were. A successful
//! monetary call posts exactly one log entry.

use super::account::{Account, AccountStatus, AccountVariant};
use super::amount::Money;
use super::error::LedgerError;
use super::rate::Rate;
use super::transaction::TransactionKind;

fn ensure_positive(amount: Money) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

fn ensure_active(account: &Account) -> Result<(), LedgerError> {
    if !account.is_active() {
        return Err(LedgerError::AccountClosed);
    }
    Ok(())
}

fn credit(account: &mut Account, amount: Money, kind: TransactionKind) -> Result<Money, LedgerError> {
    ensure_positive(amount)?;
    ensure_active(account)?;

    // A fixed deposit's balance only moves on break or maturity
    if let AccountVariant::FixedDeposit { .. } = account.variant() {
        return Err(LedgerError::UnsupportedOperation);
    }

    let new_balance = account
        .balance()
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;

    account.post(kind, amount, new_balance);
    Ok(new_balance)
}

fn debit(account: &mut Account, amount: Money, kind: TransactionKind) -> Result<Money, LedgerError> {
    ensure_positive(amount)?;
    ensure_active(account)?;

    let floor = match *account.variant() {
        AccountVariant::Savings {
            minimum_balance, ..
        } => minimum_balance,
        AccountVariant::Current { overdraft_limit } => -overdraft_limit,
        AccountVariant::FixedDeposit { .. } => return Err(LedgerError::UnsupportedOperation),
    };

    // Widened so a deep overdraft reports the floor rather than overflow
    let remaining = i128::from(account.balance().minor_units()) - i128::from(amount.minor_units());
    if remaining < i128::from(floor.minor_units()) {
        return Err(LedgerError::InsufficientFunds);
    }

    let new_balance = account
        .balance()
        .checked_sub(amount)
        .ok_or(LedgerError::Overflow)?;

    account.post(kind, amount, new_balance);
    Ok(new_balance)
}

/// Credit an active, non fixed-deposit account. Returns the new balance.
pub fn apply_deposit(account: &mut Account, amount: Money) -> Result<Money, LedgerError> {
    credit(account, amount, TransactionKind::Deposit)
}

/// Debit an account down to, but not below, its variant floor. Returns the new balance.
pub fn apply_withdrawal(account: &mut Account, amount: Money) -> Result<Money, LedgerError> {
    debit(account, amount, TransactionKind::Withdrawal)
}

/// Debit side of a transfer: withdrawal rules, `TransferOut` entry
pub fn apply_transfer_out(account: &mut Account, amount: Money) -> Result<Money, LedgerError> {
    debit(account, amount, TransactionKind::TransferOut)
}

/// Credit side of a transfer: deposit rules, `TransferIn` entry
pub fn apply_transfer_in(account: &mut Account, amount: Money) -> Result<Money, LedgerError> {
    credit(account, amount, TransactionKind::TransferIn)
}

/// Undo a transfer-out whose credit side failed.
///
/// Only valid on an account that just had `amount` debited by
/// [`apply_transfer_out`] under the same lock; the restored balance cannot
/// overflow because it is the balance from before that debit.
pub(crate) fn apply_transfer_reversal(account: &mut Account, amount: Money) -> Money {
    let restored = account.balance() + amount;
    account.post(TransactionKind::TransferReversal, amount, restored);
    restored
}

/// Credit savings interest at the account's rate. Returns the interest posted.
///
/// Interest that rounds to zero changes nothing and posts no entry.
pub fn apply_interest(account: &mut Account) -> Result<Money, LedgerError> {
    let AccountVariant::Savings { interest_rate, .. } = *account.variant() else {
        return Err(LedgerError::UnsupportedOperation);
    };
    ensure_active(account)?;

    let interest = interest_rate.apply(account.balance())?;
    if !interest.is_positive() {
        return Ok(Money::ZERO);
    }

    let new_balance = account
        .balance()
        .checked_add(interest)
        .ok_or(LedgerError::Overflow)?;

    account.post(TransactionKind::Interest, interest, new_balance);
    Ok(interest)
}

/// Break a fixed deposit early: pay out the balance minus `penalty_rate`,
/// zero the balance and close the account. Returns the payout.
pub fn apply_break(account: &mut Account, penalty_rate: Rate) -> Result<Money, LedgerError> {
    let AccountVariant::FixedDeposit { .. } = account.variant() else {
        return Err(LedgerError::UnsupportedOperation);
    };
    ensure_active(account)?;

    let balance = account.balance();
    let penalty = penalty_rate.apply(balance)?;
    let payout = balance.checked_sub(penalty).ok_or(LedgerError::Overflow)?;

    account.post(TransactionKind::FdBroken { penalty }, payout, Money::ZERO);
    account.set_status(AccountStatus::Closed);
    Ok(payout)
}

/// Mature a fixed deposit: credit its interest and mark it matured.
/// Returns the maturity amount. Eligibility (elapsed tenure) is the caller's call.
pub fn apply_maturity(account: &mut Account) -> Result<Money, LedgerError> {
    let AccountVariant::FixedDeposit {
        principal,
        maturity_amount,
        ..
    } = *account.variant()
    else {
        return Err(LedgerError::UnsupportedOperation);
    };
    ensure_active(account)?;

    let interest = maturity_amount
        .checked_sub(principal)
        .ok_or(LedgerError::Overflow)?;

    account.post(TransactionKind::FdMatured, interest, maturity_amount);
    account.set_status(AccountStatus::Matured);
    Ok(maturity_amount)
}

/// Close an active account. A status change only: no balance change, no entry.
pub fn apply_close(account: &mut Account) -> Result<(), LedgerError> {
    if !account.is_active() {
        return Err(LedgerError::AlreadyClosed);
    }
    account.set_status(AccountStatus::Closed);
    Ok(())
}
