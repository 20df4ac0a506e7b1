use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Monetary amount held as a signed count of minor currency units
/// (1/100 of the major unit). Never a floating-point value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    const SCALE: i64 = 100;
    const DECIMALS: usize = 2;

    pub const ZERO: Money = Money(0);

    /// Create from a raw count of minor units
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Get the raw count of minor units
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse from a decimal string with at most two fractional digits (e.g. "1500.25")
    pub fn from_decimal_str(s: &str) -> Result<Self, LedgerError> {
        let s = s.trim();

        let (is_negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let (integer_part, fraction_part) = match s.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if integer_part.is_empty()
            || !all_digits(integer_part)
            || !all_digits(fraction_part)
            || fraction_part.len() > Self::DECIMALS
        {
            return Err(LedgerError::InvalidAmount);
        }

        // Scaled in i128 so the sign applies before the i64 range check
        let integer: i128 = integer_part
            .parse()
            .map_err(|_| LedgerError::Overflow)?;

        // Right-pad so "1.5" reads as 150 minor units
        let fraction: i128 = format!("{:0<width$}", fraction_part, width = Self::DECIMALS)
            .parse()
            .map_err(|_| LedgerError::InvalidAmount)?;

        let scaled = integer
            .checked_mul(i128::from(Self::SCALE))
            .and_then(|v| v.checked_add(fraction))
            .ok_or(LedgerError::Overflow)?;
        let signed = if is_negative { -scaled } else { scaled };

        i64::try_from(signed)
            .map(Self)
            .map_err(|_| LedgerError::Overflow)
    }

    /// Render with exactly two fractional digits
    pub fn to_decimal_string(&self) -> String {
        let abs_value = self.0.unsigned_abs();
        let scale = Self::SCALE.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}.{:02}",
            sign,
            abs_value / scale,
            abs_value % scale
        )
    }

    /// Checked addition, returns None on overflow
    pub fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction, returns None on overflow
    pub fn checked_sub(&self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
