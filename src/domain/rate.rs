use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::amount::Money;
use super::error::LedgerError;

const MONTHS_PER_YEAR: i128 = 12;

/// Exact rational rate (`numerator / denominator`) used for interest and penalties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRate")]
pub struct Rate {
    numerator: u64,
    denominator: u64,
}

#[derive(Deserialize)]
struct RawRate {
    numerator: u64,
    denominator: u64,
}

impl TryFrom<RawRate> for Rate {
    type Error = LedgerError;

    fn try_from(raw: RawRate) -> Result<Self, Self::Error> {
        Rate::new(raw.numerator, raw.denominator)
    }
}

impl Rate {
    pub const ZERO: Rate = Rate::percent(0);

    /// Create a rate from a fraction; the denominator must be non-zero
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, LedgerError> {
        if denominator == 0 {
            return Err(LedgerError::InvalidConfiguration(
                "rate denominator must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// `percent(4)` is 4 / 100
    pub const fn percent(percent: u64) -> Self {
        Self {
            numerator: percent,
            denominator: 100,
        }
    }

    /// `basis_points(725)` is 7.25%
    pub const fn basis_points(bps: u64) -> Self {
        Self {
            numerator: bps,
            denominator: 10_000,
        }
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// `round_half_even(amount * rate)`
    pub fn apply(&self, amount: Money) -> Result<Money, LedgerError> {
        let numer = i128::from(amount.minor_units()) * i128::from(self.numerator);
        to_money(div_round_half_even(numer, i128::from(self.denominator)))
    }

    /// Simple interest over a tenure: `round_half_even(amount * rate * months / 12)`
    pub fn apply_for_months(&self, amount: Money, months: u32) -> Result<Money, LedgerError> {
        let numer = i128::from(amount.minor_units())
            * i128::from(self.numerator)
            * i128::from(months);
        let denom = i128::from(self.denominator) * MONTHS_PER_YEAR;
        to_money(div_round_half_even(numer, denom))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Divide rounding to the nearest integer, ties to even. `denom` must be positive.
fn div_round_half_even(numer: i128, denom: i128) -> i128 {
    let quotient = numer.div_euclid(denom);
    let remainder = numer.rem_euclid(denom);

    match (remainder * 2).cmp(&denom) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient.rem_euclid(2) == 0 => quotient,
        Ordering::Equal => quotient + 1,
    }
}

fn to_money(minor: i128) -> Result<Money, LedgerError> {
    i64::try_from(minor)
        .map(Money::from_minor)
        .map_err(|_| LedgerError::Overflow)
}
