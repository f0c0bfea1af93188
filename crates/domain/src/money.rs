//! Prices and totals in whole cents.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a decimal price string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid amount '{input}': {reason}")]
pub struct MoneyParseError {
    pub input: String,
    pub reason: &'static str,
}

/// An amount of US dollars held as an integer number of cents.
///
/// Serializes as `{"cents": 150}` so clients never round-trip a float.
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Parses a non-negative decimal amount such as `"3.20"` or `"12"`.
    ///
    /// At most two fractional digits are accepted.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let err = |reason| MoneyParseError {
            input: input.to_string(),
            reason,
        };

        let trimmed = input.trim().trim_start_matches('$');
        if trimmed.is_empty() {
            return Err(err("empty amount"));
        }

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };

        if fraction.len() > 2 {
            return Err(err("more than two decimal places"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && fraction.is_empty())
        {
            return Err(err("not a non-negative decimal"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err("amount too large"))?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| err("bad fraction"))? * 10,
            _ => fraction.parse().map_err(|_| err("bad fraction"))?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .map(Self::from_cents)
            .ok_or_else(|| err("amount too large"))
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Price of `quantity` units at this unit price.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money::from_cents(self.cents.saturating_mul(i64::from(quantity)))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money::from_cents(self.cents.saturating_sub(rhs.cents))
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
