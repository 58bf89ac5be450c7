//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so repeated save/load cycles never
//! drift. Provides parsing, averaging and two-decimal formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a money amount from a decimal string
    ///
    /// Accepts an optional sign, an optional `$`, any number of fractional
    /// digits and an optional decimal exponent: "7.25", "-0.01", "$10", ".5",
    /// "3.", "1e3", "1.5E-2". Digits past the second decimal place round half
    /// away from zero. `NaN`, `inf` and thousands separators are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());
        let out_of_range = || MoneyParseError::OutOfRange(s.trim().to_string());
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => (mantissa, Some(exponent)),
            None => (rest, None),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !is_digits(whole) || !is_digits(fraction) {
            return Err(invalid());
        }

        let shifted;
        let (whole, fraction) = match exponent {
            None => (whole, fraction),
            Some(exponent) => {
                let unsigned = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
                if unsigned.is_empty() || !is_digits(unsigned) {
                    return Err(invalid());
                }
                let exponent: i16 = exponent.parse().map_err(|_| out_of_range())?;
                shifted = shift_point(whole, fraction, exponent);
                (shifted.0.as_str(), shifted.1.as_str())
            }
        };

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };

        let digit = |i: usize| fraction.as_bytes().get(i).map_or(0, |b| i64::from(b - b'0'));
        let round_up = i64::from(digit(2) >= 5);
        let fractional_cents = digit(0) * 10 + digit(1) + round_up;

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fractional_cents))
            .ok_or_else(out_of_range)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Average of `total` over `count` items, rounded half away from zero
    ///
    /// Returns `None` when `count` is zero.
    pub fn average(total: Money, count: usize) -> Option<Money> {
        let count = i64::try_from(count).ok().filter(|n| *n > 0)?;
        let quotient = total.0 / count;
        let remainder = total.0 % count;
        let adjust = if remainder.abs() * 2 >= count {
            total.0.signum()
        } else {
            0
        };
        Some(Self(quotient + adjust))
    }

    /// Format as a bare two-decimal number ("7.25"), as written to CSV
    pub fn to_plain_string(&self) -> String {
        if self.is_negative() {
            format!("-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.dollars(), self.cents_part())
        }
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Move the decimal point of `whole.fraction` right by `exponent` places
/// (left when negative), padding with zeros
fn shift_point(whole: &str, fraction: &str, exponent: i16) -> (String, String) {
    let digits = [whole, fraction].concat();
    let point = whole.len() as i64 + i64::from(exponent);

    if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        (String::new(), zeros + &digits)
    } else if point as usize >= digits.len() {
        let zeros = "0".repeat(point as usize - digits.len());
        (digits + &zeros, String::new())
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        (whole.to_string(), fraction.to_string())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturates at the representable range instead of overflowing
    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(725).to_plain_string(), "7.25");
        assert_eq!(Money::from_cents(100_000_000).to_plain_string(), "1000000.00");
        assert_eq!(Money::zero().to_plain_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("+3").unwrap().cents(), 300);
        assert_eq!(Money::parse(" 10 ").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("3.").unwrap().cents(), 300);
    }

    #[test]
    fn test_parse_rounds_extra_digits() {
        assert_eq!(Money::parse("7.255").unwrap().cents(), 726);
        assert_eq!(Money::parse("7.254").unwrap().cents(), 725);
        assert_eq!(Money::parse("0.999").unwrap().cents(), 100);
        assert_eq!(Money::parse("-1.005").unwrap().cents(), -101);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", ".", "abc", "1,000", "NaN", "inf", "1.2.3", "--1", "$", "e3", "1e", "1e+", "1e1.5"] {
            assert!(
                matches!(Money::parse(input), Err(MoneyParseError::InvalidFormat(_))),
                "{input:?} should be rejected"
            );
        }
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(Money::parse("1e3").unwrap().cents(), 100_000);
        assert_eq!(Money::parse("1.5E2").unwrap().cents(), 15_000);
        assert_eq!(Money::parse("2.5e-1").unwrap().cents(), 25);
        assert_eq!(Money::parse("1e-2").unwrap().cents(), 1);
        assert_eq!(Money::parse("5e-3").unwrap().cents(), 1);
        assert_eq!(Money::parse("4e-3").unwrap().cents(), 0);
        assert_eq!(Money::parse("1e-400").unwrap().cents(), 0);
        assert_eq!(Money::parse("-7.25e+0").unwrap().cents(), -725);
        assert!(matches!(Money::parse("1e30"), Err(MoneyParseError::OutOfRange(_))));
        assert!(matches!(Money::parse("1e99999"), Err(MoneyParseError::OutOfRange(_))));
    }

    #[test]
    fn test_add_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + Money::from_cents(1), max);

        let mut total = max;
        total += max;
        assert_eq!(total, max);
    }

    #[test]
    fn test_average_rounds_half_away_from_zero() {
        assert_eq!(Money::average(Money::from_cents(3500), 3), Some(Money::from_cents(1167)));
        assert_eq!(Money::average(Money::from_cents(1500), 2), Some(Money::from_cents(750)));
        assert_eq!(Money::average(Money::from_cents(5), 2), Some(Money::from_cents(3)));
        assert_eq!(Money::average(Money::from_cents(1000), 3), Some(Money::from_cents(333)));
        assert_eq!(Money::average(Money::from_cents(1000), 0), None);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
