//! Expense record model
//!
//! One dated, categorized expense. Construction validates every field once;
//! a record that exists always has a real calendar date and a non-negative
//! amount.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::ValidationError;

/// Category assigned when none is given
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Date format used for storage and input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount a single record may hold (one trillion)
///
/// Keeps totals exact for any realistic number of records.
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000_000);

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    date: NaiveDate,
    category: String,
    description: String,
    amount: Money,
}

impl ExpenseRecord {
    /// Create a record from already-parsed parts
    ///
    /// Category and description are trimmed; a blank category becomes
    /// [`UNCATEGORIZED`]. Fails if `amount` is negative or above [`MAX_AMOUNT`].
    pub fn new(
        date: NaiveDate,
        category: impl AsRef<str>,
        description: impl AsRef<str>,
        amount: Money,
    ) -> Result<Self, ValidationError> {
        if amount.is_negative() {
            return Err(ValidationError::NegativeAmount(amount.to_plain_string()));
        }
        if amount > MAX_AMOUNT {
            return Err(ValidationError::BadAmount(amount.to_plain_string()));
        }

        Ok(Self {
            date,
            category: normalize_category(category.as_ref()),
            description: description.as_ref().trim().to_string(),
            amount,
        })
    }

    /// Create a record from raw text fields, as typed by a user or read from a file
    ///
    /// A blank `date` means `today`.
    pub fn parse(
        date: &str,
        category: &str,
        description: &str,
        amount: &str,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let date = parse_date_or(date, today)?;
        let amount = parse_amount(amount)?;
        Self::new(date, category, description, amount)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Date rendered as `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:12} | {:>9} | {}",
            self.date_string(),
            self.category,
            self.amount.to_string(),
            self.description
        )
    }
}

/// Today's date in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date, substituting `today` for blank input
pub fn parse_date_or(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today);
    }

    // chrono accepts unpadded fields ("2025-1-5"); storage always writes padded ones
    if input.len() != 10 {
        return Err(ValidationError::BadDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ValidationError::BadDate(input.to_string()))
}

/// Parse a non-negative amount no larger than [`MAX_AMOUNT`]
pub fn parse_amount(input: &str) -> Result<Money, ValidationError> {
    let bad_amount = || ValidationError::BadAmount(input.trim().to_string());
    let amount = Money::parse(input).map_err(|_| bad_amount())?;
    if amount.is_negative() {
        return Err(ValidationError::NegativeAmount(input.trim().to_string()));
    }
    if amount > MAX_AMOUNT {
        return Err(bad_amount());
    }
    Ok(amount)
}

fn normalize_category(category: &str) -> String {
    let category = category.trim();
    if category.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        category.to_string()
    }
}
