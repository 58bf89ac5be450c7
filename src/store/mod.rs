//! In-memory expense store
//!
//! Holds the session's expense records in insertion order. A record's
//! position is its identity; records are only ever appended or cleared
//! all at once.

pub mod summary;

pub use summary::{CategorySummary, SpendingSummary, Summary};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::models::expense::{self, ExpenseRecord};

/// Confirmation of a successful `add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAdded {
    /// Zero-based position of the new record
    pub index: usize,
    pub record: ExpenseRecord,
}

/// Ordered collection of expense records for one session
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    records: Vec<ExpenseRecord>,
}

impl ExpenseStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an expense
    ///
    /// A blank `date` means today's local date. Nothing is appended on error.
    pub fn add(
        &mut self,
        date: &str,
        category: &str,
        description: &str,
        amount: &str,
    ) -> Result<RecordAdded, ValidationError> {
        self.add_as_of(date, category, description, amount, expense::today())
    }

    /// Same as [`add`](Self::add) with an explicit "today"
    pub fn add_as_of(
        &mut self,
        date: &str,
        category: &str,
        description: &str,
        amount: &str,
        today: NaiveDate,
    ) -> Result<RecordAdded, ValidationError> {
        let record = ExpenseRecord::parse(date, category, description, amount, today)?;
        let index = self.records.len();
        self.records.push(record.clone());

        debug!(
            index,
            date = %record.date_string(),
            category = record.category(),
            amount = %record.amount().to_plain_string(),
            "expense added"
        );

        Ok(RecordAdded { index, record })
    }

    /// Append records that were validated elsewhere (e.g. decoded from a file)
    ///
    /// Records are appended as-is in order; nothing is merged or de-duplicated.
    /// Returns the number appended.
    pub fn extend<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = ExpenseRecord>,
    {
        let before = self.records.len();
        self.records.extend(records);
        self.records.len() - before
    }

    /// All records in insertion order
    pub fn all(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compute totals and per-category breakdowns
    pub fn summarize(&self) -> Summary {
        Summary::from_records(&self.records)
    }

    /// Remove every record
    pub fn clear(&mut self) {
        let removed = self.records.len();
        self.records.clear();
        info!(removed, "expense store cleared");
    }
}
