//! Aggregate views over the expense store
//!
//! Totals, averages and per-category breakdowns, with categories kept in the
//! order they were first seen.

use std::collections::HashMap;

use crate::models::{ExpenseRecord, Money};

/// Result of summarizing the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// No records; there is nothing to average
    Empty,
    NonEmpty(SpendingSummary),
}

/// Totals across all records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingSummary {
    pub total: Money,
    /// Total divided by count, rounded to the cent
    pub average: Money,
    pub count: usize,
    /// Per-category breakdown in first-seen order
    pub categories: Vec<CategorySummary>,
}

/// Totals for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: String,
    pub subtotal: Money,
    pub average: Money,
    pub count: usize,
}

impl SpendingSummary {
    /// Look up a category's breakdown by name
    pub fn category(&self, name: &str) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == name)
    }
}

impl Summary {
    /// Summarize records, preserving first-seen category order
    pub fn from_records(records: &[ExpenseRecord]) -> Self {
        if records.is_empty() {
            return Summary::Empty;
        }

        let mut order: Vec<(String, Money, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for record in records {
            let slot = *index.entry(record.category()).or_insert_with(|| {
                order.push((record.category().to_string(), Money::zero(), 0));
                order.len() - 1
            });
            let (_, subtotal, count) = &mut order[slot];
            *subtotal += record.amount();
            *count += 1;
        }

        let total: Money = records.iter().map(ExpenseRecord::amount).sum();
        let categories = order
            .into_iter()
            .map(|(category, subtotal, count)| CategorySummary {
                average: Money::average(subtotal, count).unwrap_or_default(),
                category,
                subtotal,
                count,
            })
            .collect();

        Summary::NonEmpty(SpendingSummary {
            total,
            average: Money::average(total, records.len()).unwrap_or_default(),
            count: records.len(),
            categories,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Summary::Empty)
    }
}
