//! Expense list formatting
//!
//! Renders the store's records as a terminal table.

use std::fmt::Write;

use chrono::NaiveDate;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{ExpenseRecord, DATE_FORMAT};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format records as a table followed by a count line
pub fn format_expense_list(records: &[ExpenseRecord], currency: &str, date_format: &str) -> String {
    if records.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows = records.iter().enumerate().map(|(idx, record)| ExpenseRow {
        position: idx + 1,
        date: format_date(record.date(), date_format),
        category: record.category().to_string(),
        amount: record.amount().format_with_symbol(currency),
        description: record.description().to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));

    format!("{}\nTotal expenses recorded: {}\n", table, records.len())
}

/// Format a date with a user-supplied strftime pattern, falling back to
/// `YYYY-MM-DD` when the pattern is invalid
fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        return date.format(DATE_FORMAT).to_string();
    }
    out
}

/// One-line confirmation for a newly added record
pub fn format_added(record: &ExpenseRecord, currency: &str) -> String {
    let description = if record.description().is_empty() {
        String::new()
    } else {
        format!(" ({})", record.description())
    };
    format!(
        "Expense added: {} {} {}{}",
        record.date_string(),
        record.category(),
        record.amount().format_with_symbol(currency),
        description
    )
}
