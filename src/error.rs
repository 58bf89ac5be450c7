//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a new expense is rejected before it reaches the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date was not empty and did not parse as `YYYY-MM-DD`
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    BadDate(String),

    /// Amount text is not a decimal number
    #[error("invalid amount '{0}'")]
    BadAmount(String),

    /// Amount parsed but is below zero
    #[error("amount cannot be negative: {0}")]
    NegativeAmount(String),
}

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV writer/reader errors that are not per-row
    #[error("CSV error: {0}")]
    Csv(String),

    /// Rejected input for a single expense
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Load source does not exist
    #[error("No file named {} found", path.display())]
    NotFound { path: PathBuf },

    /// Rewriting the working file would drop rows that failed to load
    #[error(
        "{} has {count} unreadable rows that would be lost; fix them or rerun with --force to drop them",
        path.display()
    )]
    UnreadableRows { path: PathBuf, count: usize },

    /// Load source is not a CSV table with the expected header
    #[error("Malformed expense file: {0}")]
    MalformedPayload(String),
}

impl ExpenseError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
