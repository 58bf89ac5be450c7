//! Core data models for the expense tracker
//!
//! This module contains the data structures of the expense domain: the
//! expense record itself and the fixed-point money type it carries.

pub mod expense;
pub mod money;

pub use expense::{ExpenseRecord, DATE_FORMAT, UNCATEGORIZED};
pub use money::{Money, MoneyParseError};
