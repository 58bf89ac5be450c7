//! Display formatting for terminal output

pub mod expense;
pub mod summary;

pub use expense::{format_added, format_expense_list};
pub use summary::format_summary;
