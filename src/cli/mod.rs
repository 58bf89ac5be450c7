//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the expense store and codec.

pub mod expense;
pub mod session;

pub use expense::{handle_expense_command, print_skipped, ExpenseCommands};
pub use session::Session;
