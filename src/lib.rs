//! Expense Tracker - personal expense tracking from the terminal
//!
//! This library provides the core of the expense tracker: an in-memory store
//! of dated, categorized expenses and a CSV codec that saves the store to a
//! file and loads it back, skipping malformed rows instead of failing.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense record and money types
//! - `store`: The in-memory expense store and its summaries
//! - `codec`: CSV encode/decode and file load/save
//! - `display`: Terminal formatting
//! - `cli`: Command handlers used by the `expenses` binary
//!
//! # Example
//!
//! ```rust
//! use expense_tracker::codec;
//! use expense_tracker::store::{ExpenseStore, Summary};
//!
//! let mut store = ExpenseStore::new();
//! store.add("2025-01-15", "Food", "lunch", "7.25").unwrap();
//!
//! let text = codec::encode(store.all()).unwrap();
//! let outcome = codec::decode(&text).unwrap();
//! assert_eq!(outcome.loaded, 1);
//! assert!(matches!(store.summarize(), Summary::NonEmpty(_)));
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod store;

pub use error::{ExpenseError, ExpenseResult, ValidationError};
