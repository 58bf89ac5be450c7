//! Expense CLI commands
//!
//! Implements the add/list/summary/import/export/clear commands on top of a
//! [`Session`].

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Subcommand;

use super::session::Session;
use crate::codec::{load_from_file, save_to_file, SkippedRow};
use crate::display::{format_added, format_expense_list, format_summary};
use crate::error::{ExpenseError, ExpenseResult};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "7.25")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long, default_value = "")]
        date: String,
        /// Category (e.g., Food, Transport, Bills)
        #[arg(short, long, default_value = "")]
        category: String,
        /// Short description
        #[arg(short = 'm', long, default_value = "")]
        description: String,
    },

    /// Show all expenses
    #[command(alias = "ls")]
    List,

    /// Compute totals and averages, overall and per category
    Summary,

    /// Save all expenses to another file (replacing it)
    Export {
        /// Output file path
        output: PathBuf,
    },

    /// Load expenses from a file and append them
    Import {
        /// Path to CSV file
        #[arg(value_name = "FILE")]
        source: PathBuf,
    },

    /// Remove every expense
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(session: &mut Session, cmd: ExpenseCommands) -> ExpenseResult<()> {
    let currency = session.settings().currency_symbol.clone();

    match cmd {
        ExpenseCommands::Add {
            amount,
            date,
            category,
            description,
        } => {
            session.ensure_writable()?;
            let added = session.store.add(&date, &category, &description, &amount)?;
            session.persist()?;
            println!("{}", format_added(&added.record, &currency));
        }

        ExpenseCommands::List => {
            print!(
                "{}",
                format_expense_list(session.store.all(), &currency, &session.settings().date_format)
            );
        }

        ExpenseCommands::Summary => {
            print!("{}", format_summary(&session.store.summarize(), &currency));
        }

        ExpenseCommands::Export { output } => {
            let count = save_to_file(&output, session.store.all())?;
            println!("Saved {} expenses to {}.", count, output.display());
        }

        ExpenseCommands::Import { source } => {
            session.ensure_writable()?;
            let outcome = load_from_file(&source)?;
            let loaded = session.store.extend(outcome.records);
            session.persist()?;

            println!("Loaded {} expenses from {}.", loaded, source.display());
            if outcome.skipped > 0 {
                eprintln!("Skipped {} rows:", outcome.skipped);
                print_skipped(&outcome.skipped_rows);
            }
        }

        ExpenseCommands::Clear { yes } => {
            if session.store.is_empty() {
                println!("No expenses to clear.");
                return Ok(());
            }
            session.ensure_writable()?;
            if !yes && !confirm("Are you sure you want to clear all expenses? (yes/no): ")? {
                println!("Clear canceled.");
                return Ok(());
            }

            let removed = session.store.count();
            session.store.clear();
            session.persist()?;
            println!("All expenses cleared ({} removed).", removed);
        }
    }

    Ok(())
}

/// Report skipped rows on stderr, one line each
pub fn print_skipped(rows: &[SkippedRow]) {
    for skipped in rows {
        eprintln!("  Row {}: {}", skipped.row, skipped.reason);
    }
}

/// Ask a yes/no question on stdin; only "y" or "yes" confirm
fn confirm(prompt: &str) -> ExpenseResult<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| ExpenseError::Io(format!("Failed to read confirmation: {}", e)))?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
