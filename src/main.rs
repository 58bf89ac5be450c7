use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{handle_expense_command, print_skipped, ExpenseCommands, Session};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};

/// Environment variable holding the log filter (e.g. "debug")
const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track personal expenses from the terminal",
    long_about = "Record dated, categorized expenses, view them, compute totals \
                  and averages, and save or load them as CSV."
)]
struct Cli {
    /// Working expenses file (defaults to the configured file in the data directory)
    #[arg(short, long, global = true, env = "EXPENSE_TRACKER_FILE")]
    file: Option<PathBuf>,

    /// Rewrite the working file even if some of its rows could not be read
    /// (those rows are dropped)
    #[arg(long, global = true)]
    force: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Write default settings to the config directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let mut session = Session::open(&paths, settings, cli.file)?.with_force(cli.force);
            if !session.skipped_on_open.is_empty() {
                eprintln!(
                    "Warning: skipped {} unreadable rows in {}",
                    session.skipped_on_open.len(),
                    session.file().display()
                );
                print_skipped(&session.skipped_on_open);
            }
            handle_expense_command(&mut session, cmd)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            let file = cli
                .file
                .unwrap_or_else(|| paths.expenses_file(&settings.default_file));
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Expenses file:    {}", file.display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Initialized:     {}", paths.is_initialized());
        }
        None => {
            println!("Expense Tracker - personal expenses from the terminal");
            println!();
            println!("Run 'expenses --help' for usage information.");
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
