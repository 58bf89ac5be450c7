//! CLI session state
//!
//! A session owns the one expense store for this run, seeded from the working
//! file and written back to it after changes.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::{load_from_file, save_to_file, SkippedRow};
use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::store::ExpenseStore;

/// The store plus where it came from
pub struct Session {
    settings: Settings,
    file: PathBuf,
    /// Rewrite the working file even if that drops `skipped_on_open` rows
    force: bool,
    pub store: ExpenseStore,
    /// Rows of the working file that could not be loaded
    pub skipped_on_open: Vec<SkippedRow>,
}

impl Session {
    /// Open the working file, or start empty if it does not exist yet
    ///
    /// `file` overrides the settings' default file.
    pub fn open(
        paths: &ExpensePaths,
        settings: Settings,
        file: Option<PathBuf>,
    ) -> ExpenseResult<Self> {
        let file = file.unwrap_or_else(|| paths.expenses_file(&settings.default_file));

        let mut store = ExpenseStore::new();
        let skipped_on_open = match load_from_file(&file) {
            Ok(outcome) => {
                store.extend(outcome.records);
                outcome.skipped_rows
            }
            Err(ExpenseError::NotFound { .. }) => {
                debug!(path = %file.display(), "no working file yet, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            settings,
            file,
            force: false,
            store,
            skipped_on_open,
        })
    }

    /// Allow `persist` to overwrite a working file that had unreadable rows
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The working file this session reads and writes
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Fail if writing the working file would lose rows it still holds
    ///
    /// Rows skipped on open exist only in the file; rewriting it from the
    /// store would drop them.
    pub fn ensure_writable(&self) -> ExpenseResult<()> {
        if self.skipped_on_open.is_empty() || self.force {
            return Ok(());
        }
        Err(ExpenseError::UnreadableRows {
            path: self.file.clone(),
            count: self.skipped_on_open.len(),
        })
    }

    /// Write the store back to the working file
    pub fn persist(&self) -> ExpenseResult<usize> {
        self.ensure_writable()?;
        if !self.skipped_on_open.is_empty() {
            warn!(
                path = %self.file.display(),
                dropped = self.skipped_on_open.len(),
                "rewriting working file without its unreadable rows"
            );
        }
        save_to_file(&self.file, self.store.all())
    }
}
