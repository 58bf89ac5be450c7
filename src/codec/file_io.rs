//! Loading and saving expense files
//!
//! Saves replace the destination atomically (write to temp, then rename) so a
//! failed save never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::delimited::{decode_from_reader, encode, DecodeOutcome};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::expense::{self, ExpenseRecord};

/// Read and decode an expense file
///
/// A missing file is reported as [`ExpenseError::NotFound`].
pub fn load_from_file<P: AsRef<Path>>(path: P) -> ExpenseResult<DecodeOutcome> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ExpenseError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(ExpenseError::Io(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let outcome = decode_from_reader(BufReader::new(file), expense::today())?;
    info!(
        path = %path.display(),
        loaded = outcome.loaded,
        skipped = outcome.skipped,
        "expense file loaded"
    );
    Ok(outcome)
}

/// Encode records and replace the file at `path` with them
///
/// Parent directories are created as needed. Returns the number of records
/// written.
pub fn save_to_file<P: AsRef<Path>>(path: P, records: &[ExpenseRecord]) -> ExpenseResult<usize> {
    let path = path.as_ref();
    let payload = encode(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path)?;

    let file = File::create(&temp_path)
        .map_err(|e| ExpenseError::Io(format!("Failed to create temp file: {}", e)))?;

    if let Err(e) = write_synced(file, payload.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(ExpenseError::Io(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ExpenseError::Io(format!("Failed to replace {}: {}", path.display(), e))
    })?;

    info!(path = %path.display(), count = records.len(), "expense file saved");
    Ok(records.len())
}

/// Write, flush and sync to disk before the rename
fn write_synced(file: File, bytes: &[u8]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

fn temp_path_for(path: &Path) -> ExpenseResult<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| ExpenseError::Io(format!("Not a file path: {}", path.display())))?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}
