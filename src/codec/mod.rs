//! Delimited-file codec
//!
//! Translates the expense store to and from CSV text, and reads/writes that
//! text on disk.

pub mod delimited;
pub mod file_io;

pub use delimited::{decode, decode_as_of, encode, DecodeOutcome, SkipReason, SkippedRow, HEADER};
pub use file_io::{load_from_file, save_to_file};
