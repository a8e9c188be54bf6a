//! I/O module
//!
//! Handles the two snapshot formats of the ledger. They are independent and
//! not interchangeable.
//!
//! # Components
//!
//! - `csv_format` - Record rows, delimited reader/writer setup, account table output
//! - `export_file` - Single-file account export/import (`ID;Phone;Balance|...`), import always appends
//! - `dump` - Per-entity dump files in a directory, import merges by ID

pub mod csv_format;
pub mod dump;
pub mod export_file;

pub use csv_format::{write_accounts_csv, AccountRow, FavoriteRow, PaymentRow};
pub use dump::{ACCOUNTS_DUMP, FAVORITES_DUMP, PAYMENTS_DUMP};

use crate::types::WalletError;
use std::fs::File;
use std::path::Path;
use tracing::warn;

/// Open `path` for reading
pub(crate) fn open_file(path: &Path) -> Result<File, WalletError> {
    File::open(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to open file");
        WalletError::file_not_found(path, e)
    })
}

/// Create or truncate `path` for writing
pub(crate) fn create_file(path: &Path) -> Result<File, WalletError> {
    File::create(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to create file");
        WalletError::file_not_found(path, e)
    })
}

/// Flush a written file to disk, best effort
///
/// A failure here does not fail the export; it is only logged.
pub(crate) fn close_file(path: &Path, file: File) {
    if let Err(e) = file.sync_all() {
        warn!(path = %path.display(), error = %e, "failed to sync file on close");
    }
}
