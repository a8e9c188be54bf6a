//! Per-entity dump files
//!
//! A dump is a directory with up to three files, one line per record and
//! fields joined by `;`:
//!
//! ```text
//! accounts.dump   ID;Phone;Balance
//! payments.dump   ID;AccountID;Amount;Category;Status
//! favorites.dump  ID;AccountID;Amount;Category
//! ```
//!
//! A file is only written when its collection is non-empty, and a missing
//! file is skipped on import.
//!
//! # Merge Semantics
//!
//! Importing merges by ID: a record whose ID is already held overwrites the
//! mutable fields of every entity with that ID, any other record is appended.
//! Importing a dump back into the ledger that wrote it is therefore a no-op.

use crate::core::LedgerService;
use crate::io::csv_format::{read_records, write_records, AccountRow, FavoriteRow, PaymentRow};
use crate::io::{close_file, create_file, open_file};
use crate::types::{Account, Favorite, Payment, WalletError};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Account dump file name
pub const ACCOUNTS_DUMP: &str = "accounts.dump";

/// Payment dump file name
pub const PAYMENTS_DUMP: &str = "payments.dump";

/// Favorite dump file name
pub const FAVORITES_DUMP: &str = "favorites.dump";

/// Record terminator of dump files
pub const RECORD_TERMINATOR: u8 = b'\n';

impl LedgerService {
    /// Write the dump files of every non-empty collection into `dir`
    ///
    /// Existing dump files are replaced. Files for empty collections are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if a file cannot be created or written, for
    /// example because `dir` does not exist. Files written before the
    /// failure stay on disk.
    pub fn export(&self, dir: &Path) -> Result<(), WalletError> {
        if !self.accounts().is_empty() {
            write_dump(
                &dir.join(ACCOUNTS_DUMP),
                self.accounts().iter().map(AccountRow::from),
            )?;
        }
        if !self.payments().is_empty() {
            write_dump(
                &dir.join(PAYMENTS_DUMP),
                self.payments().iter().map(PaymentRow::from),
            )?;
        }
        if !self.favorites().is_empty() {
            write_dump(
                &dir.join(FAVORITES_DUMP),
                self.favorites().iter().map(FavoriteRow::from),
            )?;
        }

        debug!(
            dir = %dir.display(),
            accounts = self.accounts().len(),
            payments = self.payments().len(),
            favorites = self.favorites().len(),
            "exported dump"
        );
        Ok(())
    }

    /// Merge the dump files found in `dir` into the ledger
    ///
    /// Files are read in the order accounts, payments, favorites. Records are
    /// applied one by one, so on error everything read before the bad record
    /// (including whole earlier files) stays applied.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if an existing file cannot be read, and `Parse`
    /// for a record with the wrong field count, a non-integer number or an
    /// unknown payment status.
    pub fn import(&mut self, dir: &Path) -> Result<(), WalletError> {
        let result = self.import_dumps(dir);
        self.sync_next_account_id();
        result
    }

    fn import_dumps(&mut self, dir: &Path) -> Result<(), WalletError> {
        let path = dir.join(ACCOUNTS_DUMP);
        if path.exists() {
            let file = open_file(&path)?;
            let count = read_records(
                file,
                RECORD_TERMINATOR,
                AccountRow::FIELDS,
                &path,
                |row: AccountRow| self.merge_account(row),
            )?;
            debug!(path = %path.display(), records = count, "imported accounts dump");
        }

        let path = dir.join(PAYMENTS_DUMP);
        if path.exists() {
            let file = open_file(&path)?;
            let count = read_records(
                file,
                RECORD_TERMINATOR,
                PaymentRow::FIELDS,
                &path,
                |row: PaymentRow| self.merge_payment(row),
            )?;
            debug!(path = %path.display(), records = count, "imported payments dump");
        }

        let path = dir.join(FAVORITES_DUMP);
        if path.exists() {
            let file = open_file(&path)?;
            let count = read_records(
                file,
                RECORD_TERMINATOR,
                FavoriteRow::FIELDS,
                &path,
                |row: FavoriteRow| self.merge_favorite(row),
            )?;
            debug!(path = %path.display(), records = count, "imported favorites dump");
        }

        Ok(())
    }

    fn merge_account(&mut self, row: AccountRow) {
        let mut merged = false;
        for account in self.accounts_mut().iter_mut().filter(|a| a.id == row.id) {
            account.phone = row.phone.clone();
            account.balance = row.balance;
            merged = true;
        }
        if !merged {
            self.accounts_mut().push(Account::from(row));
        }
    }

    fn merge_payment(&mut self, row: PaymentRow) {
        let mut merged = false;
        for payment in self.payments_mut().iter_mut().filter(|p| p.id == row.id) {
            payment.account_id = row.account_id;
            payment.amount = row.amount;
            payment.category = row.category.clone();
            payment.status = row.status;
            merged = true;
        }
        if !merged {
            self.payments_mut().push(Payment::from(row));
        }
    }

    /// Names are not part of the dump, so a merged favorite keeps its name
    fn merge_favorite(&mut self, row: FavoriteRow) {
        let mut merged = false;
        for favorite in self.favorites_mut().iter_mut().filter(|f| f.id == row.id) {
            favorite.account_id = row.account_id;
            favorite.amount = row.amount;
            favorite.category = row.category.clone();
            merged = true;
        }
        if !merged {
            self.favorites_mut().push(Favorite::from(row));
        }
    }
}

fn write_dump<T, I>(path: &Path, rows: I) -> Result<(), WalletError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let file = create_file(path)?;
    let file = write_records(file, RECORD_TERMINATOR, rows, path)?;
    close_file(path, file);
    Ok(())
}
