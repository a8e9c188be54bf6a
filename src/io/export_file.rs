//! Single-file account export
//!
//! Every account is written as `ID;Phone;Balance|`, all records back to back
//! with no newline. Only accounts are exported.
//!
//! Importing appends every record as a new account. Existing accounts are
//! not consulted, so importing a file into a ledger that already holds those
//! accounts duplicates them.

use crate::core::LedgerService;
use crate::io::csv_format::{read_records, write_records, AccountRow};
use crate::io::{close_file, create_file, open_file};
use crate::types::{Account, WalletError};
use std::path::Path;
use tracing::debug;

/// Record terminator of the export file
pub const RECORD_TERMINATOR: u8 = b'|';

impl LedgerService {
    /// Write all accounts to `path`, replacing its contents
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file cannot be created or written.
    pub fn export_to_file(&self, path: &Path) -> Result<(), WalletError> {
        let file = create_file(path)?;
        let file = write_records(
            file,
            RECORD_TERMINATOR,
            self.accounts().iter().map(AccountRow::from),
            path,
        )?;
        close_file(path, file);

        debug!(path = %path.display(), accounts = self.accounts().len(), "exported accounts");
        Ok(())
    }

    /// Append every account stored in `path`
    ///
    /// Records are appended in file order without checking for duplicate IDs
    /// or phones. If a record fails to parse, the accounts read before it stay
    /// in the ledger. Text after the last `|` is not a record and is ignored.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file cannot be opened or read, and
    /// `Parse` for an empty record or a record without exactly three fields
    /// or with a non-integer ID or balance.
    pub fn import_from_file(&mut self, path: &Path) -> Result<(), WalletError> {
        let file = open_file(path)?;

        let result = read_records(
            file,
            RECORD_TERMINATOR,
            AccountRow::FIELDS,
            path,
            |row: AccountRow| self.accounts_mut().push(Account::from(row)),
        );
        self.sync_next_account_id();

        let imported = result?;
        debug!(path = %path.display(), accounts = imported, "imported accounts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_export_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        let mut ledger = LedgerService::new();
        ledger.register_account("+992000000001").unwrap();
        ledger.register_account("+992000000002").unwrap();
        ledger.deposit(2, 500).unwrap();

        ledger.export_to_file(&path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1;+992000000001;0|2;+992000000002;500|"
        );
    }

    #[test]
    fn test_export_empty_ledger_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");

        LedgerService::new().export_to_file(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_export_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "stale content that is much longer than the export").unwrap();
        let mut ledger = LedgerService::new();
        ledger.register_account("+1").unwrap();

        ledger.export_to_file(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1;+1;0|");
    }

    #[test]
    fn test_export_to_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("export.txt");

        let result = LedgerService::new().export_to_file(&path);

        assert!(matches!(result, Err(WalletError::FileNotFound { .. })));
    }

    #[test]
    fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut ledger = LedgerService::new();

        let result = ledger.import_from_file(&dir.path().join("nope.txt"));

        assert!(matches!(result, Err(WalletError::FileNotFound { .. })));
    }

    #[test]
    fn test_import_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "3;+992000000003;30|7;+992000000007;70|").unwrap();
        let mut ledger = LedgerService::new();
        ledger.register_account("+992000000001").unwrap();

        ledger.import_from_file(&path).unwrap();

        let ids: Vec<_> = ledger.accounts().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3, 7]);
        assert_eq!(ledger.find_account_by_id(7).unwrap().balance, 70);
    }

    #[test]
    fn test_import_partial_failure_keeps_earlier_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "1;+992000000001;10|oops;+992000000002;20|3;+992000000003;30|").unwrap();
        let mut ledger = LedgerService::new();

        let result = ledger.import_from_file(&path);

        assert!(matches!(result, Err(WalletError::Parse { .. })));
        assert_eq!(ledger.accounts().len(), 1);
        assert_eq!(ledger.accounts()[0].phone, "+992000000001");
    }

    #[test]
    fn test_register_after_import_uses_fresh_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "5;+992000000005;0|").unwrap();
        let mut ledger = LedgerService::new();
        ledger.import_from_file(&path).unwrap();

        let account = ledger.register_account("+992000000006").unwrap();

        assert_eq!(account.id, 6);
    }

    #[test]
    fn test_import_empty_record_stops_import() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "1;+1;10||2;+2;20|").unwrap();
        let mut ledger = LedgerService::new();

        let result = ledger.import_from_file(&path);

        assert!(matches!(result, Err(WalletError::Parse { line: Some(2), .. })));
        assert_eq!(ledger.accounts(), &[Account { id: 1, phone: "+1".to_string(), balance: 10 }]);
    }

    #[test]
    fn test_import_skips_unterminated_last_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "1;+1;10|2;+2;20").unwrap();
        let mut ledger = LedgerService::new();

        ledger.import_from_file(&path).unwrap();

        assert_eq!(ledger.accounts().len(), 1);
        assert_eq!(ledger.accounts()[0].id, 1);
    }

    #[test]
    fn test_import_max_id_then_register_wraps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "9223372036854775807;+1;0|").unwrap();
        let mut ledger = LedgerService::new();
        ledger.import_from_file(&path).unwrap();

        let account = ledger.register_account("+2").unwrap();

        assert_eq!(account.id, i64::MIN);
    }
}
