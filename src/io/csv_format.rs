//! Delimited record handling shared by both snapshot formats
//!
//! This module centralizes the record-level concerns of the snapshot files:
//! - Row structures for serialization and deserialization
//! - Conversions between rows and domain types
//! - Reader and writer setup for `;`-delimited, unquoted, headerless records
//! - Account table output for the CLI
//!
//! Both formats separate fields with `;` and differ only in the record
//! terminator (`|` for the single-file export, `\n` for dumps). Quoting is
//! disabled in both directions, so a field containing a delimiter is written
//! as is and will not read back correctly.

use crate::types::{Account, AccountId, Favorite, Money, Payment, PaymentStatus, WalletError};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use tracing::warn;

/// Field delimiter used by every snapshot file
pub const FIELD_DELIMITER: u8 = b';';

/// Account record: `ID;Phone;Balance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: AccountId,
    pub phone: String,
    pub balance: Money,
}

impl AccountRow {
    pub const FIELDS: usize = 3;
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        AccountRow {
            id: account.id,
            phone: account.phone.clone(),
            balance: account.balance,
        }
    }
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            phone: row.phone,
            balance: row.balance,
        }
    }
}

/// Payment record: `ID;AccountID;Amount;Category;Status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub id: String,
    pub account_id: AccountId,
    pub amount: Money,
    pub category: String,
    pub status: PaymentStatus,
}

impl PaymentRow {
    pub const FIELDS: usize = 5;
}

impl From<&Payment> for PaymentRow {
    fn from(payment: &Payment) -> Self {
        PaymentRow {
            id: payment.id.clone(),
            account_id: payment.account_id,
            amount: payment.amount,
            category: payment.category.clone(),
            status: payment.status,
        }
    }
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            account_id: row.account_id,
            amount: row.amount,
            category: row.category,
            status: row.status,
        }
    }
}

/// Favorite record: `ID;AccountID;Amount;Category`
///
/// The favorite's name is not part of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRow {
    pub id: String,
    pub account_id: AccountId,
    pub amount: Money,
    pub category: String,
}

impl FavoriteRow {
    pub const FIELDS: usize = 4;
}

impl From<&Favorite> for FavoriteRow {
    fn from(favorite: &Favorite) -> Self {
        FavoriteRow {
            id: favorite.id.clone(),
            account_id: favorite.account_id,
            amount: favorite.amount,
            category: favorite.category.clone(),
        }
    }
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Favorite {
            id: row.id,
            account_id: row.account_id,
            name: String::new(),
            amount: row.amount,
            category: row.category,
        }
    }
}

/// Serialize `rows` to `output`, ending every record with `terminator`
///
/// `path` is only used for error context.
///
/// # Returns
///
/// The flushed underlying writer, so the caller can sync or close it.
///
/// # Errors
///
/// Returns `FileNotFound` if writing or flushing fails.
pub fn write_records<W, T, I>(
    output: W,
    terminator: u8,
    rows: I,
    path: &Path,
) -> Result<W, WalletError>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .terminator(Terminator::Any(terminator))
        .quote_style(QuoteStyle::Never)
        .has_headers(false)
        .from_writer(output);

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| WalletError::from_csv(path, e))?;
    }

    writer
        .into_inner()
        .map_err(|e| WalletError::file_not_found(path, e.into_error()))
}

/// Read `terminator`-separated records from `input` and hand each parsed row to `apply`
///
/// The input is split on `terminator` and the segment after the last
/// terminator is dropped: for a well-formed file it is empty, otherwise it
/// is an unterminated record and is ignored with a warning. Every other
/// segment must be a complete record, so an empty one (two terminators in a
/// row, or a blank line) is a parse error.
///
/// Rows are applied as soon as they parse, so a failure leaves every
/// earlier row applied.
///
/// # Arguments
///
/// * `input` - Source of the records
/// * `terminator` - Record terminator byte
/// * `fields` - Exact number of fields each record must have
/// * `path` - File the records come from, for error context
/// * `apply` - Called once per parsed row, in file order
///
/// # Returns
///
/// The number of rows applied.
///
/// # Errors
///
/// Returns `Parse` on an empty record, a wrong field count or a field of
/// the wrong type, and `FileNotFound` if reading fails.
pub fn read_records<R, T, F>(
    mut input: R,
    terminator: u8,
    fields: usize,
    path: &Path,
    mut apply: F,
) -> Result<usize, WalletError>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(T),
{
    let mut content = Vec::new();
    input
        .read_to_end(&mut content)
        .map_err(|e| WalletError::file_not_found(path, e))?;

    let mut segments: Vec<&[u8]> = content.split(|&byte| byte == terminator).collect();
    if let Some(tail) = segments.pop().filter(|tail| !tail.is_empty()) {
        warn!(
            path = %path.display(),
            bytes = tail.len(),
            "ignoring unterminated final record"
        );
    }

    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(FIELD_DELIMITER)
        .terminator(Terminator::Any(terminator))
        .quoting(false)
        .has_headers(false)
        .flexible(true);

    let mut record = StringRecord::new();
    let mut applied = 0;
    for (index, segment) in segments.into_iter().enumerate() {
        let line = index as u64 + 1;
        let found = !segment.is_empty()
            && builder
                .from_reader(segment)
                .read_record(&mut record)
                .map_err(|e| record_error(path, line, e))?;
        if !found {
            return Err(WalletError::parse(path, Some(line), "empty record"));
        }

        apply(parse_record(&record, fields, path, line)?);
        applied += 1;
    }

    Ok(applied)
}

fn parse_record<T: DeserializeOwned>(
    record: &StringRecord,
    fields: usize,
    path: &Path,
    line: u64,
) -> Result<T, WalletError> {
    if record.len() != fields {
        return Err(WalletError::parse(
            path,
            Some(line),
            format!("expected {} fields, found {}", fields, record.len()),
        ));
    }

    record
        .deserialize(None)
        .map_err(|e| record_error(path, line, e))
}

/// Parse error for record `line`, keeping only csv's field-level message
///
/// Each record is read on its own, so csv's record positions always point
/// at the first record and are replaced by `line`.
fn record_error(path: &Path, line: u64, error: csv::Error) -> WalletError {
    let message = match error.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::Utf8 { err, .. } => err.to_string(),
        _ => error.to_string(),
    };
    WalletError::parse(path, Some(line), message)
}

/// Write accounts as a CSV table with columns: id, phone, balance
///
/// Accounts are written in ledger order.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["id", "phone", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for account in accounts {
        writer
            .write_record(&[
                account.id.to_string(),
                account.phone.clone(),
                account.balance.to_string(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
